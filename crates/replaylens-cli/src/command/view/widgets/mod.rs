use ratatui::{
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    widgets::{Block, Padding},
};
use replaylens_model::Team;

pub use self::{
    damage_panel::DamagePanel,
    lane_panel::LanePanel,
    minimap::{MinimapView, ObjectiveDot, PlayerDot},
};

mod damage_panel;
mod lane_panel;
mod minimap;

pub const AMBER: Color = Color::Rgb(0xFF, 0x8C, 0x00);
pub const SAPPHIRE: Color = Color::Rgb(0x41, 0x69, 0xE1);

/// Terminal colour of a team; unknown teams are grey.
pub fn team_color(team: Option<Team>) -> Color {
    match team {
        Some(Team::Amber) => AMBER,
        Some(Team::Sapphire) => SAPPHIRE,
        None => Color::Gray,
    }
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Block::bordered()
        .title(title)
        .border_style(border_style)
        .padding(Padding::symmetric(1, 0))
        .merge_borders(MergeStrategy::Exact)
}

/// `width` cells of bar for a share in `[0, 100]`.
fn share_bar(percentage: f64, width: u16) -> String {
    let filled = percentage.clamp(0.0, 100.0) / 100.0 * f64::from(width);
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = filled.round() as usize;
    let empty = usize::from(width) - filled.min(usize::from(width));
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_bar_fills_proportionally() {
        assert_eq!(share_bar(0.0, 4), "░░░░");
        assert_eq!(share_bar(50.0, 4), "██░░");
        assert_eq!(share_bar(100.0, 4), "████");
        assert_eq!(share_bar(250.0, 4), "████");
    }
}

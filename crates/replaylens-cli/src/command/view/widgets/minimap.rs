use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Stylize as _},
    symbols::Marker,
    text::Span,
    widgets::{
        Widget,
        canvas::{Canvas, Points},
    },
};
use replaylens_minimap::{MINIMAP_SIZE, NormalizedPoint, PixelPosition};
use replaylens_model::Team;

use super::{pane_block, team_color};

/// A player marker in top-left-origin pixel space.
#[derive(Debug, Clone)]
pub struct PlayerDot {
    pub label: String,
    pub pixel: PixelPosition,
    pub team: Option<Team>,
    pub regions: Vec<String>,
}

/// A structure marker in top-left-origin normalized space.
#[derive(Debug, Clone)]
pub struct ObjectiveDot {
    pub position: NormalizedPoint,
    pub team: Option<Team>,
    pub destroyed: bool,
    /// The most recent destruction at the cursor.
    pub active: bool,
}

pub struct MinimapView<'a> {
    pub title: String,
    pub players: &'a [PlayerDot],
    pub objectives: &'a [ObjectiveDot],
    pub selected: Option<usize>,
    pub focused: bool,
}

/// Canvas coordinates have Y pointing up.
fn canvas_point(left: f64, top: f64) -> (f64, f64) {
    (left, MINIMAP_SIZE - top)
}

impl Widget for MinimapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let canvas = Canvas::default()
            .block(pane_block(self.title, self.focused))
            .marker(Marker::Braille)
            .x_bounds([0.0, MINIMAP_SIZE])
            .y_bounds([0.0, MINIMAP_SIZE])
            .paint(|ctx| {
                for objective in self.objectives {
                    let color = if objective.active {
                        Color::Yellow
                    } else if objective.destroyed {
                        Color::DarkGray
                    } else {
                        team_color(objective.team)
                    };
                    let point = canvas_point(
                        objective.position.x * MINIMAP_SIZE,
                        objective.position.y * MINIMAP_SIZE,
                    );
                    ctx.draw(&Points {
                        coords: &[point],
                        color,
                    });
                }
                ctx.layer();
                for (i, player) in self.players.iter().enumerate() {
                    let (x, y) = canvas_point(player.pixel.left, player.pixel.top);
                    let color = team_color(player.team);
                    let symbol = if self.selected == Some(i) {
                        Span::from("◆").fg(Color::White).bold()
                    } else {
                        Span::from("●").fg(color)
                    };
                    ctx.print(x, y, symbol);
                }
            });
        canvas.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_point_flips_vertical_axis() {
        assert_eq!(canvas_point(10.0, 0.0), (10.0, MINIMAP_SIZE));
        assert_eq!(canvas_point(10.0, MINIMAP_SIZE), (10.0, 0.0));
    }
}

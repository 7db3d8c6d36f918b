use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget, Widget},
};
use replaylens_analysis::lane::ActivePressure;
use replaylens_model::Team;

use super::{pane_block, share_bar, team_color};

pub struct LanePanel<'a> {
    pub pressures: &'a [ActivePressure],
    pub derived: bool,
    pub focused: bool,
    pub selected: usize,
}

impl Widget for LanePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let title = if self.derived {
            "Lane Pressure (derived)"
        } else {
            "Lane Pressure"
        };
        let block = pane_block(title.to_owned(), self.focused);

        if self.pressures.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Line::from("No active waves")
                .style(Color::DarkGray)
                .render(inner, buf);
            return;
        }

        let items = self
            .pressures
            .iter()
            .map(|pressure| {
                let color = team_color(Team::from_id(pressure.team));
                let percentage = pressure.pressure * 100.0;
                let players = if pressure.player_names.is_empty() {
                    String::new()
                } else {
                    format!("  {}", pressure.player_names.join(", "))
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("Lane {} ", pressure.lane)),
                    Span::styled(format!("{:<9}", pressure.team_name), color),
                    Span::styled(share_bar(percentage, 16), color),
                    Span::raw(format!(" {percentage:>5.1}%")),
                    Span::styled(players, Color::DarkGray),
                ]))
            })
            .collect::<Vec<_>>();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol(if self.focused { ">> " } else { "   " });

        let mut state = ListState::default();
        state.select(Some(self.selected.min(self.pressures.len() - 1)));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

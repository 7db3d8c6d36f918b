use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget, Widget},
};
use replaylens_analysis::damage::{DamageDistribution, TargetKind};
use replaylens_model::Team;

use super::{pane_block, share_bar, team_color};
use crate::util::format_damage;

/// Damage allocation of one team, one row per target.
pub struct DamagePanel<'a> {
    pub title: String,
    pub dist: &'a DamageDistribution,
    pub focused: bool,
    pub selected: usize,
}

impl Widget for DamagePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let total = format_damage(self.dist.total_damage);
        let title = format!("{} | Total {total}", self.title);

        let block = pane_block(title, self.focused);

        if self.dist.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Line::from("No damage in this window")
                .style(Color::DarkGray)
                .render(inner, buf);
            return;
        }

        let items = self
            .dist
            .targets
            .iter()
            .map(|target| {
                let color = match target.kind {
                    TargetKind::Player => team_color(target.team.and_then(Team::from_id)),
                    TargetKind::Boss => Color::LightRed,
                    TargetKind::LaneCreeps | TargetKind::NeutralCreeps => Color::DarkGray,
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<28.28}", target.name), color),
                    Span::raw(format!(" {:>10} ", format_damage(target.damage))),
                    Span::styled(share_bar(target.percentage, 12), color),
                    Span::raw(format!(" {:>5.1}%", target.percentage)),
                ]))
            })
            .collect::<Vec<_>>();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol(if self.focused { ">> " } else { "   " });

        let mut state = ListState::default();
        state.select(Some(self.selected.min(self.dist.targets.len() - 1)));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

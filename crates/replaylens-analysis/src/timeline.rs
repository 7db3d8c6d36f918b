//! Match phases, structure destruction history and boss liveness.

use derive_more::Display;
use replaylens_model::{BossData, BossSnapshot, DestroyedObjective, Tick};
use serde::Serialize;

use crate::damage::TickRange;

/// Coarse match phase used as the default aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePhase {
    #[default]
    #[display("Full Match")]
    Full,
    #[display("Laning Phase")]
    Laning,
    #[display("Mid Game")]
    Mid,
    #[display("Late Game")]
    Late,
}

/// `floor(total * percent / 100)` without overflowing.
fn share(total: Tick, percent: usize) -> Tick {
    total / 100 * percent + total % 100 * percent / 100
}

impl TimePhase {
    pub const ALL: [Self; 4] = [Self::Full, Self::Laning, Self::Mid, Self::Late];

    /// Tick window of this phase in a match of `total` ticks.
    ///
    /// Phase boundaries are shared: the last tick of one phase is the first of the next.
    #[must_use]
    pub fn range(self, total: Tick) -> TickRange {
        let laning_end = share(total, 33);
        let mid_end = share(total, 66);
        match self {
            Self::Full => TickRange::new(0, total),
            Self::Laning => TickRange::new(0, laning_end),
            Self::Mid => TickRange::new(laning_end, mid_end),
            Self::Late => TickRange::new(mid_end, total),
        }
    }

    /// `"m:ss - m:ss"` of [`Self::range`].
    #[must_use]
    pub fn label(self, total: Tick) -> String {
        let range = self.range(total);
        format!("{} - {}", format_mmss(range.start), format_mmss(range.end))
    }

    /// The phase after this one, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Full => Self::Laning,
            Self::Laning => Self::Mid,
            Self::Mid => Self::Late,
            Self::Late => Self::Full,
        }
    }
}

/// Formats seconds as `m:ss`.
#[must_use]
pub fn format_mmss(seconds: Tick) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Position of a tick in the destruction history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ObjectiveCursor {
    /// Index of the last destruction at or before the tick.
    pub index: Option<usize>,
    /// `"{team}_{team_objective_id}"` of that destruction.
    pub active_key: Option<String>,
}

/// Destruction events sorted by time, without sentinel entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectiveTimeline {
    destroyed: Vec<DestroyedObjective>,
}

fn destroyed_tick(objective: &DestroyedObjective) -> Tick {
    usize::try_from(objective.destroyed_time_s).unwrap_or(usize::MAX)
}

impl ObjectiveTimeline {
    #[must_use]
    pub fn new(objectives: &[DestroyedObjective]) -> Self {
        let mut destroyed: Vec<_> = objectives
            .iter()
            .filter(|objective| !objective.is_sentinel())
            .cloned()
            .collect();
        destroyed.sort_by_key(|objective| objective.destroyed_time_s);
        Self { destroyed }
    }

    #[must_use]
    pub fn events(&self) -> &[DestroyedObjective] {
        &self.destroyed
    }

    /// Destructions that happened at or before `tick`.
    #[must_use]
    pub fn history(&self, tick: Tick) -> &[DestroyedObjective] {
        let end = self
            .destroyed
            .partition_point(|objective| destroyed_tick(objective) <= tick);
        &self.destroyed[..end]
    }

    #[must_use]
    pub fn cursor(&self, tick: Tick) -> ObjectiveCursor {
        let last = self.history(tick).len().checked_sub(1);
        ObjectiveCursor {
            index: last,
            active_key: last.map(|i| self.destroyed[i].key()),
        }
    }

    /// Whether the structure `(team, team_objective_id)` has fallen by `tick`.
    #[must_use]
    pub fn is_destroyed(&self, team: u32, team_objective_id: u32, tick: Tick) -> bool {
        let team = team.to_string();
        let id = team_objective_id.to_string();
        self.history(tick)
            .iter()
            .any(|objective| objective.team == team && objective.team_objective_id == id)
    }
}

/// Boss liveness and health lookups.
#[derive(Debug, Clone, Copy)]
pub struct BossTimeline<'a> {
    data: &'a BossData,
}

impl<'a> BossTimeline<'a> {
    #[must_use]
    pub fn new(data: &'a BossData) -> Self {
        Self { data }
    }

    /// Bosses that have spawned and not yet died at `tick`, in snapshot order.
    pub fn alive_at(&self, tick: Tick) -> impl Iterator<Item = &'a BossSnapshot> {
        self.data
            .snapshots
            .iter()
            .filter(move |boss| boss.is_alive_at(tick))
    }

    #[must_use]
    pub fn health_at(&self, boss: &BossSnapshot, tick: Tick) -> Option<i32> {
        self.data.health_at(boss.entity_index, tick)
    }
}

//! Time-windowed damage aggregation.
//!
//! Damage is read from the sparse per-tick log of each player
//! (`damage[tick][victim_id] -> records`), summed per victim over an inclusive
//! [`TickRange`], and categorized into [`DamageTarget`]s:
//!
//! 1. the victim id is a player `custom_id` → [`TargetKind::Player`]
//! 2. the victim id is a non-zero integer matching a boss → [`TargetKind::Boss`]
//! 3. anything else is folded into one [`TargetKind::LaneCreeps`] bucket
//!
//! The resulting list is sorted by damage (descending, ties keep first-seen
//! order) and every target carries its share of the total.
//!
//! Three scopes are supported through [`DamageScope`]:
//!
//! - a single player's outgoing damage ([`aggregate_player`])
//! - a team's outgoing damage, merged across teammates before categorization
//!   ([`aggregate_team`])
//! - a team's damage to enemy objectives, with a per-player breakdown
//!   ([`aggregate_objectives`])

use std::collections::BTreeMap;

use replaylens_model::{BossSnapshot, ParsedMatchData, PlayerMatchData, Roster, Team};

pub use self::{
    accumulate::VictimTotals,
    boss::{BossIndex, BossKey, boss_display_name},
    lane_trades::{HeroTrade, LaneTrades, NpcDamageStats, lane_trades},
    objective::{
        ObjectiveDamageDistribution, ObjectiveTarget, PlayerContribution, PlayerObjectiveDamage,
        aggregate_objectives,
    },
    range::TickRange,
    target::{DamageDistribution, DamageTarget, TargetKind},
};
pub(crate) use self::target::percentage;

mod accumulate;
mod boss;
mod categorize;
mod lane_trades;
mod objective;
mod range;
mod target;

/// Everything the aggregator reads, borrowed from the match snapshot.
#[derive(Debug, Clone, Copy)]
pub struct DamageContext<'a> {
    pub roster: &'a Roster,
    pub per_player: &'a BTreeMap<String, PlayerMatchData>,
    pub bosses: &'a [BossSnapshot],
    /// Boss lookup key for the player and team scopes.
    pub boss_key: BossKey,
}

impl<'a> DamageContext<'a> {
    #[must_use]
    pub fn new(roster: &'a Roster, data: &'a ParsedMatchData) -> Self {
        Self {
            roster,
            per_player: &data.per_player_data,
            bosses: &data.bosses.snapshots,
            boss_key: BossKey::default(),
        }
    }

    #[must_use]
    pub fn with_boss_key(self, boss_key: BossKey) -> Self {
        Self { boss_key, ..self }
    }

    fn player_data(&self, custom_id: &str) -> Option<&'a PlayerMatchData> {
        self.per_player.get(custom_id)
    }
}

/// Aggregation scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageScope {
    /// Outgoing damage of the player with this `custom_id`.
    Player(String),
    /// Outgoing damage of every player on the team.
    Team(Team),
    /// Damage dealt by the team to the enemy team's bosses.
    Objective(Team),
}

/// Aggregates damage for `scope` over `range`.
///
/// For [`DamageScope::Objective`] the targets are the objective instances; use
/// [`aggregate_objectives`] for the per-player breakdown.
#[must_use]
pub fn aggregate(
    ctx: &DamageContext<'_>,
    scope: &DamageScope,
    range: TickRange,
) -> DamageDistribution {
    match scope {
        DamageScope::Player(custom_id) => aggregate_player(ctx, custom_id, range),
        DamageScope::Team(team) => aggregate_team(ctx, *team, range),
        DamageScope::Objective(team) => aggregate_objectives(ctx, *team, range).into_distribution(),
    }
}

/// Sums one player's outgoing damage per victim.
///
/// An unknown player or an empty log yields an empty distribution.
#[must_use]
pub fn aggregate_player(
    ctx: &DamageContext<'_>,
    custom_id: &str,
    range: TickRange,
) -> DamageDistribution {
    let mut totals = VictimTotals::default();
    if let Some(data) = ctx.player_data(custom_id) {
        totals.accumulate(data, range, |_| true);
    }
    let bosses = BossIndex::new(ctx.bosses, ctx.boss_key);
    categorize::categorize(&totals, ctx.roster, &bosses)
}

/// Sums outgoing damage of every player on `team`.
///
/// Victims hit by several teammates appear once with the combined damage.
#[must_use]
pub fn aggregate_team(ctx: &DamageContext<'_>, team: Team, range: TickRange) -> DamageDistribution {
    let mut totals = VictimTotals::default();
    for entry in ctx.roster.team(team) {
        if let Some(data) = ctx.player_data(entry.custom_id()) {
            totals.accumulate(data, range, |_| true);
        }
    }
    let bosses = BossIndex::new(ctx.bosses, ctx.boss_key);
    categorize::categorize(&totals, ctx.roster, &bosses)
}

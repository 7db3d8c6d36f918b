use std::collections::HashMap;

use replaylens_model::{Team, Tick};
use serde::Serialize;

use super::{
    BossIndex, BossKey, DamageContext, DamageDistribution, DamageTarget, TargetKind, TickRange,
    VictimTotals, boss_display_name,
    target::{percentage, sort_and_percent},
};

/// An enemy objective instance with its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectiveTarget {
    #[serde(flatten)]
    pub target: DamageTarget,
    pub spawn_time: Tick,
    pub death_time: Option<Tick>,
}

/// One player's share of the team's objective damage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerContribution {
    pub player_id: String,
    pub player_name: String,
    pub hero_name: String,
    pub damage: i64,
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
}

/// Damage from one player to one objective instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerObjectiveDamage {
    pub player_id: String,
    pub player_name: String,
    /// [`BossSnapshot::unique_key`](replaylens_model::BossSnapshot::unique_key) of the objective.
    pub objective_id: String,
    pub objective_name: String,
    pub damage: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ObjectiveDamageDistribution {
    pub total_objective_damage: i64,
    pub player_contributions: Vec<PlayerContribution>,
    pub objective_targets: Vec<ObjectiveTarget>,
    pub player_objective_damage: Vec<PlayerObjectiveDamage>,
}

impl ObjectiveDamageDistribution {
    /// The objective targets as a plain distribution.
    #[must_use]
    pub fn into_distribution(self) -> DamageDistribution {
        DamageDistribution {
            total_damage: self.total_objective_damage,
            targets: self
                .objective_targets
                .into_iter()
                .map(|objective| objective.target)
                .collect(),
        }
    }
}

fn to_tick(seconds: u32) -> Tick {
    usize::try_from(seconds).unwrap_or(usize::MAX)
}

/// Damage dealt by `team` to the bosses of the enemy team over `range`.
///
/// Objectives are looked up by entity index and grouped per instance, so
/// several guardians of the same type remain distinct targets.
#[must_use]
pub fn aggregate_objectives(
    ctx: &DamageContext<'_>,
    team: Team,
    range: TickRange,
) -> ObjectiveDamageDistribution {
    let enemy = team.enemy().id();
    let bosses = BossIndex::filtered(ctx.bosses, BossKey::EntityIndex, |boss| {
        boss.team == enemy
    });

    let per_player: Vec<_> = ctx
        .roster
        .team(team)
        .map(|entry| {
            let mut totals = VictimTotals::default();
            if let Some(data) = ctx.player_data(entry.custom_id()) {
                totals.accumulate(data, range, |victim| bosses.lookup(victim).is_some());
            }
            (entry, totals)
        })
        .collect();

    let total_objective_damage: i64 = per_player.iter().map(|(_, totals)| totals.total()).sum();

    let mut objective_targets: Vec<ObjectiveTarget> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut player_contributions = Vec::new();
    let mut player_objective_damage = Vec::new();

    for (entry, totals) in &per_player {
        for (victim, damage) in totals.iter() {
            let Some(boss) = bosses.lookup(victim) else {
                continue;
            };
            let key = boss.unique_key();
            let slot = *slots.entry(key.clone()).or_insert_with(|| {
                let mut target =
                    DamageTarget::new(key.clone(), boss_display_name(boss), TargetKind::Boss, 0);
                target.team = Some(boss.team);
                target.boss_name_hash = Some(boss.boss_name_hash);
                objective_targets.push(ObjectiveTarget {
                    target,
                    spawn_time: to_tick(boss.spawn_time_s),
                    death_time: boss.death_time_s.map(to_tick),
                });
                objective_targets.len() - 1
            });
            objective_targets[slot].target.damage += damage;
            player_objective_damage.push(PlayerObjectiveDamage {
                player_id: entry.custom_id().to_owned(),
                player_name: entry.player.name.clone(),
                objective_id: key,
                objective_name: objective_targets[slot].target.name.clone(),
                damage,
            });
        }

        let damage = totals.total();
        if damage > 0 {
            player_contributions.push(PlayerContribution {
                player_id: entry.custom_id().to_owned(),
                player_name: entry.player.name.clone(),
                hero_name: entry.hero_name().to_owned(),
                damage,
                percentage: percentage(damage, total_objective_damage),
                hero_image: entry.hero_image().map(str::to_owned),
            });
        }
    }

    player_contributions.sort_by_key(|c| std::cmp::Reverse(c.damage));
    sort_and_percent(
        &mut objective_targets,
        |o| o.target.damage,
        |o, pct| o.target.percentage = pct,
    );

    ObjectiveDamageDistribution {
        total_objective_damage,
        player_contributions,
        objective_targets,
        player_objective_damage,
    }
}

use replaylens_model::RosterEntry;
use serde::Serialize;

use super::{DamageContext, TickRange, VictimTotals};

const LANE_CREEPS_VICTIM: &str = "20";
const GUARDIAN_VICTIM: &str = "21";
const NEUTRALS_VICTIM: &str = "22";
const NPC_VICTIMS: [&str; 3] = [LANE_CREEPS_VICTIM, GUARDIAN_VICTIM, NEUTRALS_VICTIM];

/// NPC damage of one lane player, split by victim bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NpcDamageStats {
    pub player_id: String,
    pub player_name: String,
    pub team: u32,
    pub hero_name: String,
    pub lane_creeps: i64,
    pub neutrals: i64,
    pub guardian: i64,
}

impl NpcDamageStats {
    #[must_use]
    pub fn total(&self) -> i64 {
        self.lane_creeps + self.neutrals + self.guardian
    }
}

/// Damage from one lane player to an opposing lane player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroTrade {
    pub attacker_id: String,
    pub attacker_name: String,
    pub victim_id: String,
    pub victim_name: String,
    pub damage: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneTrades {
    pub lane: i32,
    pub range: TickRange,
    /// One row per lane player, ordered by team.
    pub npc: Vec<NpcDamageStats>,
    /// Sorted by damage, descending.
    pub hero_trades: Vec<HeroTrade>,
}

/// Damage exchanged by the players assigned to `lane` over `range`.
#[must_use]
pub fn lane_trades(ctx: &DamageContext<'_>, lane: i32, range: TickRange) -> LaneTrades {
    let lane_players: Vec<&RosterEntry> = ctx
        .roster
        .iter()
        .filter(|entry| entry.player.lane == lane)
        .collect();

    let mut npc = Vec::with_capacity(lane_players.len());
    let mut hero_trades = Vec::new();

    for &attacker in &lane_players {
        let opponents: Vec<&RosterEntry> = lane_players
            .iter()
            .copied()
            .filter(|other| other.player.team != attacker.player.team)
            .collect();

        let mut totals = VictimTotals::default();
        if let Some(data) = ctx.player_data(attacker.custom_id()) {
            totals.accumulate(data, range, |victim| {
                NPC_VICTIMS.contains(&victim) || opponents.iter().any(|o| o.custom_id() == victim)

            });
        }

        npc.push(NpcDamageStats {
            player_id: attacker.custom_id().to_owned(),
            player_name: attacker.player.name.clone(),
            team: attacker.player.team,
            hero_name: attacker.hero_name().to_owned(),
            lane_creeps: totals.get(LANE_CREEPS_VICTIM).unwrap_or(0),
            neutrals: totals.get(NEUTRALS_VICTIM).unwrap_or(0),
            guardian: totals.get(GUARDIAN_VICTIM).unwrap_or(0),
        });

        for victim in &opponents {
            if let Some(damage) = totals.get(victim.custom_id()) {
                hero_trades.push(HeroTrade {
                    attacker_id: attacker.custom_id().to_owned(),
                    attacker_name: attacker.display_name(),
                    victim_id: victim.custom_id().to_owned(),
                    victim_name: victim.display_name(),
                    damage,
                });
            }
        }
    }

    npc.sort_by_key(|stats| stats.team);
    hero_trades.sort_by_key(|trade| std::cmp::Reverse(trade.damage));

    LaneTrades {
        lane,
        range,
        npc,
        hero_trades,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::fixtures::{log, match_data, player};

    #[test]
    fn test_npc_buckets_by_victim_id() {
        let (data, roster) = match_data(
            vec![player("1", 3, 1), player("2", 2, 1), player("9", 2, 2)],
            vec![
                ("1", log(&[&[("20", 10), ("21", 5)], &[("22", 7), ("20", 3)]])),
                ("9", log(&[&[("20", 1000)]])),
            ],
            vec![],
        );
        let ctx = DamageContext::new(&roster, &data);
        let trades = lane_trades(&ctx, 1, TickRange::new(0, 10));

        let ids: Vec<_> = trades.npc.iter().map(|s| s.player_id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
        let stats = &trades.npc[1];
        assert_eq!(
            (stats.lane_creeps, stats.neutrals, stats.guardian),
            (13, 7, 5)
        );

        assert_eq!(stats.total(), 25);
        assert_eq!(trades.npc[0].total(), 0);
    }

    #[test]
    fn test_hero_trades_only_between_opponents() {
        let (data, roster) = match_data(
            vec![
                player("1", 2, 1),
                player("2", 2, 1),
                player("3", 3, 1),
                player("4", 3, 2),
            ],
            vec![
                ("1", log(&[&[("2", 50), ("3", 40), ("4", 30)]])),
                ("3", log(&[&[("1", 90)]])),
            ],
            vec![],
        );
        let ctx = DamageContext::new(&roster, &data);
        let trades = lane_trades(&ctx, 1, TickRange::new(0, 0));

        let pairs: Vec<_> = trades
            .hero_trades
            .iter()
            .map(|t| (t.attacker_id.as_str(), t.victim_id.as_str(), t.damage))
            .collect();
        assert_eq!(pairs, [("3", "1", 90), ("1", "3", 40)]);
        assert_eq!(trades.hero_trades[0].attacker_name, "player3 (Haze)");
    }

    #[test]
    fn test_empty_lane() {
        let (data, roster) = match_data(vec![player("1", 2, 1)], vec![], vec![]);
        let ctx = DamageContext::new(&roster, &data);
        let trades = lane_trades(&ctx, 3, TickRange::new(0, 10));
        assert!(trades.npc.is_empty());
        assert!(trades.hero_trades.is_empty());
    }
}

use std::collections::HashMap;

use replaylens_model::Roster;

use super::{
    BossIndex, DamageDistribution, DamageTarget, TargetKind, VictimTotals, boss_display_name,
};

const LANE_CREEPS_ID: &str = "lane_creeps";
const LANE_CREEPS_NAME: &str = "Lane Creeps";

/// Turns per-victim totals into a sorted distribution.
///
/// Players come first, then bosses (merged per instance), then the creep
/// bucket; the final sort is stable so this is also the tie order.
pub(super) fn categorize(
    totals: &VictimTotals,
    roster: &Roster,
    bosses: &BossIndex<'_>,
) -> DamageDistribution {
    let mut players = Vec::new();
    let mut boss_targets: Vec<DamageTarget> = Vec::new();
    let mut boss_slots: HashMap<String, usize> = HashMap::new();
    let mut lane_creeps = 0;

    for (victim, damage) in totals.iter() {
        if let Some(entry) = roster.get(victim) {
            let mut target =
                DamageTarget::new(victim, entry.display_name(), TargetKind::Player, damage);
            target.team = Some(entry.player.team);
            target.hero_image = entry.hero_image().map(str::to_owned);
            players.push(target);
        } else if let Some(boss) = bosses.lookup(victim) {
            let key = boss.unique_key();
            if let Some(&slot) = boss_slots.get(&key) {
                boss_targets[slot].damage += damage;
                continue;
            }
            let mut target = DamageTarget::new(
                key.clone(),
                boss_display_name(boss),
                TargetKind::Boss,
                damage,
            );


            target.team = Some(boss.team);
            target.boss_name_hash = Some(boss.boss_name_hash);
            boss_slots.insert(key, boss_targets.len());
            boss_targets.push(target);
        } else {
            lane_creeps += damage;
        }
    }

    let mut targets = players;
    targets.append(&mut boss_targets);
    if lane_creeps > 0 {
        targets.push(DamageTarget::new(
            LANE_CREEPS_ID,
            LANE_CREEPS_NAME,
            TargetKind::LaneCreeps,
            lane_creeps,
        ));
    }
    DamageDistribution::from_targets(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::{
        BossKey,
        fixtures::{boss, heroes, player},
    };

    #[test]
    fn test_unknown_ids_fold_into_creep_bucket() {
        let roster = Roster::new(&[player("1", 2, 1)], &heroes());
        let mut totals = VictimTotals::default();
        totals.add("20", 3);
        totals.add("xyz", 4);
        totals.add("0", 5);
        let dist = categorize(&totals, &roster, &BossIndex::default());
        assert_eq!(dist.targets.len(), 1);
        assert_eq!(dist.targets[0].id, LANE_CREEPS_ID);
        assert_eq!(dist.targets[0].damage, 12);
    }

    #[test]
    fn test_boss_target_carries_unique_key() {
        let roster = Roster::default();
        let bosses = [boss(42, 21, 3, 1)];
        let index = BossIndex::new(&bosses, BossKey::EntityIndex);
        let mut totals = VictimTotals::default();
        totals.add("42", 8);
        let dist = categorize(&totals, &roster, &index);
        let target = &dist.targets[0];
        assert_eq!(target.id, "3_1_21_42");
        assert_eq!(target.name, "Boss #1 - Lane 1");
        assert_eq!(target.team, Some(3));
        assert_eq!(target.boss_name_hash, Some(1));
    }

    #[test]
    fn test_player_ids_win_over_boss_ids() {
        let roster = Roster::new(&[player("42", 3, 1)], &heroes());
        let bosses = [boss(42, 21, 3, 1)];
        let index = BossIndex::new(&bosses, BossKey::EntityIndex);
        let mut totals = VictimTotals::default();
        totals.add("42", 8);
        let dist = categorize(&totals, &roster, &index);
        assert_eq!(dist.targets[0].kind, TargetKind::Player);
    }
}

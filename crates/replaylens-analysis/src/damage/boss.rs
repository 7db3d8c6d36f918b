use std::collections::HashMap;

use replaylens_model::BossSnapshot;

/// Field of [`BossSnapshot`] that victim ids are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BossKey {
    /// Per-instance id. Two guardians of the same type stay separate targets.
    #[default]
    EntityIndex,
    /// Entity type id. Instances of one type collapse onto the last snapshot.
    CustomId,
}

/// Boss snapshots indexed by a [`BossKey`].
#[derive(Debug, Clone, Default)]
pub struct BossIndex<'a> {
    by_key: HashMap<i64, &'a BossSnapshot>,
}

impl<'a> BossIndex<'a> {
    #[must_use]
    pub fn new(bosses: &'a [BossSnapshot], key: BossKey) -> Self {
        Self::filtered(bosses, key, |_| true)
    }

    /// Index over the bosses accepted by `filter`.
    pub fn filtered<F>(bosses: &'a [BossSnapshot], key: BossKey, filter: F) -> Self
    where
        F: Fn(&BossSnapshot) -> bool,
    {
        let by_key = bosses
            .iter()
            .filter(|boss| filter(boss))
            .map(|boss| {
                let id = match key {
                    BossKey::EntityIndex => i64::from(boss.entity_index),
                    BossKey::CustomId => i64::from(boss.custom_id),
                };
                (id, boss)
            })
            .collect();
        Self { by_key }
    }

    /// Boss for a victim id. Non-numeric ids and `0` never match.
    #[must_use]
    pub fn lookup(&self, victim_id: &str) -> Option<&'a BossSnapshot> {
        let id = victim_id.parse::<i64>().ok().filter(|&id| id != 0)?;
        self.by_key.get(&id).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Boss type names keyed by name hash.
///
/// Hashes compare after rounding to the nearest `f64`, so exact and
/// float-rounded payload values both match.
const BOSS_TYPE_NAMES: [(f64, &str); 5] = [
    (12_946_736_302_082_734_000.0, "Guardian"),
    (1_942_975_293_714_691_300.0, "Walker"),
    (13_296_896_848_213_166_000.0, "Base Guardian"),
    (8_292_725_763_874_089_000.0, "Shrine"),
    (7_814_756_300_278_694_000.0, "Patron"),
];

#[expect(clippy::cast_precision_loss)]
fn boss_type_name(hash: u64) -> Option<&'static str> {
    let rounded = (hash as f64).to_bits();
    BOSS_TYPE_NAMES
        .iter()
        .find(|(key, _)| key.to_bits() == rounded)
        .map(|&(_, name)| name)
}

/// Human-readable boss name, e.g. `"Guardian - Lane 3"` or `"Shrine (118)"`.
#[must_use]
pub fn boss_display_name(boss: &BossSnapshot) -> String {
    let type_name = boss_type_name(boss.boss_name_hash);
    let mut name = type_name.map_or_else(
        || format!("Boss #{}", boss.boss_name_hash),
        str::to_owned,
    );

    if boss.lane > 0 {
        name.push_str(&format!(" - Lane {}", boss.lane));
    }
    if matches!(type_name, Some("Base Guardian" | "Shrine")) {
        name.push_str(&format!(" ({})", boss.entity_index));
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::fixtures::boss;

    #[test]
    fn test_lookup_rejects_zero_and_junk() {
        let bosses = [boss(42, 21, 3, 1)];
        let index = BossIndex::new(&bosses, BossKey::EntityIndex);
        assert!(index.lookup("42").is_some());
        assert!(index.lookup("0").is_none());
        assert!(index.lookup("forty-two").is_none());
        assert!(index.lookup("").is_none());
    }

    #[test]
    fn test_custom_id_key_collapses_instances() {
        let bosses = [boss(42, 21, 3, 1), boss(43, 21, 3, 2)];
        let index = BossIndex::new(&bosses, BossKey::CustomId);
        assert_eq!(index.lookup("21").unwrap().entity_index, 43);
    }

    #[test]
    fn test_display_names() {
        let mut guardian = boss(42, 21, 3, 3);
        guardian.boss_name_hash = 12_946_736_302_082_734_000;
        assert_eq!(boss_display_name(&guardian), "Guardian - Lane 3");

        let mut shrine = boss(118, 27, 2, 0);
        shrine.boss_name_hash = 8_292_725_763_874_089_000;
        assert_eq!(boss_display_name(&shrine), "Shrine (118)");

        let unknown = boss(5, 1, 2, 0);
        assert_eq!(boss_display_name(&unknown), "Boss #1");
    }
}

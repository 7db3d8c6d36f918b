use std::collections::HashMap;

use replaylens_model::PlayerMatchData;

use super::TickRange;

/// Per-victim damage sums in first-seen order.
///
/// Victims are visited tick by tick. Within a tick, integer ids come first in
/// numeric order and the remaining ids follow by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VictimTotals {
    order: Vec<String>,
    index: HashMap<String, usize>,
    damage: Vec<i64>,
}

impl VictimTotals {
    /// Adds `damage` to `victim`, registering it on first sight.
    pub fn add(&mut self, victim: &str, damage: i64) {
        if let Some(&i) = self.index.get(victim) {
            self.damage[i] += damage;
            return;
        }
        self.index.insert(victim.to_owned(), self.order.len());
        self.order.push(victim.to_owned());
        self.damage.push(damage);
    }

    /// Folds `data`'s log over `range` into these totals.
    ///
    /// Records with non-positive damage are ignored; a victim whose tick sum is
    /// zero is not registered. `filter` restricts which victim ids are counted.
    pub fn accumulate<F>(&mut self, data: &PlayerMatchData, range: TickRange, filter: F)
    where
        F: Fn(&str) -> bool,
    {
        for tick in range.clip(data.damage.len()) {
            let Some(victims) = data.damage_at(tick) else {
                continue;
            };
            let mut victims: Vec<_> = victims.iter().collect();
            victims.sort_by(|(a, _), (b, _)| victim_order(a).cmp(&victim_order(b)));
            for (victim, records) in victims {
                if !filter(victim) {
                    continue;
                }
                let damage: i64 = records
                    .iter()
                    .map(|record| record.damage)
                    .filter(|&d| d > 0)
                    .sum();
                if damage > 0 {
                    self.add(victim, damage);
                }
            }
        }
    }

    #[must_use]
    pub fn get(&self, victim: &str) -> Option<i64> {
        self.index.get(victim).map(|&i| self.damage[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.order
            .iter()
            .map(String::as_str)
            .zip(self.damage.iter().copied())
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.damage.iter().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Sort key of a victim id within one tick.
fn victim_order(victim: &str) -> (bool, Option<u32>, &str) {
    let id = integer_id(victim);
    (id.is_none(), id, victim)
}

/// `victim` as a canonical decimal integer, rejecting signs and leading zeros.
fn integer_id(victim: &str) -> Option<u32> {
    if victim.starts_with('+') || (victim.len() > 1 && victim.starts_with('0')) {
        return None;
    }
    victim.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::fixtures::log;

    #[test]
    fn test_first_seen_order_across_ticks() {
        let data = log(&[&[("9", 1)], &[("10", 2), ("9", 3)]]);
        let mut totals = VictimTotals::default();
        totals.accumulate(&data, TickRange::new(0, 5), |_| true);
        let entries: Vec<_> = totals.iter().collect();
        assert_eq!(entries, [("9", 4), ("10", 2)]);
        assert_eq!(totals.total(), 6);
    }

    #[test]
    fn test_integer_ids_precede_names_within_a_tick() {
        let data = log(&[&[("neutrals", 1), ("10", 1), ("9", 1), ("007", 1)]]);
        let mut totals = VictimTotals::default();
        totals.accumulate(&data, TickRange::new(0, 0), |_| true);
        let ids: Vec<_> = totals.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["9", "10", "007", "neutrals"]);
    }

    #[test]
    fn test_filter_and_sign() {
        let data = log(&[&[("1", 5), ("2", 7), ("3", -1)]]);
        let mut totals = VictimTotals::default();
        totals.accumulate(&data, TickRange::new(0, 0), |victim| victim != "2");
        assert_eq!(totals.get("1"), Some(5));
        assert_eq!(totals.get("2"), None);
        assert_eq!(totals.get("3"), None);
        assert_eq!(totals.len(), 1);
    }
}

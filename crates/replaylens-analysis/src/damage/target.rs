use derive_more::IsVariant;
use serde::Serialize;

/// Category of a damage victim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IsVariant, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Player,
    Boss,
    LaneCreeps,
    NeutralCreeps,
}

/// One row of a damage distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DamageTarget {
    /// Victim id, boss unique key, or a bucket name.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TargetKind,
    pub damage: i64,
    /// Share of the distribution total, in `[0, 100]`.
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boss_name_hash: Option<u64>,
}

impl DamageTarget {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: TargetKind,
        damage: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            damage,
            percentage: 0.0,
            team: None,
            hero_image: None,
            boss_name_hash: None,
        }
    }
}

/// Damage targets sorted by damage, with their total.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DamageDistribution {
    pub total_damage: i64,
    pub targets: Vec<DamageTarget>,
}

impl DamageDistribution {
    /// Sorts `targets` and fills in percentages.
    #[must_use]
    pub fn from_targets(mut targets: Vec<DamageTarget>) -> Self {
        let total_damage =
            sort_and_percent(&mut targets, |t| t.damage, |t, pct| t.percentage = pct);

        Self {
            total_damage,
            targets,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Stable descending sort by `damage`, then assigns each item its share.
///
/// Returns the total. With a zero total every share is `0`.
pub(crate) fn sort_and_percent<T, D, P>(items: &mut [T], damage: D, mut set_percentage: P) -> i64
where
    D: Fn(&T) -> i64,
    P: FnMut(&mut T, f64),
{
    items.sort_by_key(|item| std::cmp::Reverse(damage(item)));
    let total: i64 = items.iter().map(&damage).sum();
    for item in items.iter_mut() {
        let pct = percentage(damage(item), total);
        set_percentage(item, pct);
    }
    total
}

#[expect(clippy::cast_precision_loss)]
pub(crate) fn percentage(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

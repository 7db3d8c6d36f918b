use replaylens_model::{MatchPaths, PlayerPath, Tick};

use crate::{NormalizedPoint, unit_ratio};

/// Axis-aligned coordinate envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Envelope {
    #[must_use]
    pub fn of_path(path: &PlayerPath) -> Self {
        Self {
            x_min: path.x_min,
            x_max: path.x_max,
            y_min: path.y_min,
            y_max: path.y_max,
        }
    }

    /// Whether every bound is finite and ordered.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite())
            && self.x_min <= self.x_max
            && self.y_min <= self.y_max
    }

    /// Smallest envelope covering every valid input.
    ///
    /// Returns `None` when no valid envelope is supplied.
    pub fn union<I>(envelopes: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        envelopes
            .into_iter()
            .filter(Self::is_valid)
            .reduce(|acc, e| Self {
                x_min: acc.x_min.min(e.x_min),
                x_max: acc.x_max.max(e.x_max),
                y_min: acc.y_min.min(e.y_min),
                y_max: acc.y_max.max(e.y_max),
            })
    }
}

/// Two-stage normalizer for raw path samples.
///
/// A raw sample is first placed inside the owning player's envelope
/// (`x_min + raw / x_resolution * (x_max - x_min)`), then normalized against
/// the union of all players' envelopes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathNormalizer {
    x_resolution: f64,
    y_resolution: f64,
    union: Envelope,
}

impl PathNormalizer {
    /// Builds a normalizer over `paths`. `None` when there is no valid projection.
    #[must_use]
    pub fn new(paths: &MatchPaths) -> Option<Self> {
        Self::with_envelopes(
            paths.x_resolution,
            paths.y_resolution,
            paths.paths.iter().map(Envelope::of_path),
        )
    }

    pub fn with_envelopes<I>(x_resolution: f64, y_resolution: f64, envelopes: I) -> Option<Self>
    where
        I: IntoIterator<Item = Envelope>,
    {
        let resolutions_ok = [x_resolution, y_resolution]
            .iter()
            .all(|r| r.is_finite() && *r > 0.0);
        if !resolutions_ok {
            return None;
        }
        let union = Envelope::union(envelopes)?;
        if union.x_max <= union.x_min || union.y_max <= union.y_min {
            return None;
        }
        Some(Self {
            x_resolution,
            y_resolution,
            union,
        })
    }

    #[must_use]
    pub fn union(&self) -> Envelope {
        self.union
    }

    /// Normalizes a raw `(x, y)` sample recorded against `envelope`.
    #[must_use]
    pub fn normalize(
        &self,
        envelope: &Envelope,
        raw_x: f64,
        raw_y: f64,
    ) -> Option<NormalizedPoint> {
        let world_x =
            envelope.x_min + (raw_x / self.x_resolution) * (envelope.x_max - envelope.x_min);
        let world_y =
            envelope.y_min + (raw_y / self.y_resolution) * (envelope.y_max - envelope.y_min);
        let x = unit_ratio(world_x, self.union.x_min, self.union.x_max)?;
        let y = unit_ratio(world_y, self.union.y_min, self.union.y_max)?;
        Some(NormalizedPoint { x, y })
    }

    /// Normalized position of `path` at `tick`, if it has a sample there.
    #[must_use]
    pub fn normalize_at(&self, path: &PlayerPath, tick: Tick) -> Option<NormalizedPoint> {
        let (raw_x, raw_y) = path.raw_position(tick)?;
        self.normalize(&Envelope::of_path(path), raw_x, raw_y)
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;
    use crate::MinimapProjection;

    const EPS: f64 = 1e-9;

    fn env(x_min: f64, x_max: f64) -> Envelope {
        Envelope {
            x_min,
            x_max,
            y_min: 0.0,
            y_max: 100.0,
        }
    }

    #[test]
    fn test_union_of_nothing_is_none() {
        assert_eq!(Envelope::union(Vec::new()), None);
        let inverted = env(10.0, 0.0);
        assert_eq!(Envelope::union([inverted]), None);
    }

    #[test]
    fn test_union_skips_invalid_envelopes() {
        let envelopes = [env(0.0, 100.0), env(f64::NAN, 1.0), env(50.0, 150.0)];
        let union = Envelope::union(envelopes).unwrap();
        assert_eq!(union, env(0.0, 150.0));
    }

    #[test]
    fn test_same_raw_sample_maps_through_its_own_envelope() {
        let a = env(0.0, 100.0);
        let b = env(50.0, 150.0);
        let normalizer = PathNormalizer::with_envelopes(1000.0, 1000.0, [a, b]).unwrap();

        let pa = normalizer.normalize(&a, 500.0, 500.0).unwrap();
        let pb = normalizer.normalize(&b, 500.0, 500.0).unwrap();
        assert!((pa.x - 50.0 / 150.0).abs() < EPS);
        assert!((pb.x - 100.0 / 150.0).abs() < EPS);

        let projection = MinimapProjection::PATHS;
        assert_ne!(projection.project(pa), projection.project(pb));
    }

    #[test]
    fn test_envelope_bounds_map_to_unit_edges() {
        let a = env(0.0, 100.0);
        let b = env(20.0, 100.0);
        let normalizer = PathNormalizer::with_envelopes(1000.0, 1000.0, [a, b]).unwrap();

        let low = normalizer.normalize(&a, 0.0, 0.0).unwrap();
        let high = normalizer.normalize(&a, 1000.0, 1000.0).unwrap();
        assert!(low.x.abs() < EPS);
        assert!((high.x - 1.0).abs() < EPS);

        // b's minimum sits inside the union, shifted by its offset
        let shifted = normalizer.normalize(&b, 0.0, 0.0).unwrap();
        assert!((shifted.x - 0.2).abs() < EPS);
    }

    #[test]
    fn test_degenerate_union_has_no_projection() {
        let flat = Envelope {
            x_min: 5.0,
            x_max: 5.0,
            y_min: 0.0,
            y_max: 1.0,
        };
        assert!(PathNormalizer::with_envelopes(1000.0, 1000.0, [flat]).is_none());
        assert!(PathNormalizer::with_envelopes(0.0, 1000.0, [env(0.0, 1.0)]).is_none());
    }

    #[test]
    fn test_samples_inside_envelope_stay_in_unit_square() {
        let mut rng = Pcg32::seed_from_u64(7);
        let envelopes: Vec<Envelope> = (0..10)
            .map(|_| {
                let x_min = rng.random_range(-8000.0..0.0);
                let y_min = rng.random_range(-8000.0..0.0);
                Envelope {
                    x_min,
                    x_max: x_min + rng.random_range(1.0..8000.0),
                    y_min,
                    y_max: y_min + rng.random_range(1.0..8000.0),
                }
            })
            .collect();
        let normalizer = PathNormalizer::with_envelopes(16383.0, 16383.0, envelopes.clone())
            .unwrap();

        for envelope in &envelopes {
            for _ in 0..50 {
                let raw_x = rng.random_range(0.0..=16383.0);
                let raw_y = rng.random_range(0.0..=16383.0);
                let p = normalizer.normalize(envelope, raw_x, raw_y).unwrap();
                assert!((-EPS..=1.0 + EPS).contains(&p.x), "{p:?}");
                assert!((-EPS..=1.0 + EPS).contains(&p.y), "{p:?}");
            }
        }
    }
}

use crate::{NormalizedPoint, unit_ratio};

/// Fixed world bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min: f64,
    pub max: f64,
}

/// Playable area of the map in world units.
pub const WORLD_BOUNDS: WorldBounds = WorldBounds {
    min: -10752.0,
    max: 10752.0,
};

impl WorldBounds {
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Maps world `(x, y)` into minimap space. World Y grows upward, minimap Y downward.
    #[must_use]
    pub fn normalize(&self, x: f64, y: f64) -> Option<NormalizedPoint> {
        let nx = unit_ratio(x, self.min, self.max)?;
        let ny = unit_ratio(y, self.min, self.max)?;
        Some(NormalizedPoint { x: nx, y: 1.0 - ny })
    }

    /// Fraction of the span covered by `y`, without inversion.
    #[must_use]
    pub fn normalized_y(&self, y: f64) -> Option<f64> {
        unit_ratio(y, self.min, self.max)
    }
}

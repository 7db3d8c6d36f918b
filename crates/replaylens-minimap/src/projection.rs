use serde::Serialize;

use crate::NormalizedPoint;

/// Edge length of the minimap in pixels.
pub const MINIMAP_SIZE: f64 = 768.0;

/// Top-left pixel offset of a marker on the minimap.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PixelPosition {
    pub left: f64,
    pub top: f64,
}

/// Projects normalized points to pixels.
///
/// `left = x * size + x_offset`; `top = y * size`, or `(1 - y) * size` with
/// `invert_y`. The offset compensates for the minimap artwork not being
/// centred on the world origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapProjection {
    pub size: f64,
    pub x_offset: f64,
    pub invert_y: bool,
}

impl Default for MinimapProjection {
    fn default() -> Self {
        Self::WORLD
    }
}

impl MinimapProjection {
    /// Preset for fixed world-bounds positions.
    pub const WORLD: Self = Self {
        size: MINIMAP_SIZE,
        x_offset: -10.0,
        invert_y: false,
    };

    /// Preset for envelope-normalized path samples, whose Y axis points up.
    pub const PATHS: Self = Self {
        size: MINIMAP_SIZE,
        x_offset: 0.0,
        invert_y: true,
    };

    #[must_use]
    pub fn with_size(self, size: f64) -> Self {
        Self { size, ..self }
    }

    #[must_use]
    pub fn with_x_offset(self, x_offset: f64) -> Self {
        Self { x_offset, ..self }
    }

    #[must_use]
    pub fn project(&self, point: NormalizedPoint) -> PixelPosition {
        let y = if self.invert_y { 1.0 - point.y } else { point.y };
        PixelPosition {
            left: point.x * self.size + self.x_offset,
            top: y * self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_preset_applies_offset() {
        let pixel = MinimapProjection::WORLD.project(NormalizedPoint::new(0.0, 0.25));
        assert_eq!((pixel.left, pixel.top), (-10.0, 192.0));
    }

    #[test]
    fn test_paths_preset_inverts_y() {
        let pixel = MinimapProjection::PATHS.project(NormalizedPoint::new(1.0, 0.25));
        assert_eq!((pixel.left, pixel.top), (768.0, 576.0));
    }

    #[test]
    fn test_custom_offset_and_size() {
        let projection = MinimapProjection::PATHS
            .with_size(100.0)
            .with_x_offset(-75.0);
        let pixel = projection.project(NormalizedPoint::new(0.5, 0.5));
        assert_eq!((pixel.left, pixel.top), (-25.0, 50.0));

    }
}

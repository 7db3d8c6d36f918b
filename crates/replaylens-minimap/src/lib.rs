//! Minimap geometry: coordinate normalization, pixel projection and regions.
//!
//! Positions reach the minimap through one of two normalizers, both producing a
//! [`NormalizedPoint`] in `[0, 1]²` with the origin at the top-left corner:
//!
//! - [`PathNormalizer`] maps raw path samples through the owning player's
//!   [`Envelope`] and then re-normalizes against the union envelope of all
//!   players in the match.
//! - [`WorldBounds`] maps world coordinates against a fixed square
//!   ([`WORLD_BOUNDS`]), inverting the Y axis.
//!
//! A [`MinimapProjection`] then turns the normalized point into a
//! [`PixelPosition`]. Degenerate input (zero-width bounds, non-finite values)
//! yields `None` rather than NaN or a panic, so renderers skip it like any
//! other absent sample.
//!
//! [`Region`]s are static polygons in normalized space; [`classify`] lists the
//! labels of every region containing a point.
//!
//! # Examples
//!
//! ```
//! use replaylens_minimap::{MinimapProjection, WORLD_BOUNDS};
//!
//! let point = WORLD_BOUNDS.normalize(0.0, 0.0).unwrap();
//! let pixel = MinimapProjection::WORLD.project(point);
//! assert_eq!(pixel.left, 374.0);
//! assert_eq!(pixel.top, 384.0);
//! ```

pub use self::{
    envelope::{Envelope, PathNormalizer},
    map::{MAP_REGIONS, MID_BOSS_MARKER, OBJECTIVE_MARKERS, ObjectiveMarker, objective_marker},
    projection::{MINIMAP_SIZE, MinimapProjection, PixelPosition},
    region::{Region, classify},
    world::{WORLD_BOUNDS, WorldBounds},
};

mod envelope;
mod map;
mod projection;
mod region;
mod world;

/// Position in minimap space. `(0, 0)` is the top-left corner, `(1, 1)` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// `(value - min) / (max - min)`, or `None` when the span is empty or anything is non-finite.
fn unit_ratio(value: f64, min: f64, max: f64) -> Option<f64> {
    let span = max - min;
    if !(value.is_finite() && min.is_finite() && span.is_finite()) || span <= 0.0 {
        return None;
    }
    Some((value - min) / span)
}

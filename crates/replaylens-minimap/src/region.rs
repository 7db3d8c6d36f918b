use std::borrow::Cow;

use crate::NormalizedPoint;

/// Named simple polygon in normalized minimap space.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub label: Cow<'static, str>,
    /// Ordered `[x, y]` vertices.
    pub polygon: Cow<'static, [[f64; 2]]>,
}

impl Region {
    #[must_use]
    pub const fn from_static(label: &'static str, polygon: &'static [[f64; 2]]) -> Self {
        Self {
            label: Cow::Borrowed(label),
            polygon: Cow::Borrowed(polygon),
        }
    }

    #[must_use]
    pub fn new(label: impl Into<String>, polygon: Vec<[f64; 2]>) -> Self {
        Self {
            label: Cow::Owned(label.into()),
            polygon: Cow::Owned(polygon),
        }
    }

    /// Crossing-number point-in-polygon test.
    ///
    /// Points on an edge may land on either side. Polygons with fewer than three
    /// vertices contain nothing.
    #[must_use]
    pub fn contains(&self, point: NormalizedPoint) -> bool {
        let polygon = &*self.polygon;
        if polygon.len() < 3 {
            return false;
        }
        let NormalizedPoint { x, y } = point;
        let mut inside = false;
        let mut prev = polygon[polygon.len() - 1];
        for &vertex in polygon {
            let [xi, yi] = vertex;
            let [xj, yj] = prev;
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            prev = vertex;
        }
        inside
    }

    /// Vertex average, used as the label anchor.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn centroid(&self) -> Option<NormalizedPoint> {
        if self.polygon.is_empty() {
            return None;
        }
        let n = self.polygon.len() as f64;
        let (sx, sy) = self
            .polygon
            .iter()
            .fold((0.0, 0.0), |(sx, sy), [x, y]| (sx + x, sy + y));
        Some(NormalizedPoint {
        x: sx / n,
        y: sy / n,
    })

    }
}

/// Labels of every region containing `point`, in region order.
pub fn classify(point: NormalizedPoint, regions: &[Region]) -> impl Iterator<Item = &str> {
    regions
        .iter()
        .filter(move |region| region.contains(point))
        .map(|region| &*region.label)
}

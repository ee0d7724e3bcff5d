//! Bin geometry and 2D bounding boxes
//!
//! Polygon shapes are supplied by the caller through [`BinGeometry`]. The
//! profile only needs a containment test and a bounding box to register the
//! bin in the lookup grid.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Shape of a profile bin
pub trait BinGeometry: Debug + Send + Sync {
    /// Whether the point lies inside the bin
    fn contains(&self, x: f64, y: f64) -> bool;

    /// Axis-aligned box enclosing the bin
    fn bounding_box(&self) -> BoundingBox;
}

/// A closed 2D axis-aligned box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// Create a box from two opposite corners, in any order
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x_min: x1.min(x2),
            y_min: y1.min(y2),
            x_max: x1.max(x2),
            y_max: y1.max(y2),
        }
    }

    /// Create an empty (invalid) box
    pub fn empty() -> Self {
        Self {
            x_min: f64::INFINITY,
            y_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_max: f64::NEG_INFINITY,
        }
    }

    /// Smallest box enclosing all points
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let mut bbox = Self::empty();
        for &point in points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }

    /// Expand to include a point
    pub fn expand_to_include(&mut self, (x, y): (f64, f64)) {
        self.x_min = self.x_min.min(x);
        self.y_min = self.y_min.min(y);
        self.x_max = self.x_max.max(x);
        self.y_max = self.y_max.max(y);
    }

    /// Check if a point is contained, edges included
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// Check if this box intersects another
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x_min <= other.x_max
            && self.x_max >= other.x_min
            && self.y_min <= other.y_max
            && self.y_max >= other.y_min
    }

    pub fn area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }
}

/// Rectangular bins
impl BinGeometry for BoundingBox {
    fn contains(&self, x: f64, y: f64) -> bool {
        self.contains_point(x, y)
    }

    fn bounding_box(&self) -> BoundingBox {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_basics() {
        let bbox = BoundingBox::new(10.0, 0.0, 0.0, 5.0);

        assert_eq!(bbox.x_min, 0.0);
        assert_eq!(bbox.x_max, 10.0);
        assert!(bbox.contains_point(5.0, 5.0));
        assert!(!bbox.contains_point(15.0, 2.0));
        assert_eq!(bbox.area(), 50.0);
    }

    #[test]
    fn test_bounding_box_from_points() {
        let bbox = BoundingBox::from_points(&[(1.0, 4.0), (-2.0, 0.5), (3.0, 2.0)]);

        assert_eq!(bbox, BoundingBox::new(-2.0, 0.5, 3.0, 4.0));
        assert!(BoundingBox::from_points(&[]).is_empty());
        assert_eq!(BoundingBox::empty().area(), 0.0);
    }

    #[test]
    fn test_bounding_box_intersects() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        let c = BoundingBox::new(20.0, 20.0, 30.0, 30.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_rectangle_geometry() {
        let rect = BoundingBox::new(0.0, 0.0, 2.0, 1.0);
        let geometry: &dyn BinGeometry = &rect;

        assert!(geometry.contains(2.0, 1.0));
        assert!(!geometry.contains(2.0, 1.5));
        assert_eq!(geometry.bounding_box(), rect);
    }
}

//! Bounding box type used by the extent-based loading strategy.

use serde::{Deserialize, Serialize};

use crate::error::HeatmapError;

/// A geographic bounding box in EPSG:4326 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The whole world, for sources that load everything at once.
    pub fn world() -> Self {
        Self::new(-180.0, -90.0, 180.0, 90.0)
    }

    /// Parse from "minx,miny,maxx,maxy".
    pub fn parse(s: &str) -> Result<Self, HeatmapError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(HeatmapError::InvalidBbox(format!(
                "{}: expected 'minx,miny,maxx,maxy'",
                s
            )));
        }

        let mut coords = [0.0f64; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| HeatmapError::InvalidBbox(format!("bad number: {}", part)))?;
        }

        let bbox = Self::new(coords[0], coords[1], coords[2], coords[3]);
        if bbox.width() < 0.0 || bbox.height() < 0.0 {
            return Err(HeatmapError::InvalidBbox(format!(
                "{}: min exceeds max",
                s
            )));
        }
        Ok(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether `other` lies entirely inside this box. Used to skip
    /// re-fetching extents already covered by an earlier load.
    pub fn covers(&self, other: &BoundingBox) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// WFS query fragment: "minx,miny,maxx,maxy,EPSG:4326".
    pub fn to_wfs_param(&self) -> String {
        format!(
            "{},{},{},{},EPSG:4326",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let bbox = BoundingBox::parse("16.0,40.0,18.5,42.0").unwrap();
        assert_eq!(bbox.min_x, 16.0);
        assert_eq!(bbox.max_y, 42.0);
        assert_eq!(bbox.to_wfs_param(), "16,40,18.5,42,EPSG:4326");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(BoundingBox::parse("1,2,3").is_err());
        assert!(BoundingBox::parse("a,b,c,d").is_err());
        assert!(BoundingBox::parse("3,0,1,2").is_err());
    }

    #[test]
    fn test_covers() {
        let outer = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let inner = BoundingBox::new(2.0, 2.0, 8.0, 8.0);
        let overlapping = BoundingBox::new(5.0, 5.0, 15.0, 15.0);

        assert!(outer.covers(&inner));
        assert!(outer.covers(&outer));
        assert!(!outer.covers(&overlapping));
        assert!(!inner.covers(&outer));
    }

    #[test]
    fn test_intersects() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        let c = BoundingBox::new(20.0, 20.0, 30.0, 30.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}

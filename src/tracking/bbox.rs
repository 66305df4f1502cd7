use serde::Deserialize as _;

use crate::foundation::{
    core::{Affine, Point, Vec2},
    error::{TrackError, TrackResult},
};

/// One tracked rectangle, possibly rotated.
///
/// Geometry is center-based: `(cx, cy)` is the center, `width`/`height` the unrotated
/// extent. Units are whatever the tracker emitted (normalized `[0, 1]` frame coordinates
/// for the bundled codecs) and are never converted here.
///
/// `angle` is in degrees, clockwise-positive in y-down image space, rotating about the
/// center.
///
/// Every field set to `-1` ([`BBox::UNSET`]) is the "no data" marker returned by queries
/// against an empty track.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BBox {
    pub cx: f64,
    pub cy: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

#[derive(serde::Deserialize)]
struct BBoxPatch {
    cx: Option<f64>,
    cy: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    angle: Option<f64>,
}

impl BBox {
    /// Sentinel for "no sample".
    pub const UNSET: BBox = BBox {
        cx: -1.0,
        cy: -1.0,
        width: -1.0,
        height: -1.0,
        angle: -1.0,
    };

    pub fn new(cx: f64, cy: f64, width: f64, height: f64, angle: f64) -> Self {
        Self {
            cx,
            cy,
            width,
            height,
            angle,
        }
    }

    /// Build from top-left/bottom-right corners of an axis-aligned box.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64, angle: f64) -> Self {
        let width = x2 - x1;
        let height = y2 - y1;
        Self::new(x1 + width / 2.0, y1 + height / 2.0, width, height, angle)
    }

    pub fn is_unset(&self) -> bool {
        *self == Self::UNSET
    }

    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    /// Top-left corner of the unrotated box.
    pub fn x1(&self) -> f64 {
        self.cx - self.width / 2.0
    }

    pub fn y1(&self) -> f64 {
        self.cy - self.height / 2.0
    }

    /// Bottom-right corner of the unrotated box.
    pub fn x2(&self) -> f64 {
        self.cx + self.width / 2.0
    }

    pub fn y2(&self) -> f64 {
        self.cy + self.height / 2.0
    }

    /// Maps the unit square `[0,1]x[0,1]` onto this box, rotation included.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(Vec2::new(self.cx, self.cy))
            * Affine::rotate(self.angle.to_radians())
            * Affine::scale_non_uniform(self.width, self.height)
            * Affine::translate(Vec2::new(-0.5, -0.5))
    }

    /// Corners in order top-left, top-right, bottom-right, bottom-left (before rotation).
    pub fn corners(&self) -> [Point; 4] {
        let a = self.to_affine();
        [
            a * Point::new(0.0, 0.0),
            a * Point::new(1.0, 0.0),
            a * Point::new(1.0, 1.0),
            a * Point::new(0.0, 1.0),
        ]
    }

    pub fn json(&self) -> String {
        format!("{:#}", self.json_value())
    }

    pub fn json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cx": self.cx,
            "cy": self.cy,
            "width": self.width,
            "height": self.height,
            "angle": self.angle,
        })
    }

    /// Parse `value` and apply it with [`BBox::set_json_value`].
    pub fn set_json(&mut self, value: &str) -> TrackResult<()> {
        let root: serde_json::Value = serde_json::from_str(value)
            .map_err(|e| TrackError::invalid_json(format!("bbox: {e}")))?;
        self.set_json_value(&root)
    }

    /// Apply the keys present in `root`; missing or null keys keep their current value.
    pub fn set_json_value(&mut self, root: &serde_json::Value) -> TrackResult<()> {
        let patch = BBoxPatch::deserialize(root)
            .map_err(|e| TrackError::invalid_json(format!("bbox: {e}")))?;
        if let Some(v) = patch.cx {
            self.cx = v;
        }
        if let Some(v) = patch.cy {
            self.cy = v;
        }
        if let Some(v) = patch.width {
            self.width = v;
        }
        if let Some(v) = patch.height {
            self.height = v;
        }
        if let Some(v) = patch.angle {
            self.angle = v;
        }
        Ok(())
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::UNSET
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracking/bbox.rs"]
mod tests;

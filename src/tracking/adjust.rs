use crate::{animation::curve::Curve, foundation::core::FrameIndex, tracking::bbox::BBox};

/// The five user curves layered on top of the raw samples, in their JSON key order.
pub const CURVE_NAMES: [&str; 5] = ["delta_x", "delta_y", "scale_x", "scale_y", "rotation"];

/// Curve values evaluated at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AdjustmentValues {
    pub delta_x: f64,
    pub delta_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
}

impl AdjustmentValues {
    pub const IDENTITY: AdjustmentValues = AdjustmentValues {
        delta_x: 0.0,
        delta_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 0.0,
    };

    /// Compose onto `base` in a fixed order:
    ///
    /// 1. translate: `cx += delta_x`, `cy += delta_y`
    /// 2. scale about the (translated) center: `width *= scale_x`, `height *= scale_y`
    /// 3. rotate about the center: `angle += rotation`
    ///
    /// Scaling and rotating are center-anchored, so the translated center is final.
    pub fn apply(&self, base: BBox) -> BBox {
        let cx = base.cx + self.delta_x;
        let cy = base.cy + self.delta_y;
        let width = base.width * self.scale_x;
        let height = base.height * self.scale_y;
        let angle = base.angle + self.rotation;
        BBox::new(cx, cy, width, height, angle)
    }
}

/// Keyframed adjustments owned by a track. Defaults to identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Adjustments {
    /// X-direction displacement.
    pub delta_x: Curve,
    /// Y-direction displacement.
    pub delta_y: Curve,
    /// Width multiplier.
    pub scale_x: Curve,
    /// Height multiplier.
    pub scale_y: Curve,
    /// Rotation in degrees, added to the box angle.
    pub rotation: Curve,
}

impl Default for Adjustments {
    fn default() -> Self {
        let id = AdjustmentValues::IDENTITY;
        Self {
            delta_x: Curve::new(id.delta_x),
            delta_y: Curve::new(id.delta_y),
            scale_x: Curve::new(id.scale_x),
            scale_y: Curve::new(id.scale_y),
            rotation: Curve::new(id.rotation),
        }
    }
}

impl Adjustments {
    pub fn values(&self, frame: FrameIndex) -> AdjustmentValues {
        AdjustmentValues {
            delta_x: self.delta_x.evaluate(frame),
            delta_y: self.delta_y.evaluate(frame),
            scale_x: self.scale_x.evaluate(frame),
            scale_y: self.scale_y.evaluate(frame),
            rotation: self.rotation.evaluate(frame),
        }
    }

    /// Evaluate every curve at `frame` and compose onto `base`.
    pub fn apply(&self, base: BBox, frame: FrameIndex) -> BBox {
        self.values(frame).apply(base)
    }

    /// Look up a curve by its JSON key.
    pub fn curve(&self, name: &str) -> Option<&Curve> {
        match name {
            "delta_x" => Some(&self.delta_x),
            "delta_y" => Some(&self.delta_y),
            "scale_x" => Some(&self.scale_x),
            "scale_y" => Some(&self.scale_y),
            "rotation" => Some(&self.rotation),
            _ => None,
        }
    }

    pub fn curve_mut(&mut self, name: &str) -> Option<&mut Curve> {
        match name {
            "delta_x" => Some(&mut self.delta_x),
            "delta_y" => Some(&mut self.delta_y),
            "scale_x" => Some(&mut self.scale_x),
            "scale_y" => Some(&mut self.scale_y),
            "rotation" => Some(&mut self.rotation),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracking/adjust.rs"]
mod tests;

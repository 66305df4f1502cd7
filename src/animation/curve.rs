use crate::{animation::ease::Interpolation, foundation::core::FrameIndex};

/// A single user-defined keyframe on a [`Curve`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurvePoint {
    /// Frame the point sits on.
    pub frame: FrameIndex,
    /// Curve value at `frame`.
    pub value: f64,
    /// How the segment ending at this point is interpolated.
    #[serde(default)]
    pub interpolation: Interpolation,
}

impl CurvePoint {
    /// Point with the default (bezier) interpolation.
    pub fn new(frame: u64, value: f64) -> Self {
        Self {
            frame: FrameIndex(frame),
            value,
            interpolation: Interpolation::default(),
        }
    }

    /// Point with an explicit interpolation mode.
    pub fn with_interpolation(frame: u64, value: f64, interpolation: Interpolation) -> Self {
        Self {
            frame: FrameIndex(frame),
            value,
            interpolation,
        }
    }
}

/// Scalar animation track keyed by frame number.
///
/// With no points the curve evaluates to its `default` everywhere, which is how the
/// adjustment curves stay at identity until a user adds keyframes.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    points: Vec<CurvePoint>, // sorted by frame, unique frames
    default: f64,
}

impl Curve {
    /// Empty curve evaluating to `default`.
    pub fn new(default: f64) -> Self {
        Self {
            points: Vec::new(),
            default,
        }
    }

    /// Value returned when the curve has no points.
    pub fn default_value(&self) -> f64 {
        self.default
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Insert `point`, replacing any point already on the same frame.
    pub fn add_point(&mut self, point: CurvePoint) {
        match self.points.binary_search_by_key(&point.frame, |p| p.frame) {
            Ok(idx) => self.points[idx] = point,
            Err(idx) => self.points.insert(idx, point),
        }
    }

    /// Remove the point on `frame`; returns whether one existed.
    pub fn remove_point(&mut self, frame: FrameIndex) -> bool {
        match self.points.binary_search_by_key(&frame, |p| p.frame) {
            Ok(idx) => {
                self.points.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    /// True iff a point sits exactly on `frame`.
    pub fn contains(&self, frame: FrameIndex) -> bool {
        self.points
            .binary_search_by_key(&frame, |p| p.frame)
            .is_ok()
    }

    /// Replace all points. Input order does not matter; for duplicate frames the
    /// later entry wins.
    pub fn set_points(&mut self, points: impl IntoIterator<Item = CurvePoint>) {
        self.points.clear();
        for p in points {
            self.add_point(p);
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// The point at or after `frame`, falling back to the last point.
    pub fn closest_point(&self, frame: FrameIndex) -> Option<&CurvePoint> {
        let idx = self.points.partition_point(|p| p.frame < frame);
        self.points.get(idx).or_else(|| self.points.last())
    }

    /// Evaluate the curve at `frame`. Pure; holds the end values outside the keyed range.
    pub fn evaluate(&self, frame: FrameIndex) -> f64 {
        if self.points.is_empty() {
            return self.default;
        }

        let f = frame.0;
        let idx = self.points.partition_point(|p| p.frame.0 <= f);
        if idx == 0 {
            return self.points[0].value;
        }
        if idx >= self.points.len() {
            return self.points[self.points.len() - 1].value;
        }

        let a = &self.points[idx - 1];
        let b = &self.points[idx];
        if a.frame.0 == f {
            return a.value;
        }
        let denom = b.frame.0 - a.frame.0;
        let t = ((f - a.frame.0) as f64) / (denom as f64);
        let te = b.interpolation.apply(t);
        a.value + (b.value - a.value) * te
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;

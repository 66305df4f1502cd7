use crate::tracking::{bbox::BBox, timeline::Bracket};

/// Linearly interpolate every geometric field of `left` (at `t1`) and `right` (at `t2`)
/// at `target`.
///
/// `angle` takes the raw numeric path: going from 350 to 10 degrees sweeps back through
/// 180 rather than across 0. A zero-length interval returns `left`.
pub fn interpolate_boxes(t1: f64, t2: f64, left: BBox, right: BBox, target: f64) -> BBox {
    let span = t2 - t1;
    if span == 0.0 {
        return left;
    }
    let f = (target - t1) / span;
    let lerp = |a: f64, b: f64| a + f * (b - a);
    BBox {
        cx: lerp(left.cx, right.cx),
        cy: lerp(left.cy, right.cy),
        width: lerp(left.width, right.width),
        height: lerp(left.height, right.height),
        angle: lerp(left.angle, right.angle),
    }
}

/// Base box for `target` before adjustments; `None` when there are no samples.
pub(crate) fn resolve_bracket(bracket: Bracket, target: f64) -> Option<BBox> {
    match bracket {
        Bracket::Empty => None,
        Bracket::Exact(b) | Bracket::Clamped(b) => Some(b),
        Bracket::Between {
            t1,
            left,
            t2,
            right,
        } => Some(interpolate_boxes(t1, t2, left, right, target)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracking/interpolate.rs"]
mod tests;

//! Time-indexed bounding-box tracks for Wavyte.
//!
//! A [`BoxTrack`] holds the trajectory of a (possibly rotated) rectangular region across a
//! clip and answers "what is the box at frame N?":
//!
//! 1. **Map**: clip frame -> sample time via the recorded base rate and the track's time
//!    scale ([`frame_to_time`]).
//! 2. **Look up**: exact sample, or the bracketing pair in the [`BoxTimeline`].
//! 3. **Interpolate**: field-wise linear blend between the pair ([`interpolate_boxes`]),
//!    holding the end samples outside the recorded range.
//! 4. **Adjust**: evaluate the five user [`Curve`]s at the frame and compose them onto the
//!    base box (translate, then scale, then rotate).
//!
//! Raw samples come from object-tracker output through a [`TrackerCodec`]; track metadata
//! (rates, visibility, curves) persists as JSON. Queries are pure and safe to run from many
//! threads at once; see [`SharedBoxTrack`] for a lock-guarded handle.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod tracking;

pub use animation::curve::{Curve, CurvePoint};
pub use animation::ease::Interpolation;
pub use foundation::core::{Affine, Fps, FrameIndex, FrameRange, Point, Vec2};
pub use foundation::error::{TrackError, TrackResult};
pub use tracking::adjust::{AdjustmentValues, Adjustments, CURVE_NAMES};
pub use tracking::bbox::BBox;
pub use tracking::codec::{BoxRecord, JsonLinesCodec, RecordIter, TrackerCodec, TrackerFramesCodec};
pub use tracking::interpolate::interpolate_boxes;
pub use tracking::properties::{BoxValues, Property, PropertyChoice, PropertyKind, PropertySheet};
pub use tracking::shared::SharedBoxTrack;
pub use tracking::timeline::{BoxTimeline, Bracket, TimeKey, frame_to_time, time_to_frame};
pub use tracking::track::BoxTrack;

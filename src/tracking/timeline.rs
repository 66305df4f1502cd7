use std::collections::BTreeMap;

use crate::{
    foundation::core::{Fps, FrameIndex},
    foundation::error::{TrackError, TrackResult},
    tracking::bbox::BBox,
};

/// Convert a frame number into the time coordinate used as [`BoxTimeline`] keys:
/// `frame / fps * time_scale`, in seconds.
///
/// Fails with [`TrackError::InvalidState`] for a zero-term `fps` or a time scale that is
/// not finite and positive.
pub fn frame_to_time(fps: Fps, frame: FrameIndex, time_scale: f64) -> TrackResult<f64> {
    fps.validate()?;
    validate_time_scale(time_scale)?;
    Ok(fps.frames_to_secs(frame.0) * time_scale)
}

/// Inverse of [`frame_to_time`]. The result is fractional when `time` falls between frames.
pub fn time_to_frame(fps: Fps, time: f64, time_scale: f64) -> TrackResult<f64> {
    fps.validate()?;
    validate_time_scale(time_scale)?;
    Ok(time / time_scale * fps.as_f64())
}

pub(crate) fn validate_time_scale(time_scale: f64) -> TrackResult<()> {
    if !time_scale.is_finite() || time_scale <= 0.0 {
        return Err(TrackError::invalid_state(format!(
            "time scale must be finite and > 0, got {time_scale}"
        )));
    }
    Ok(())
}

/// Totally ordered `f64` time key.
#[derive(Clone, Copy, Debug)]
pub struct TimeKey(f64);

impl TimeKey {
    pub fn new(t: f64) -> Self {
        // -0.0 and 0.0 must land on the same key.
        Self(t + 0.0)
    }

    pub fn secs(self) -> f64 {
        self.0
    }
}

impl PartialEq for TimeKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for TimeKey {}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Where a target time falls relative to the stored samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bracket {
    /// No samples at all.
    Empty,
    /// A sample sits exactly on the target.
    Exact(BBox),
    /// Target is before the first or after the last sample; holds that sample.
    Clamped(BBox),
    /// Target lies strictly between two samples.
    Between {
        t1: f64,
        left: BBox,
        t2: f64,
        right: BBox,
    },
}

/// Raw tracker samples ordered by time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoxTimeline {
    samples: BTreeMap<TimeKey, BBox>,
}

impl BoxTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the sample at `time`. Returns the replaced sample, if any.
    pub fn insert(&mut self, time: f64, bbox: BBox) -> Option<BBox> {
        self.samples.insert(TimeKey::new(time), bbox)
    }

    pub fn remove(&mut self, time: f64) -> Option<BBox> {
        self.samples.remove(&TimeKey::new(time))
    }

    pub fn get(&self, time: f64) -> Option<&BBox> {
        self.samples.get(&TimeKey::new(time))
    }

    pub fn contains(&self, time: f64) -> bool {
        self.samples.contains_key(&TimeKey::new(time))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &BBox)> {
        self.samples.iter().map(|(k, v)| (k.secs(), v))
    }

    /// Time span covered by samples, `None` when empty.
    pub fn span(&self) -> Option<(f64, f64)> {
        let first = self.samples.first_key_value()?.0.secs();
        let last = self.samples.last_key_value()?.0.secs();
        Some((first, last))
    }

    /// Nearest sample at or before `time`.
    pub fn at_or_before(&self, time: f64) -> Option<(f64, &BBox)> {
        self.samples
            .range(..=TimeKey::new(time))
            .next_back()
            .map(|(k, v)| (k.secs(), v))
    }

    /// Nearest sample at or after `time`.
    pub fn at_or_after(&self, time: f64) -> Option<(f64, &BBox)> {
        self.samples
            .range(TimeKey::new(time)..)
            .next()
            .map(|(k, v)| (k.secs(), v))
    }

    /// Classify `time` against the stored samples. `O(log n)`.
    pub fn bracket(&self, time: f64) -> Bracket {
        if let Some(b) = self.get(time) {
            return Bracket::Exact(*b);
        }
        match (self.at_or_before(time), self.at_or_after(time)) {
            (None, None) => Bracket::Empty,
            (Some((_, b)), None) | (None, Some((_, b))) => Bracket::Clamped(*b),
            (Some((t1, left)), Some((t2, right))) => Bracket::Between {
                t1,
                left: *left,
                t2,
                right: *right,
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracking/timeline.rs"]
mod tests;

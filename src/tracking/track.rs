use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    animation::curve::CurvePoint,
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{TrackError, TrackResult},
    tracking::{
        adjust::Adjustments,
        bbox::BBox,
        codec::{BoxRecord, TrackerCodec},
        interpolate::resolve_bracket,
        timeline::{self, BoxTimeline},
    },
};

/// A tracked region over a clip's timeline.
///
/// Raw tracker samples live in a [`BoxTimeline`] keyed by *recorded* time
/// (`frame / base_fps`). Queries map the requested frame through `time_scale` first, so
/// rescaling a clip re-times the samples without rewriting them. The five
/// [`Adjustments`] curves are keyed by clip frame and applied on every query; they are
/// never baked into stored samples.
///
/// Reads take `&self` and may run concurrently; mutation needs `&mut self` (see
/// [`crate::SharedBoxTrack`] for a lock-guarded handle).
#[derive(Clone, Debug, PartialEq)]
pub struct BoxTrack {
    id: String,
    visible: bool,
    base_fps: Fps, // validated on every write
    time_scale: f64,
    data_path: Option<PathBuf>,
    samples: BoxTimeline,
    /// User adjustment curves.
    pub adjustments: Adjustments,
}

impl Default for BoxTrack {
    fn default() -> Self {
        Self {
            id: String::new(),
            visible: true,
            base_fps: Fps::default(),
            time_scale: 1.0,
            data_path: None,
            samples: BoxTimeline::new(),
            adjustments: Adjustments::default(),
        }
    }
}

#[derive(Deserialize)]
struct FpsPatch {
    num: Option<u32>,
    den: Option<u32>,
}

impl BoxTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_fps(base_fps: Fps) -> TrackResult<Self> {
        let mut track = Self::default();
        track.set_base_fps(base_fps)?;
        Ok(track)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Whether the region should be treated as present. Independent of stored samples.
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Tracker file the samples were last loaded from.
    pub fn data_path(&self) -> Option<&Path> {
        self.data_path.as_deref()
    }

    pub fn base_fps(&self) -> Fps {
        self.base_fps
    }

    /// Frame rate the raw samples were recorded at. Rejects zero terms.
    pub fn set_base_fps(&mut self, fps: Fps) -> TrackResult<()> {
        fps.validate()?;
        self.base_fps = fps;
        Ok(())
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Re-time queries against the recorded samples, e.g. after the owning clip's playback
    /// rate changed. Must be finite and positive.
    pub fn set_time_scale(&mut self, time_scale: f64) -> TrackResult<()> {
        timeline::validate_time_scale(time_scale)?;
        self.time_scale = time_scale;
        Ok(())
    }

    /// Time coordinate of `frame` at this track's base rate and the given scale.
    pub fn frame_to_time(&self, frame: FrameIndex, time_scale: f64) -> TrackResult<f64> {
        timeline::frame_to_time(self.base_fps, frame, time_scale)
    }

    fn recorded_time(&self, frame: FrameIndex) -> f64 {
        self.base_fps.frames_to_secs(frame.0)
    }

    /// Insert the sample for `frame`, replacing any sample already recorded there.
    pub fn add_box(
        &mut self,
        frame: FrameIndex,
        cx: f64,
        cy: f64,
        width: f64,
        height: f64,
        angle: f64,
    ) {
        self.add_bbox(frame, BBox::new(cx, cy, width, height, angle));
    }

    pub fn add_bbox(&mut self, frame: FrameIndex, bbox: BBox) {
        let t = self.recorded_time(frame);
        self.samples.insert(t, bbox);
    }

    /// Remove the sample recorded for `frame`; no-op when there is none.
    pub fn remove_box(&mut self, frame: FrameIndex) {
        let t = self.recorded_time(frame);
        self.samples.remove(t);
    }

    /// True iff a sample was recorded exactly for `frame`. Interpolatable gaps don't count.
    pub fn contains(&self, frame: FrameIndex) -> bool {
        self.samples.contains(self.recorded_time(frame))
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop every sample. Curves, base fps and time scale are untouched.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn samples(&self) -> &BoxTimeline {
        &self.samples
    }

    /// Interpolated sample for `frame` before adjustments, `None` for an empty track.
    pub fn base_box(&self, frame: FrameIndex) -> Option<BBox> {
        let target = match self.frame_to_time(frame, self.time_scale) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(error = %e, frame = frame.0, "cannot map frame to sample time");
                return None;
            }
        };
        resolve_bracket(self.samples.bracket(target), target)
    }

    /// Final box at `frame`: interpolated (or clamped) sample with the adjustment curves
    /// composed on top. An empty track yields [`BBox::UNSET`], untouched by curves.
    pub fn get_box(&self, frame: FrameIndex) -> BBox {
        match self.base_box(frame) {
            Some(base) => self.adjustments.apply(base, frame),
            None => BBox::UNSET,
        }
    }

    /// [`BoxTrack::get_box`] for every frame of `range`, optionally spread over the rayon
    /// pool. Output order follows the range either way.
    pub fn boxes(&self, range: FrameRange, parallel: bool) -> Vec<BBox> {
        if parallel {
            (range.start.0..range.end.0)
                .into_par_iter()
                .map(|f| self.get_box(FrameIndex(f)))
                .collect()
        } else {
            range.iter().map(|f| self.get_box(f)).collect()
        }
    }

    /// Stored samples as tracker records, frame numbers recovered from the base rate.
    pub fn box_records(&self) -> Vec<BoxRecord> {
        let fps = self.base_fps.as_f64();
        self.samples
            .iter()
            .map(|(t, b)| BoxRecord {
                frame: (t * fps).round().max(0.0) as u64,
                cx: b.cx,
                cy: b.cy,
                width: b.width,
                height: b.height,
                angle: b.angle,
            })
            .collect()
    }

    /// Bulk-load tracker output through `codec`, returning how many records were added.
    ///
    /// Records are applied as they decode, so on error every record before the failure
    /// point stays loaded. `data_path` is only updated after a complete load.
    pub fn try_load_box_data(
        &mut self,
        path: impl AsRef<Path>,
        codec: &dyn TrackerCodec,
    ) -> TrackResult<usize> {
        self.load_from(path.as_ref(), codec)
    }

    /// [`BoxTrack::try_load_box_data`] reporting failure as `false` (logged, not raised).
    pub fn load_box_data(&mut self, path: impl AsRef<Path>, codec: &dyn TrackerCodec) -> bool {
        match self.try_load_box_data(path, codec) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load tracker data");
                false
            }
        }
    }

    #[tracing::instrument(skip(self, codec), fields(codec = codec.name()))]
    fn load_from(&mut self, path: &Path, codec: &dyn TrackerCodec) -> TrackResult<usize> {
        let file = std::fs::File::open(path).map_err(|e| TrackError::io(path, e))?;
        let reader = std::io::BufReader::new(file);

        let mut loaded = 0usize;
        for record in codec.records(Box::new(reader)) {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    tracing::debug!(loaded, "tracker data ended early");
                    return Err(e);
                }
            };
            self.add_bbox(FrameIndex(record.frame), record.bbox());
            loaded += 1;
        }

        self.data_path = Some(path.to_path_buf());
        tracing::debug!(loaded, total = self.len(), "loaded tracker samples");
        Ok(loaded)
    }

    /// Metadata as pretty-printed JSON. See [`BoxTrack::json_value`].
    pub fn json(&self) -> String {
        format!("{:#}", self.json_value())
    }

    /// Metadata object: id, base rate, time scale, visibility, data path and the five curves.
    /// Raw samples are not included; they persist through the tracker data file.
    pub fn json_value(&self) -> serde_json::Value {
        let adj = &self.adjustments;
        let data_path = self
            .data_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());
        serde_json::json!({
            "box_id": self.id,
            "base_fps": { "num": self.base_fps.num, "den": self.base_fps.den },
            "time_scale": self.time_scale,
            "visible": self.visible,
            "data_path": data_path,
            "delta_x": adj.delta_x.points(),
            "delta_y": adj.delta_y.points(),
            "scale_x": adj.scale_x.points(),
            "scale_y": adj.scale_y.points(),
            "rotation": adj.rotation.points(),
        })
    }

    /// Parse `value` and apply it with [`BoxTrack::set_json_value`].
    pub fn set_json(&mut self, value: &str) -> TrackResult<()> {
        let root: serde_json::Value = serde_json::from_str(value)
            .map_err(|e| TrackError::invalid_json(format!("track metadata: {e}")))?;
        self.set_json_value(&root)
    }

    /// Apply the recognised keys of `root` in a fixed order:
    /// `box_id`, `base_fps`, `time_scale`, `visible`, `data_path`, `delta_x`, `delta_y`,
    /// `scale_x`, `scale_y`, `rotation`.
    ///
    /// Missing or null keys keep their current value; unknown keys are ignored. The first
    /// key that fails stops the update with an error and every key before it stays applied.
    /// Type errors are [`TrackError::InvalidJson`]; a zero fps term or non-positive time
    /// scale is [`TrackError::InvalidState`].
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn set_json_value(&mut self, root: &serde_json::Value) -> TrackResult<()> {
        let obj = root
            .as_object()
            .ok_or_else(|| TrackError::invalid_json("track metadata must be a JSON object"))?;
        let field = |key: &str| obj.get(key).filter(|v| !v.is_null());

        if let Some(v) = field("box_id") {
            self.id = parse_field("box_id", v)?;
        }
        if let Some(v) = field("base_fps") {
            let patch: FpsPatch = parse_field("base_fps", v)?;
            self.set_base_fps(Fps {
                num: patch.num.unwrap_or(self.base_fps.num),
                den: patch.den.unwrap_or(self.base_fps.den),
            })?;
        }
        if let Some(v) = field("time_scale") {
            self.set_time_scale(parse_field("time_scale", v)?)?;
        }
        if let Some(v) = field("visible") {
            self.visible = parse_field("visible", v)?;
        }
        if let Some(v) = field("data_path") {
            self.data_path = Some(parse_field("data_path", v)?);
        }

        let adj = &mut self.adjustments;
        for (name, curve) in [
            ("delta_x", &mut adj.delta_x),
            ("delta_y", &mut adj.delta_y),
            ("scale_x", &mut adj.scale_x),
            ("scale_y", &mut adj.scale_y),
            ("rotation", &mut adj.rotation),
        ] {
            if let Some(v) = field(name) {
                let points: Vec<CurvePoint> = parse_field(name, v)?;
                curve.set_points(points);
            }
        }
        Ok(())
    }
}

fn parse_field<T: DeserializeOwned>(key: &str, v: &serde_json::Value) -> TrackResult<T> {
    T::deserialize(v).map_err(|e| TrackError::invalid_json(format!("{key}: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/tracking/track.rs"]
mod tests;

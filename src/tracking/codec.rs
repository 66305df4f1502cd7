//! Decoders for object-tracker output.
//!
//! A codec turns a byte stream into an ordered sequence of [`BoxRecord`]s. The loader in
//! [`crate::BoxTrack::load_box_data`] consumes records until the first error, so codecs
//! that stream (like [`JsonLinesCodec`]) give partial loads on truncated input.

use std::io::{Read, Write};

use crate::{
    foundation::error::{TrackError, TrackResult},
    tracking::bbox::BBox,
};

/// One tracker sample: a frame number plus center-form geometry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoxRecord {
    pub frame: u64,
    pub cx: f64,
    pub cy: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub angle: f64,
}

impl BoxRecord {
    pub fn bbox(&self) -> BBox {
        BBox::new(self.cx, self.cy, self.width, self.height, self.angle)
    }
}

/// Boxed record stream returned by [`TrackerCodec::records`].
pub type RecordIter<'r> = Box<dyn Iterator<Item = TrackResult<BoxRecord>> + 'r>;

/// Capability for decoding serialized tracker output.
pub trait TrackerCodec {
    /// Short format name used in logs.
    fn name(&self) -> &'static str;

    /// Decode `reader` into records, in file order.
    fn records<'r>(&self, reader: Box<dyn Read + 'r>) -> RecordIter<'r>;
}

/// Concatenated JSON [`BoxRecord`] objects, typically one per line.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonLinesCodec;

impl JsonLinesCodec {
    /// Write `records` one JSON object per line.
    pub fn write<'a, W: Write>(
        &self,
        mut out: W,
        records: impl IntoIterator<Item = &'a BoxRecord>,
    ) -> TrackResult<()> {
        for r in records {
            serde_json::to_writer(&mut out, r)
                .map_err(|e| TrackError::serde(format!("box record: {e}")))?;
            out.write_all(b"\n")
                .map_err(|e| TrackError::serde(format!("box record: {e}")))?;
        }
        Ok(())
    }
}

impl TrackerCodec for JsonLinesCodec {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    fn records<'r>(&self, reader: Box<dyn Read + 'r>) -> RecordIter<'r> {
        let stream = serde_json::Deserializer::from_reader(reader).into_iter::<BoxRecord>();
        Box::new(stream.map(|r| {
            r.map_err(|e| TrackError::decode(format!("jsonl record at line {}: {e}", e.line())))
        }))
    }
}

/// Whole-document tracker output with corner-form boxes:
///
/// ```json
/// {"frames": [{"id": 1, "rotation": 0.0,
///              "bounding_box": {"x1": 0.1, "y1": 0.2, "x2": 0.3, "y2": 0.4}}]}
/// ```
///
/// Frames where the tracker lost the object carry negative corners and are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrackerFramesCodec;

#[derive(serde::Deserialize)]
struct TrackerDocument {
    frames: Vec<TrackerFrame>,
    #[serde(default)]
    last_updated: Option<serde_json::Value>,
}

#[derive(serde::Deserialize)]
struct TrackerFrame {
    id: u64,
    #[serde(default)]
    rotation: f64,
    bounding_box: CornerBox,
}

#[derive(serde::Deserialize)]
struct CornerBox {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl TrackerFrame {
    fn into_record(self) -> Option<BoxRecord> {
        let CornerBox { x1, y1, x2, y2 } = self.bounding_box;
        if x1 < 0.0 || y1 < 0.0 || x2 < 0.0 || y2 < 0.0 {
            tracing::warn!(frame = self.id, "skipping tracker frame with negative corners");
            return None;
        }
        let b = BBox::from_corners(x1, y1, x2, y2, self.rotation);
        Some(BoxRecord {
            frame: self.id,
            cx: b.cx,
            cy: b.cy,
            width: b.width,
            height: b.height,
            angle: b.angle,
        })
    }
}

impl TrackerCodec for TrackerFramesCodec {
    fn name(&self) -> &'static str {
        "frames"
    }

    fn records<'r>(&self, reader: Box<dyn Read + 'r>) -> RecordIter<'r> {
        let doc: TrackerDocument = match serde_json::from_reader(reader) {
            Ok(doc) => doc,
            Err(e) => {
                return Box::new(std::iter::once(Err(TrackError::decode(format!(
                    "tracker document: {e}"
                )))));
            }
        };
        if let Some(ts) = &doc.last_updated {
            tracing::debug!(last_updated = %ts, frames = doc.frames.len(), "tracker document");
        }
        Box::new(
            doc.frames
                .into_iter()
                .filter_map(TrackerFrame::into_record)
                .map(Ok),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracking/codec.rs"]
mod tests;

//! Introspection for generic property editors.

use std::collections::BTreeMap;

use crate::{
    animation::{
        curve::{Curve, CurvePoint},
        ease::Interpolation,
    },
    foundation::core::FrameIndex,
    foundation::error::{TrackError, TrackResult},
    tracking::track::BoxTrack,
};

/// Uniform `{name -> current value}` view used by generic property UIs.
pub trait BoxValues {
    fn box_values(&self, frame: FrameIndex) -> BTreeMap<&'static str, f64>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Float,
    Bool,
    String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PropertyChoice {
    pub name: String,
    pub value: serde_json::Value,
    pub selected: bool,
}

/// One editable (or read-only) property as seen at a given frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Property {
    pub name: String,
    pub value: serde_json::Value,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub description: String,
    pub min: f64,
    pub max: f64,
    pub readonly: bool,
    /// A curve point sits exactly on the requested frame.
    pub keyframe: bool,
    /// Interpolation of the closest curve point, if the property is curve-backed.
    pub interpolation: Option<Interpolation>,
    pub keyframe_points: Vec<CurvePoint>,
    pub choices: Vec<PropertyChoice>,
}

/// Properties keyed by their JSON key.
pub type PropertySheet = BTreeMap<String, Property>;

impl Property {
    fn plain(
        name: &str,
        value: serde_json::Value,
        kind: PropertyKind,
        description: &str,
        (min, max): (f64, f64),
        readonly: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            value,
            kind,
            description: description.to_string(),
            min,
            max,
            readonly,
            keyframe: false,
            interpolation: None,
            keyframe_points: Vec::new(),
            choices: Vec::new(),
        }
    }

    fn curve(
        name: &str,
        description: &str,
        curve: &Curve,
        (min, max): (f64, f64),
        frame: FrameIndex,
    ) -> Self {
        Self {
            keyframe: curve.contains(frame),
            interpolation: curve.closest_point(frame).map(|p| p.interpolation),
            keyframe_points: curve.points().to_vec(),
            ..Self::plain(
                name,
                serde_json::json!(curve.evaluate(frame)),
                PropertyKind::Float,
                description,
                (min, max),
                false,
            )
        }
    }
}

impl BoxTrack {
    /// Every property at `frame`, ready for a generic editor.
    pub fn properties(&self, frame: FrameIndex) -> PropertySheet {
        let bbox = self.get_box(frame);
        let adj = &self.adjustments;
        let visible = self.visible();

        let mut visible_prop = Property::plain(
            "Visible",
            serde_json::json!(visible),
            PropertyKind::Bool,
            "Whether the tracked region is shown",
            (0.0, 1.0),
            false,
        );
        visible_prop.choices = vec![
            PropertyChoice {
                name: "Yes".to_string(),
                value: serde_json::json!(true),
                selected: visible,
            },
            PropertyChoice {
                name: "No".to_string(),
                value: serde_json::json!(false),
                selected: !visible,
            },
        ];

        // No data reports every corner as -1, like the box itself.
        let corner = |name: &str, value: f64, description: &str| {
            let value = if bbox.is_unset() { -1.0 } else { value };
            Property::plain(
                name,
                serde_json::json!(value),
                PropertyKind::Float,
                description,
                (0.0, 1.0),
                true,
            )
        };

        let mut sheet = PropertySheet::new();
        sheet.insert(
            "box_id".to_string(),
            Property::plain(
                "Box ID",
                serde_json::json!(self.id()),
                PropertyKind::String,
                "Identifier of the tracked region",
                (-1.0, -1.0),
                true,
            ),
        );
        sheet.insert("visible".to_string(), visible_prop);
        sheet.insert("x1".to_string(), corner("X1", bbox.x1(), "Left edge"));
        sheet.insert("y1".to_string(), corner("Y1", bbox.y1(), "Top edge"));
        sheet.insert("x2".to_string(), corner("X2", bbox.x2(), "Right edge"));
        sheet.insert("y2".to_string(), corner("Y2", bbox.y2(), "Bottom edge"));
        sheet.insert(
            "delta_x".to_string(),
            Property::curve(
                "Displacement X-axis",
                "Horizontal offset added to the box center",
                &adj.delta_x,
                (-1.0, 1.0),
                frame,
            ),
        );
        sheet.insert(
            "delta_y".to_string(),
            Property::curve(
                "Displacement Y-axis",
                "Vertical offset added to the box center",
                &adj.delta_y,
                (-1.0, 1.0),
                frame,
            ),
        );
        sheet.insert(
            "scale_x".to_string(),
            Property::curve(
                "Scale (Width)",
                "Multiplier applied to the box width",
                &adj.scale_x,
                (0.0, 10.0),
                frame,
            ),
        );
        sheet.insert(
            "scale_y".to_string(),
            Property::curve(
                "Scale (Height)",
                "Multiplier applied to the box height",
                &adj.scale_y,
                (0.0, 10.0),
                frame,
            ),
        );
        sheet.insert(
            "rotation".to_string(),
            Property::curve(
                "Rotation",
                "Degrees added to the box angle, clockwise",
                &adj.rotation,
                (0.0, 360.0),
                frame,
            ),
        );
        sheet
    }

    /// [`BoxTrack::properties`] as a JSON object.
    pub fn properties_json(&self, frame: FrameIndex) -> TrackResult<serde_json::Value> {
        serde_json::to_value(self.properties(frame))
            .map_err(|e| TrackError::serde(format!("properties: {e}")))
    }
}

impl BoxValues for BoxTrack {
    fn box_values(&self, frame: FrameIndex) -> BTreeMap<&'static str, f64> {
        let b = self.get_box(frame);
        let v = self.adjustments.values(frame);
        BTreeMap::from([
            ("cx", b.cx),
            ("cy", b.cy),
            ("w", b.width),
            ("h", b.height),
            ("ang", b.angle),
            ("sx", v.scale_x),
            ("sy", v.scale_y),
            ("dx", v.delta_x),
            ("dy", v.delta_y),
            ("r", v.rotation),
        ])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracking/properties.rs"]
mod tests;

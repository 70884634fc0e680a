//! Canonical interchange format for designs.
//!
//! The exported JSON is an ordered array of placed-element records under a
//! versioned envelope. Export is a pure read of the live design; import
//! validates the whole document before touching anything, so a malformed
//! file can never leave the design partially mutated.

use serde::{Deserialize, Serialize};

use crate::design::{Design, MIN_SCALE};
use crate::element::{PlacedElement, TemplateId};
use crate::error::{DesignError, DesignResult};

/// Current schema version written by [`DesignDocument::from_design`].
pub const SCHEMA_VERSION: u32 = 1;

/// One placed element as it appears in the exported file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedElementRecord {
    /// Template reference.
    pub template_id: TemplateId,
    /// X position of the top-left corner.
    pub x: f32,
    /// Y position of the top-left corner.
    pub y: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Layering order, unique within the document.
    pub z_order: i32,
}

impl From<&PlacedElement> for PlacedElementRecord {
    fn from(element: &PlacedElement) -> Self {
        Self {
            template_id: element.template.clone(),
            x: element.x,
            y: element.y,
            rotation: element.rotation,
            scale: element.scale,
            z_order: element.z_order,
        }
    }
}

impl PlacedElementRecord {
    /// Validate the record fields.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::InvalidDocument`] for non-finite coordinates
    /// or rotation, or a scale below the minimum.
    fn validate(&self, index: usize) -> DesignResult<()> {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.rotation.is_finite()
            && self.scale.is_finite();
        if !finite {
            return Err(DesignError::InvalidDocument(format!(
                "element {index}: non-finite value"
            )));
        }
        if self.scale < MIN_SCALE {
            return Err(DesignError::InvalidDocument(format!(
                "element {index}: scale {} below minimum {MIN_SCALE}",
                self.scale
            )));
        }
        Ok(())
    }

    fn into_element(self) -> PlacedElement {
        let mut element = PlacedElement::new(self.template_id, self.x, self.y, self.z_order);
        element.rotation = self.rotation;
        element.scale = self.scale;
        element
    }
}

/// A serialized snapshot of a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    /// Schema version.
    pub version: u32,
    /// Canvas width.
    pub width: f32,
    /// Canvas height.
    pub height: f32,
    /// Placed elements in z-order, bottom first.
    pub elements: Vec<PlacedElementRecord>,
}

impl DesignDocument {
    /// Snapshot a design. Never mutates the design.
    #[must_use]
    pub fn from_design(design: &Design) -> Self {
        Self {
            version: SCHEMA_VERSION,
            width: design.width(),
            height: design.height(),
            elements: design
                .elements_by_z()
                .into_iter()
                .map(PlacedElementRecord::from)
                .collect(),
        }
    }

    /// Materialize a design from this document.
    ///
    /// Every record is validated before any element is created; either the
    /// full design is produced or nothing is.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::InvalidDocument`] on an unsupported version,
    /// invalid canvas size, invalid record values, or duplicate z-order.
    pub fn into_design(self) -> DesignResult<Design> {
        if self.version != SCHEMA_VERSION {
            return Err(DesignError::InvalidDocument(format!(
                "unsupported version {}",
                self.version
            )));
        }
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(DesignError::InvalidDocument(
                "invalid canvas size".to_string(),
            ));
        }

        let mut seen_z = Vec::with_capacity(self.elements.len());
        for (index, record) in self.elements.iter().enumerate() {
            record.validate(index)?;
            if seen_z.contains(&record.z_order) {
                return Err(DesignError::InvalidDocument(format!(
                    "duplicate zOrder {}",
                    record.z_order
                )));
            }
            seen_z.push(record.z_order);
        }

        let mut design = Design::new(self.width, self.height);
        for record in self.elements {
            // Already validated above; insert only clamps positions.
            design.insert(record.into_element())?;
        }
        Ok(design)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> DesignResult<String> {
        serde_json::to_string_pretty(self).map_err(DesignError::Serialization)
    }

    /// Parse a document from JSON. Parsing alone does not validate; call
    /// [`DesignDocument::into_design`] to validate and materialize.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the JSON is malformed or does not
    /// match the schema.
    pub fn from_json(json: &str) -> DesignResult<Self> {
        serde_json::from_str(json).map_err(DesignError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TemplateId;

    fn template(id: &str) -> TemplateId {
        TemplateId::new(id).expect("valid id")
    }

    fn sample_design() -> Design {
        let mut design = Design::new(800.0, 600.0);
        let a = design.place(template("stone-vertical"), 50.0, 40.0);
        let b = design.place(template("portrait"), 120.0, 80.0);
        design.rotate_to(a, 15.0).expect("rotate");
        design.set_scale(b, 1.5).expect("scale");
        design
    }

    #[test]
    fn test_round_trip_preserves_records() {
        let design = sample_design();
        let doc = DesignDocument::from_design(&design);
        let json = doc.to_json().expect("encode");

        let reimported = DesignDocument::from_json(&json)
            .expect("decode")
            .into_design()
            .expect("materialize");
        let doc2 = DesignDocument::from_design(&reimported);

        assert_eq!(doc.elements, doc2.elements);
        assert_eq!(doc.width, doc2.width);
        assert_eq!(doc.height, doc2.height);
    }

    #[test]
    fn test_records_use_spec_field_names() {
        let design = sample_design();
        let json = DesignDocument::from_design(&design)
            .to_json()
            .expect("encode");
        assert!(json.contains("\"templateId\""));
        assert!(json.contains("\"zOrder\""));
        assert!(json.contains("\"rotation\""));
    }

    #[test]
    fn test_duplicate_z_order_rejected() {
        let json = r#"{
            "version": 1,
            "width": 800.0,
            "height": 600.0,
            "elements": [
                {"templateId": "portrait", "x": 0, "y": 0, "rotation": 0, "scale": 1, "zOrder": 1},
                {"templateId": "epitaph", "x": 10, "y": 10, "rotation": 0, "scale": 1, "zOrder": 1}
            ]
        }"#;
        let err = DesignDocument::from_json(json)
            .expect("parse")
            .into_design()
            .unwrap_err();
        assert!(matches!(err, DesignError::InvalidDocument(_)));
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let json = r#"{"version": 99, "width": 800.0, "height": 600.0, "elements": []}"#;
        let err = DesignDocument::from_json(json)
            .expect("parse")
            .into_design()
            .unwrap_err();
        assert!(matches!(err, DesignError::InvalidDocument(_)));
    }

    #[test]
    fn test_tiny_scale_rejected() {
        let json = r#"{
            "version": 1,
            "width": 800.0,
            "height": 600.0,
            "elements": [
                {"templateId": "portrait", "x": 0, "y": 0, "rotation": 0, "scale": 0.001, "zOrder": 0}
            ]
        }"#;
        assert!(DesignDocument::from_json(json)
            .expect("parse")
            .into_design()
            .is_err());
    }
}

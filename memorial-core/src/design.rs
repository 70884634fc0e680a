//! The design - an ordered collection of placed elements on a canvas.

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, PlacedElement, TemplateId};
use crate::error::{DesignError, DesignResult};

/// Smallest accepted scale factor. Prevents elements from collapsing to a
/// zero footprint that can never be grabbed again.
pub const MIN_SCALE: f32 = 0.05;

/// The full in-progress monument composition being edited.
///
/// Elements keep insertion order; layering is controlled by `z_order`,
/// which is unique within a design. Positions are always clamped to the
/// canvas bounds rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    /// Canvas width in canvas units.
    width: f32,
    /// Canvas height in canvas units.
    height: f32,
    elements: Vec<PlacedElement>,
}

impl Design {
    /// Create an empty design with the given canvas size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            elements: Vec::new(),
        }
    }

    /// Canvas width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Canvas height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Place a new element instantiating `template` at the given position.
    ///
    /// The position is clamped to the canvas bounds and the element is
    /// assigned the next free z-order (on top of everything placed so far).
    pub fn place(&mut self, template: TemplateId, x: f32, y: f32) -> ElementId {
        let z = self.next_z();
        let mut element = PlacedElement::new(template, x, y, z);
        let (cx, cy) = self.clamped(x, y, element.size());
        element.x = cx;
        element.y = cy;
        let id = element.id;
        self.elements.push(element);
        tracing::debug!(element = %id, z_order = z, "placed element");
        id
    }

    /// Insert a fully-formed element, e.g. when rebuilding from a document.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::InvalidDocument`] if the element's z-order
    /// collides with an existing one.
    pub fn insert(&mut self, mut element: PlacedElement) -> DesignResult<ElementId> {
        if self.elements.iter().any(|e| e.z_order == element.z_order) {
            return Err(DesignError::InvalidDocument(format!(
                "duplicate z-order {}",
                element.z_order
            )));
        }
        let (cx, cy) = self.clamped(element.x, element.y, element.size());
        element.x = cx;
        element.y = cy;
        let id = element.id;
        self.elements.push(element);
        Ok(id)
    }

    /// Move an element to a new position, clamped to the canvas bounds.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ElementNotFound`] if the element is missing.
    pub fn move_to(&mut self, id: ElementId, x: f32, y: f32) -> DesignResult<()> {
        let (width, height) = (self.width, self.height);
        let element = self.get_mut(id)?;
        let size = element.size();
        element.x = clamp_axis(x, size, width);
        element.y = clamp_axis(y, size, height);
        Ok(())
    }

    /// Set an element's rotation in degrees, normalized into `[0, 360)`.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ElementNotFound`] if the element is missing.
    pub fn rotate_to(&mut self, id: ElementId, degrees: f32) -> DesignResult<()> {
        let element = self.get_mut(id)?;
        element.rotation = normalize_degrees(degrees);
        Ok(())
    }

    /// Set an element's scale, floored at [`MIN_SCALE`]. The element is
    /// re-clamped so the grown footprint stays within the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ElementNotFound`] if the element is missing.
    pub fn set_scale(&mut self, id: ElementId, scale: f32) -> DesignResult<()> {
        let (width, height) = (self.width, self.height);
        let element = self.get_mut(id)?;
        element.scale = scale.max(MIN_SCALE);
        let size = element.size();
        element.x = clamp_axis(element.x, size, width);
        element.y = clamp_axis(element.y, size, height);
        Ok(())
    }

    /// Raise an element above everything else by giving it the next free
    /// z-order. Keeps z-order uniqueness by construction.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ElementNotFound`] if the element is missing.
    pub fn bring_to_front(&mut self, id: ElementId) -> DesignResult<()> {
        let z = self.next_z();
        let element = self.get_mut(id)?;
        element.z_order = z;
        Ok(())
    }

    /// Remove an element from the design.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ElementNotFound`] if the element is missing.
    pub fn remove(&mut self, id: ElementId) -> DesignResult<PlacedElement> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| DesignError::ElementNotFound(id.to_string()))?;
        Ok(self.elements.remove(index))
    }

    /// Remove every element (full design reset).
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&PlacedElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Find the topmost element whose footprint contains the given point.
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<ElementId> {
        self.elements
            .iter()
            .filter(|e| e.contains_point(x, y))
            .max_by_key(|e| e.z_order)
            .map(|e| e.id)
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &PlacedElement> {
        self.elements.iter()
    }

    /// Elements sorted by z-order, bottom first.
    #[must_use]
    pub fn elements_by_z(&self) -> Vec<&PlacedElement> {
        let mut sorted: Vec<_> = self.elements.iter().collect();
        sorted.sort_by_key(|e| e.z_order);
        sorted
    }

    /// Number of placed elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Whether the design has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn next_z(&self) -> i32 {
        self.elements
            .iter()
            .map(|e| e.z_order)
            .max()
            .map_or(0, |z| z.saturating_add(1))
    }

    fn get_mut(&mut self, id: ElementId) -> DesignResult<&mut PlacedElement> {
        self.elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| DesignError::ElementNotFound(id.to_string()))
    }

    fn clamped(&self, x: f32, y: f32, size: f32) -> (f32, f32) {
        (
            clamp_axis(x, size, self.width),
            clamp_axis(y, size, self.height),
        )
    }
}

impl Default for Design {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Clamp a coordinate so the footprint stays within `[0, extent]`.
///
/// Footprints larger than the canvas pin to the origin edge.
fn clamp_axis(value: f32, size: f32, extent: f32) -> f32 {
    let max = (extent - size).max(0.0);
    value.clamp(0.0, max)
}

/// Normalize an angle in degrees into `[0, 360)`.
fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TemplateId;

    fn template(id: &str) -> TemplateId {
        TemplateId::new(id).expect("valid id")
    }

    #[test]
    fn test_place_assigns_unique_ascending_z() {
        let mut design = Design::new(800.0, 600.0);
        design.place(template("stone-vertical"), 0.0, 0.0);
        design.place(template("cross-orthodox"), 10.0, 10.0);
        let id = design.place(template("flower-rose"), 20.0, 20.0);

        let mut zs: Vec<_> = design.elements().map(|e| e.z_order).collect();
        zs.sort_unstable();
        zs.dedup();
        assert_eq!(zs.len(), 3);
        assert_eq!(design.get(id).map(|e| e.z_order), Some(2));
    }

    #[test]
    fn test_move_clamps_to_bounds() {
        let mut design = Design::new(800.0, 600.0);
        let id = design.place(template("portrait"), 0.0, 0.0);

        design.move_to(id, -50.0, 10_000.0).expect("move");
        let element = design.get(id).expect("exists");
        assert_eq!(element.x, 0.0);
        assert_eq!(element.y, 600.0 - element.size());
    }

    #[test]
    fn test_rotation_normalized() {
        let mut design = Design::new(800.0, 600.0);
        let id = design.place(template("epitaph"), 0.0, 0.0);

        design.rotate_to(id, -90.0).expect("rotate");
        assert_eq!(design.get(id).map(|e| e.rotation), Some(270.0));
        design.rotate_to(id, 725.0).expect("rotate");
        assert_eq!(design.get(id).map(|e| e.rotation), Some(5.0));
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let mut design = Design::new(800.0, 600.0);
        let bottom = design.place(template("stone-vertical"), 100.0, 100.0);
        let top = design.place(template("portrait"), 100.0, 100.0);

        assert_eq!(design.element_at(150.0, 150.0), Some(top));

        design.bring_to_front(bottom).expect("raise");
        assert_eq!(design.element_at(150.0, 150.0), Some(bottom));
    }

    #[test]
    fn test_remove_missing_is_error() {
        let mut design = Design::default();
        let err = design.remove(ElementId::new()).unwrap_err();
        assert!(matches!(err, DesignError::ElementNotFound(_)));
    }

    #[test]
    fn test_insert_rejects_duplicate_z() {
        let mut design = Design::new(800.0, 600.0);
        design
            .insert(PlacedElement::new(template("portrait"), 0.0, 0.0, 3))
            .expect("first insert");
        let err = design
            .insert(PlacedElement::new(template("epitaph"), 0.0, 0.0, 3))
            .unwrap_err();
        assert!(matches!(err, DesignError::InvalidDocument(_)));
    }
}

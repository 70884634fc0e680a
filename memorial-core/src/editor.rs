//! The editing session: selection, rotate mode, and drag interpretation.
//!
//! All mutation happens on the single UI event thread. Pointer gestures
//! are synchronous against in-memory state; asynchronous actions (save,
//! calculation) snapshot the design and check the generation counter when
//! their results arrive, discarding anything that raced an import.

use crate::design::Design;
use crate::element::ElementId;
use crate::error::DesignResult;

/// What a completed drag update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing selected or no drag in progress.
    Ignored,
    /// The selected element was translated.
    Translated,
    /// The selected element was rotated.
    Rotated,
}

/// In-flight drag bookkeeping.
#[derive(Debug, Clone, Copy)]
struct DragState {
    element: ElementId,
    /// Pointer offset from the element's top-left corner at grab time.
    offset_x: f32,
    offset_y: f32,
}

/// Owns the [`Design`] for the duration of an editing session.
#[derive(Debug)]
pub struct EditorSession {
    design: Design,
    rotate_mode: bool,
    selected: Option<ElementId>,
    drag: Option<DragState>,
    generation: u64,
}

impl EditorSession {
    /// Start a session over an empty design with the given canvas size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_design(Design::new(width, height))
    }

    /// Start a session over an existing design.
    #[must_use]
    pub fn with_design(design: Design) -> Self {
        Self {
            design,
            rotate_mode: false,
            selected: None,
            drag: None,
            generation: 0,
        }
    }

    /// The live design.
    #[must_use]
    pub fn design(&self) -> &Design {
        &self.design
    }

    /// Mutable access to the live design for direct edits (properties
    /// panel, delete key, and so on).
    pub fn design_mut(&mut self) -> &mut Design {
        &mut self.design
    }

    /// Whether rotate mode is on.
    #[must_use]
    pub fn rotate_mode(&self) -> bool {
        self.rotate_mode
    }

    /// Flip rotate mode and return the new state.
    ///
    /// Purely changes how subsequent drags are interpreted; there are no
    /// other transitions and the flag is never persisted.
    pub fn toggle_rotate_mode(&mut self) -> bool {
        self.rotate_mode = !self.rotate_mode;
        tracing::debug!(rotate_mode = self.rotate_mode, "rotate mode toggled");
        self.rotate_mode
    }

    /// Currently selected element, if any.
    #[must_use]
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Select an element directly (e.g. from a layer list).
    pub fn select(&mut self, id: ElementId) {
        self.selected = Some(id);
    }

    /// Clear the selection and any drag in progress.
    pub fn deselect(&mut self) {
        self.selected = None;
        self.drag = None;
    }

    /// Pointer-down on the canvas: grab the topmost element under the
    /// pointer, or clear the selection if the pointer hit empty canvas.
    pub fn begin_drag(&mut self, x: f32, y: f32) {
        match self.design.element_at(x, y) {
            Some(id) => {
                self.selected = Some(id);
                if let Some(element) = self.design.get(id) {
                    self.drag = Some(DragState {
                        element: id,
                        offset_x: x - element.x,
                        offset_y: y - element.y,
                    });
                }
            }
            None => self.deselect(),
        }
    }

    /// Pointer-move during a drag: translate or rotate the grabbed
    /// element depending on rotate mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the grabbed element has been deleted out from
    /// under the drag.
    pub fn drag_to(&mut self, x: f32, y: f32) -> DesignResult<DragOutcome> {
        let Some(drag) = self.drag else {
            return Ok(DragOutcome::Ignored);
        };
        if self.rotate_mode {
            let (cx, cy) = match self.design.get(drag.element) {
                Some(element) => element.center(),
                None => return Ok(DragOutcome::Ignored),
            };
            let degrees = (y - cy).atan2(x - cx).to_degrees() + 90.0;
            self.design.rotate_to(drag.element, degrees)?;
            Ok(DragOutcome::Rotated)
        } else {
            self.design
                .move_to(drag.element, x - drag.offset_x, y - drag.offset_y)?;
            Ok(DragOutcome::Translated)
        }
    }

    /// Pointer-up: end the drag, keeping the selection.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Delete the selected element, if any. Returns whether one was removed.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected.take() else {
            return false;
        };
        self.drag = None;
        self.design.remove(id).is_ok()
    }

    /// Replace the design wholesale (the import path).
    ///
    /// Bumps the generation counter so results of requests issued against
    /// the previous design are discarded when they arrive.
    pub fn replace_design(&mut self, design: Design) {
        self.design = design;
        self.selected = None;
        self.drag = None;
        self.generation += 1;
        tracing::info!(generation = self.generation, "design replaced");
    }

    /// Generation token identifying the current design instance.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(800.0, 600.0)
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
    fn test_toggle_twice_restores_mode() {
        let mut session = EditorSession::default();
        let initial = session.rotate_mode();
        assert!(session.toggle_rotate_mode());
        assert!(!session.toggle_rotate_mode());
        assert_eq!(session.rotate_mode(), initial);
    }

    #[test]
    fn test_drag_translates_when_rotate_mode_off() {
        let mut session = EditorSession::default();
        let id = session.design_mut().place(template("portrait"), 100.0, 100.0);

        session.begin_drag(110.0, 110.0);
        assert_eq!(session.selected(), Some(id));

        let outcome = session.drag_to(210.0, 160.0).expect("drag");
        assert_eq!(outcome, DragOutcome::Translated);
        let element = session.design().get(id).expect("exists");
        assert_eq!((element.x, element.y), (200.0, 150.0));
        assert_eq!(element.rotation, 0.0);
    }

    #[test]
    fn test_drag_rotates_when_rotate_mode_on() {
        let mut session = EditorSession::default();
        let id = session.design_mut().place(template("portrait"), 100.0, 100.0);
        session.toggle_rotate_mode();

        session.begin_drag(150.0, 150.0);
        // Pointer directly right of center: 0 degrees atan2 + 90 offset.
        let outcome = session.drag_to(300.0, 150.0).expect("drag");
        assert_eq!(outcome, DragOutcome::Rotated);
        let element = session.design().get(id).expect("exists");
        assert!((element.rotation - 90.0).abs() < 0.01);
        // Position untouched by a rotate drag.
        assert_eq!((element.x, element.y), (100.0, 100.0));
    }

    #[test]
    fn test_drag_on_empty_canvas_clears_selection() {
        let mut session = EditorSession::default();
        let id = session.design_mut().place(template("portrait"), 100.0, 100.0);
        session.select(id);

        session.begin_drag(700.0, 500.0);
        assert_eq!(session.selected(), None);
        assert_eq!(session.drag_to(10.0, 10.0).expect("drag"), DragOutcome::Ignored);
    }

    #[test]
    fn test_replace_design_bumps_generation_and_clears_selection() {
        let mut session = EditorSession::default();
        let id = session.design_mut().place(template("portrait"), 0.0, 0.0);
        session.select(id);
        let before = session.generation();

        session.replace_design(Design::new(400.0, 300.0));
        assert_eq!(session.generation(), before + 1);
        assert_eq!(session.selected(), None);
        assert!(session.design().is_empty());
    }
}

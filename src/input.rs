use egui::{PointerButton, Pos2, Rect, Response};

/// Maps between screen coordinates and canvas-local coordinates.
///
/// Every pointer position is rescaled into the canvas backing space before
/// any hit-testing or path math; with egui's resolution-independent points
/// the scale collapses to 1 and the mapping is the rect translation, but all
/// geometry still goes through here so the scene never sees screen
/// coordinates.
#[derive(Debug, Clone, Copy)]
pub struct CanvasMapping {
    rect: Rect,
}

impl CanvasMapping {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn to_canvas(&self, screen: Pos2) -> Pos2 {
        (screen - self.rect.min).to_pos2()
    }

    pub fn to_screen(&self, canvas: Pos2) -> Pos2 {
        self.rect.min + canvas.to_vec2()
    }
}

/// Domain-level pointer events in canvas coordinates.
#[derive(Debug, Clone, Copy)]
pub enum PointerEvent {
    Down(Pos2),
    Moved(Pos2),
    Up(Pos2),
    /// Secondary button press; toggles the eraser.
    SecondaryDown(Pos2),
}

/// Convert the frame's interaction with the canvas response into pointer
/// events. A click with no movement still yields a Down and an Up, which is
/// what commits zero-area shapes.
pub fn collect_pointer_events(response: &Response, mapping: &CanvasMapping) -> Vec<PointerEvent> {
    let mut events = Vec::new();

    if let Some(screen_pos) = response.interact_pointer_pos() {
        let pos = mapping.to_canvas(screen_pos);
        if response.drag_started_by(PointerButton::Primary) {
            events.push(PointerEvent::Down(pos));
        } else if response.dragged_by(PointerButton::Primary) {
            events.push(PointerEvent::Moved(pos));
        }
        if response.drag_stopped_by(PointerButton::Primary) {
            events.push(PointerEvent::Up(pos));
        }
        if response.secondary_clicked() {
            events.push(PointerEvent::SecondaryDown(pos));
        }
    }

    events
}

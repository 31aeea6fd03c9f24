use egui::{Sense, Ui};

use crate::editor::Editor;
use crate::input::{CanvasMapping, PointerEvent, collect_pointer_events};
use crate::renderer::{GalleyTextMeasure, paint_editor};

/// The interactive drawing surface: allocates a painter, feeds pointer
/// events through the editor state machine, and redraws the scene.
pub fn editor_canvas(ui: &mut Ui, editor: &mut Editor) {
    let size = ui.available_size();
    let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
    let mapping = CanvasMapping::new(response.rect);
    let measure = GalleyTextMeasure::new(ui.ctx().clone());

    for event in collect_pointer_events(&response, &mapping) {
        match event {
            PointerEvent::Down(pos) => editor.pointer_down(pos, &measure),
            PointerEvent::Moved(pos) => editor.pointer_move(pos, &measure),
            PointerEvent::Up(pos) => editor.pointer_up(pos),
            PointerEvent::SecondaryDown(_) => editor.toggle_erase(),
        }
    }

    if response.hovered() {
        ui.ctx().set_cursor_icon(editor.cursor_icon());
    }

    let hover = response.hover_pos().map(|p| mapping.to_canvas(p));
    paint_editor(&painter, &mapping, editor, &measure, hover);
}

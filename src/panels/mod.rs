mod editor_canvas;
mod tools_panel;

pub use editor_canvas::editor_canvas;
pub use tools_panel::tools_panel;

use crate::editor::Editor;
use crate::gallery::{ExportSink, Gallery};
use crate::panels;
use crate::renderer::GalleyTextMeasure;

/// The hosting application: a board with a gallery of saved SVG drawings and
/// the modal vector editor that produces them.
pub struct SketchApp {
    gallery: Gallery,
    /// `Some` while the drawing modal is open.
    editor: Option<Editor>,
    /// User-visible notice (save failures, empty-canvas warnings).
    notice: Option<String>,
    /// Buffer for the text-label prompt.
    text_input: String,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            gallery: Gallery::load(cc.storage),
            editor: None,
            notice: None,
            text_input: String::new(),
        }
    }

    fn finish_drawing(&mut self, ctx: &egui::Context) {
        let Some(editor) = &self.editor else { return };
        let measure = GalleyTextMeasure::new(ctx.clone());
        match editor.finish(&measure, Some(&mut self.gallery as &mut dyn ExportSink)) {
            Ok(()) => {
                self.editor = None;
            }
            Err(err) => {
                log::warn!("saving drawing failed: {err}");
                // Keep the editor open; the scene is untouched and the user
                // can retry.
                self.notice = Some(err.to_string());
            }
        }
    }
}

impl eframe::App for SketchApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.gallery.persist(storage);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("gallery_panel")
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Gallery");
                ui.separator();
                if self.gallery.is_empty() {
                    ui.label("No drawings saved yet.");
                }
                let mut remove = None;
                for entry in self.gallery.entries() {
                    ui.horizontal(|ui| {
                        ui.monospace(entry.id.to_string()[..8].to_owned());
                        ui.label(format!("{} bytes", entry.svg.len()));
                        if ui.small_button("Delete").clicked() {
                            remove = Some(entry.id);
                        }
                    });
                }
                if let Some(id) = remove {
                    self.gallery.remove(id);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Sketch board");
            if ui.button("Open drawing editor").clicked() {
                self.editor = Some(Editor::new());
            }
        });

        if let Some(editor) = &mut self.editor {
            let mut done = false;
            let mut cancel = false;
            egui::Window::new("Drawing")
                .collapsible(false)
                .default_size([860.0, 560.0])
                .show(ctx, |ui| {
                    panels::tools_panel(ui, editor);
                    ui.separator();
                    ui.horizontal(|ui| {
                        done = ui.button("Done").clicked();
                        if ui.button("Clear").clicked() {
                            editor.clear();
                        }
                        cancel = ui.button("Cancel").clicked();
                    });
                    ui.separator();
                    panels::editor_canvas(ui, editor);
                });

            // The blocking prompt of the original becomes a modal sub-state:
            // the editor stays in TextPending until we resume it here.
            if editor.pending_text_pos().is_some() {
                egui::Window::new("Enter text")
                    .collapsible(false)
                    .resizable(false)
                    .show(ctx, |ui| {
                        ui.text_edit_singleline(&mut self.text_input);
                        ui.horizontal(|ui| {
                            if ui.button("OK").clicked() {
                                editor.submit_text(Some(std::mem::take(&mut self.text_input)));
                            }
                            if ui.button("Cancel").clicked() {
                                self.text_input.clear();
                                editor.submit_text(None);
                            }
                        });
                    });
            }

            if done {
                self.finish_drawing(ctx);
            }
            if cancel {
                // Discard the scene without saving.
                self.editor = None;
            }
        }

        if let Some(notice) = self.notice.clone() {
            egui::Window::new("Notice")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(notice);
                    if ui.button("OK").clicked() {
                        self.notice = None;
                    }
                });
        }
    }
}

use egui::Slider;

use crate::editor::{Editor, Mode};

/// Tool buttons and brush controls for the drawing modal.
pub fn tools_panel(ui: &mut egui::Ui, editor: &mut Editor) {
    ui.heading("Tools");
    ui.separator();

    ui.horizontal_wrapped(|ui| {
        for mode in Mode::ALL {
            let selected = editor.mode() == mode;
            if ui.selectable_label(selected, mode.label()).clicked() {
                log::info!("tool selected from UI: {}", mode.label());
                editor.set_mode(mode);
            }
        }
    });

    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Color:");
        egui::color_picker::color_edit_button_srgba(
            ui,
            &mut editor.brush.color,
            egui::color_picker::Alpha::Opaque,
        );
    });

    ui.horizontal(|ui| {
        ui.label("Width:");
        ui.add(Slider::new(&mut editor.brush.stroke_width, 1.0..=50.0));
    });

    // Font controls only matter to the text tool.
    if editor.mode() == Mode::Text {
        ui.horizontal(|ui| {
            ui.label("Font size:");
            ui.add(Slider::new(&mut editor.brush.font_size, 8.0..=96.0));
        });
        ui.horizontal(|ui| {
            ui.label("Font:");
            egui::ComboBox::from_id_salt("font_family")
                .selected_text(editor.brush.font_family.clone())
                .show_ui(ui, |ui| {
                    for family in ["sans-serif", "monospace"] {
                        ui.selectable_value(
                            &mut editor.brush.font_family,
                            family.to_owned(),
                            family,
                        );
                    }
                });
        });
    }
}

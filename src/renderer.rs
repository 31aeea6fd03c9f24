use egui::epaint::TextShape;
use egui::{Color32, FontId, Painter, Pos2, Shape, Stroke};

use crate::editor::{Editor, Mode};
use crate::geometry::rotate_point;
use crate::gizmo::{
    self, HANDLE_FILL, HANDLE_OUTLINE, RESIZE_HANDLE_SIZE, ROTATION_HANDLE_SIZE, SELECTION_COLOR,
};
use crate::input::CanvasMapping;
use crate::item::{ShapeItem, ShapeKind, TextMeasure};

const DASH_LENGTH: f32 = 5.0;
const GAP_LENGTH: f32 = 5.0;

/// [`TextMeasure`] backed by the live egui font atlas, so on-screen boxes
/// match the glyphs actually laid out.
pub struct GalleyTextMeasure {
    ctx: egui::Context,
}

impl GalleyTextMeasure {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl TextMeasure for GalleyTextMeasure {
    fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> f32 {
        self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(text.to_owned(), font_id(font_size, font_family), Color32::WHITE)
                .size()
                .x
        })
    }
}

pub fn font_id(size: f32, family: &str) -> FontId {
    match family {
        "monospace" => FontId::monospace(size),
        _ => FontId::proportional(size),
    }
}

/// Redraw the whole editor surface: committed items back-to-front, the
/// selection overlay, the live drawing preview, and the eraser ring at the
/// hover position.
pub fn paint_editor(
    painter: &Painter,
    mapping: &CanvasMapping,
    editor: &Editor,
    measure: &dyn TextMeasure,
    hover: Option<Pos2>,
) {
    painter.rect_filled(mapping.rect(), 0.0, Color32::WHITE);

    for item in editor.scene().items() {
        paint_item(painter, mapping, item);
    }

    if let Some(item) = editor.scene().selected_item() {
        paint_selection_overlay(painter, mapping, item, measure);
    }

    if let Some(path) = editor.preview_stroke() {
        let points: Vec<Pos2> = path.iter().map(|p| mapping.to_screen(*p)).collect();
        painter.add(Shape::line(
            points,
            Stroke::new(editor.brush.stroke_width, editor.brush.color),
        ));
    }
    if let Some(preview) = editor.preview_shape() {
        paint_item(painter, mapping, &preview);
    }

    if editor.mode() == Mode::Erase {
        if let Some(hover) = hover {
            painter.circle_stroke(
                mapping.to_screen(hover),
                editor.brush.stroke_width,
                Stroke::new(2.0, Color32::RED),
            );
        }
    }
}

/// Paint one committed item, applying its rotation about its center.
fn paint_item(painter: &Painter, mapping: &CanvasMapping, item: &ShapeItem) {
    match item {
        ShapeItem::Text { text, pos, color, font_size, font_family, rotation } => {
            let galley =
                painter.layout_no_wrap(text.clone(), font_id(*font_size, font_family), *color);
            // Left-aligned, vertically centered on the anchor, like the
            // exporter's dominant-baseline="middle".
            let top_left = Pos2::new(pos.x, pos.y - galley.size().y / 2.0);
            if *rotation != 0.0 {
                let center = Pos2::new(pos.x + galley.size().x / 2.0, pos.y);
                let rotated = rotate_point(top_left, center, *rotation);
                painter.add(
                    TextShape::new(mapping.to_screen(rotated), galley, *color)
                        .with_angle(rotation.to_radians()),
                );
            } else {
                painter.add(TextShape::new(mapping.to_screen(top_left), galley, *color));
            }
        }
        ShapeItem::Freehand { color, stroke_width, .. }
        | ShapeItem::Shape { color, stroke_width, .. } => {
            let Some(path) = item.to_polyline() else { return };
            if path.len() < 2 {
                return;
            }
            let rotation = item.rotation();
            let center = item.rotation_center().unwrap_or(path[0]);
            let screen: Vec<Pos2> = path
                .iter()
                .map(|p| {
                    let wp = if rotation != 0.0 { rotate_point(*p, center, rotation) } else { *p };
                    mapping.to_screen(wp)
                })
                .collect();
            let stroke = Stroke::new(*stroke_width, *color);
            if matches!(item, ShapeItem::Shape { kind: ShapeKind::Arrow, .. }) && screen.len() == 5
            {
                // Shaft, then the two barbs as one bent stroke through the
                // tip: avoids a segment from barb to shaft start.
                painter.add(Shape::line(vec![screen[0], screen[1]], stroke));
                painter.add(Shape::line(vec![screen[2], screen[1], screen[4]], stroke));
            } else {
                painter.add(Shape::line(screen, stroke));
            }
        }
    }
}

/// Selection affordances for the selected item: endpoint handles and a thick
/// translucent highlight for line-like items, a dashed rotated bounding box
/// for everything else, and the rotation grip for both.
fn paint_selection_overlay(
    painter: &Painter,
    mapping: &CanvasMapping,
    item: &ShapeItem,
    measure: &dyn TextMeasure,
) {
    if let Some((start, end)) = gizmo::rotated_endpoints(item) {
        let stroke_width = match item {
            ShapeItem::Shape { stroke_width, .. } => *stroke_width,
            _ => 0.0,
        };
        let (s, e) = (mapping.to_screen(start), mapping.to_screen(end));
        painter.add(Shape::line(
            vec![s, e],
            Stroke::new(stroke_width + 5.0, SELECTION_COLOR),
        ));
        for handle in [s, e] {
            painter.circle_filled(handle, RESIZE_HANDLE_SIZE, HANDLE_FILL);
            painter.circle_stroke(handle, RESIZE_HANDLE_SIZE, Stroke::new(1.0, HANDLE_OUTLINE));
        }
    } else if let Some(rect) = item.bounding_box(measure) {
        let center = rect.center();
        let rotation = item.rotation();
        let corners = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
        ]
        .map(|c| {
            let wp = if rotation != 0.0 { rotate_point(c, center, rotation) } else { c };
            mapping.to_screen(wp)
        });
        let stroke = Stroke::new(2.0, SELECTION_COLOR);
        for i in 0..4 {
            painter.extend(Shape::dashed_line(
                &[corners[i], corners[(i + 1) % 4]],
                stroke,
                DASH_LENGTH,
                GAP_LENGTH,
            ));
        }
    }

    if let (Some(rect), Some(handle)) = (
        item.bounding_box(measure),
        gizmo::rotation_handle_pos(item, measure),
    ) {
        let center = mapping.to_screen(rect.center());
        let grip = mapping.to_screen(handle);
        painter.add(Shape::line(vec![center, grip], Stroke::new(1.0, SELECTION_COLOR)));
        painter.circle_filled(grip, ROTATION_HANDLE_SIZE, HANDLE_FILL);
    }
}

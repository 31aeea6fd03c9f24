//! Serializes the scene to a self-contained SVG fragment.
//!
//! Each path-bearing item becomes a `<path>` (arrows as two sub-paths sharing
//! the tip, so no spurious segment closes back to the shaft start) and each
//! label a `<text>`. Rotated items carry a `rotate(angle cx cy)` transform.
//! The viewBox is computed from every contributing point rotated into world
//! space, expanded by half the item's stroke width, then padded by a fixed
//! margin on all sides.

use std::fmt::Write as _;

use egui::{Color32, Pos2, pos2};

use crate::geometry::rotate_point;
use crate::item::{ShapeItem, ShapeKind, TextMeasure};
use crate::scene::Scene;

/// Fixed margin added around the tight bounds, in SVG units.
const VIEWBOX_PADDING: f32 = 20.0;

struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
    any: bool,
}

impl Bounds {
    fn new() -> Self {
        Self {
            min_x: f32::INFINITY,
            min_y: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            max_y: f32::NEG_INFINITY,
            any: false,
        }
    }

    fn include(&mut self, p: Pos2, half_width: f32) {
        self.min_x = self.min_x.min(p.x - half_width);
        self.min_y = self.min_y.min(p.y - half_width);
        self.max_x = self.max_x.max(p.x + half_width);
        self.max_y = self.max_y.max(p.y + half_width);
        self.any = true;
    }
}

/// Render the scene as an SVG string, or `None` when there is nothing to
/// export.
pub fn scene_to_svg(scene: &Scene, measure: &dyn TextMeasure) -> Option<String> {
    if scene.is_empty() {
        return None;
    }

    let mut bounds = Bounds::new();
    let mut elements = String::new();

    for item in scene.items() {
        match item {
            ShapeItem::Text { text, pos, color, font_size, font_family, rotation } => {
                let rect = item.bounding_box(measure).expect("text box is measurable");
                let transform = if *rotation != 0.0 {
                    let c = rect.center();
                    format!(" transform=\"rotate({rotation} {} {})\"", c.x, c.y)
                } else {
                    String::new()
                };
                // Text bounds grow by half the font size, mirroring the
                // stroke expansion applied to path items.
                bounds.include(rect.min, font_size / 2.0);
                bounds.include(rect.max, font_size / 2.0);
                let _ = write!(
                    elements,
                    "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" \
                     fill=\"{}\" dominant-baseline=\"middle\"{}>{}</text>",
                    pos.x,
                    pos.y,
                    xml_escape(font_family),
                    font_size,
                    color_hex(*color),
                    transform,
                    xml_escape(text),
                );
            }
            ShapeItem::Freehand { color, stroke_width, rotation, .. }
            | ShapeItem::Shape { color, stroke_width, rotation, .. } => {
                let Some(path) = item.to_polyline() else { continue };
                if path.is_empty() {
                    continue;
                }
                let center = item.rotation_center().unwrap_or(pos2(0.0, 0.0));
                let rotated = *rotation != 0.0;
                for p in &path {
                    let wp = if rotated { rotate_point(*p, center, *rotation) } else { *p };
                    bounds.include(wp, stroke_width / 2.0);
                }
                let transform = if rotated {
                    format!(" transform=\"rotate({rotation} {} {})\"", center.x, center.y)
                } else {
                    String::new()
                };
                let d = path_data(item, &path);
                let _ = write!(
                    elements,
                    "<path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"none\" \
                     stroke-linecap=\"round\" stroke-linejoin=\"round\"{} />",
                    d,
                    color_hex(*color),
                    stroke_width,
                    transform,
                );
            }
        }
    }

    if !bounds.any {
        return None;
    }

    let width = (bounds.max_x - bounds.min_x + 2.0 * VIEWBOX_PADDING).max(1.0);
    let height = (bounds.max_y - bounds.min_y + 2.0 * VIEWBOX_PADDING).max(1.0);
    Some(format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"{} {} {width} {height}\">{elements}</svg>",
        bounds.min_x - VIEWBOX_PADDING,
        bounds.min_y - VIEWBOX_PADDING,
    ))
}

/// The `d` attribute for a path item. Arrows render as two sub-paths so the
/// barbs do not connect back to the shaft start.
fn path_data(item: &ShapeItem, path: &[Pos2]) -> String {
    let is_arrow = matches!(item, ShapeItem::Shape { kind: ShapeKind::Arrow, .. });
    if is_arrow && path.len() == 5 {
        return format!(
            "M {} {} L {} {} M {} {} L {} {} L {} {}",
            path[0].x, path[0].y, path[1].x, path[1].y, path[2].x, path[2].y, path[1].x,
            path[1].y, path[4].x, path[4].y,
        );
    }
    let mut d = format!("M {} {}", path[0].x, path[0].y);
    for p in &path[1..] {
        let _ = write!(d, " L {} {}", p.x, p.y);
    }
    d
}

fn color_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Escape the XML special characters for element text and attribute values.
fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

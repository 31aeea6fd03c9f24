use egui::{Color32, Pos2, Rect, pos2};

use crate::geometry::rotate_point;

/// Number of samples used when flattening an ellipse into a polyline.
pub const ELLIPSE_SEGMENTS: usize = 50;
/// Arrow head length is 40% of the shaft, capped at this many pixels.
pub const ARROW_HEAD_MAX: f32 = 15.0;

/// Parametric shapes described by a start and an end corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Square,
    Ellipse,
    Line,
    Arrow,
    ChevronLeft,
    ChevronRight,
}

impl ShapeKind {
    /// Line-like shapes are hit-tested and resized by their endpoints rather
    /// than by bounding box.
    pub fn is_line_like(self) -> bool {
        matches!(self, Self::Line | Self::Arrow)
    }
}

/// One drawable object in the scene.
///
/// `rotation` is in degrees, applied about [`ShapeItem::rotation_center`].
/// `center` is the lazily cached rotation center, written by the interaction
/// controller when the item is first selected.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeItem {
    Freehand {
        path: Vec<Pos2>,
        color: Color32,
        stroke_width: f32,
        rotation: f32,
        center: Option<Pos2>,
    },
    Shape {
        kind: ShapeKind,
        start: Pos2,
        end: Pos2,
        color: Color32,
        stroke_width: f32,
        rotation: f32,
        center: Option<Pos2>,
    },
    Text {
        text: String,
        pos: Pos2,
        color: Color32,
        font_size: f32,
        font_family: String,
        rotation: f32,
    },
}

/// Width measurement for label text, injected so the model, the exporter and
/// the tests do not depend on a live font atlas.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> f32;
}

/// Font-metrics-free fallback: average glyph advance of 0.6 em.
pub struct HeuristicTextMeasure;

impl TextMeasure for HeuristicTextMeasure {
    fn text_width(&self, text: &str, font_size: f32, _font_family: &str) -> f32 {
        text.chars().count() as f32 * font_size * 0.6
    }
}

impl ShapeItem {
    pub fn rotation(&self) -> f32 {
        match self {
            Self::Freehand { rotation, .. }
            | Self::Shape { rotation, .. }
            | Self::Text { rotation, .. } => *rotation,
        }
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        match self {
            Self::Freehand { rotation, .. }
            | Self::Shape { rotation, .. }
            | Self::Text { rotation, .. } => *rotation = degrees,
        }
    }

    /// True for line and arrow items, which get endpoint handles instead of a
    /// bounding-box selection.
    pub fn is_line_like(&self) -> bool {
        matches!(self, Self::Shape { kind, .. } if kind.is_line_like())
    }

    /// The endpoints of a line-like item, if this is one.
    pub fn endpoints(&self) -> Option<(Pos2, Pos2)> {
        match self {
            Self::Shape { kind, start, end, .. } if kind.is_line_like() => Some((*start, *end)),
            _ => None,
        }
    }

    /// The cached rotation center, if one has been assigned.
    pub fn stored_center(&self) -> Option<Pos2> {
        match self {
            Self::Freehand { center, .. } | Self::Shape { center, .. } => *center,
            Self::Text { .. } => None,
        }
    }

    pub fn set_center(&mut self, new_center: Pos2) {
        match self {
            Self::Freehand { center, .. } | Self::Shape { center, .. } => {
                *center = Some(new_center);
            }
            Self::Text { .. } => {}
        }
    }

    /// The point the item rotates about: the cached center when one exists,
    /// the endpoint midpoint for parametric shapes, and the unrotated path
    /// bounding-box center for freehand strokes. Text rotates about its
    /// bounding-box center, which requires measurement and is handled by the
    /// callers that have a [`TextMeasure`] at hand.
    pub fn rotation_center(&self) -> Option<Pos2> {
        if let Some(center) = self.stored_center() {
            return Some(center);
        }
        match self {
            Self::Shape { start, end, .. } => {
                Some(pos2((start.x + end.x) / 2.0, (start.y + end.y) / 2.0))
            }
            Self::Freehand { path, .. } => path_center(path),
            Self::Text { .. } => None,
        }
    }

    /// Flatten the item into an ordered vertex list. Text is not
    /// path-representable and yields `None`.
    pub fn to_polyline(&self) -> Option<Vec<Pos2>> {
        match self {
            Self::Freehand { path, .. } => Some(path.clone()),
            Self::Shape { kind, start, end, .. } => Some(shape_polyline(*kind, *start, *end)),
            Self::Text { .. } => None,
        }
    }

    /// Axis-aligned bounding box in world space: every vertex is rotated by
    /// the item's rotation before the min/max reduction. Text ignores
    /// rotation and derives its box from measured width and font size.
    pub fn bounding_box(&self, measure: &dyn TextMeasure) -> Option<Rect> {
        match self {
            Self::Text { text, pos, font_size, font_family, .. } => {
                let width = measure.text_width(text, *font_size, font_family);
                let half_height = font_size / 1.5;
                Some(Rect::from_min_max(
                    pos2(pos.x, pos.y - half_height),
                    pos2(pos.x + width, pos.y + half_height),
                ))
            }
            _ => {
                let path = self.to_polyline()?;
                if path.is_empty() {
                    return None;
                }
                let center = self.rotation_center()?;
                let rotation = self.rotation();
                let mut min = pos2(f32::INFINITY, f32::INFINITY);
                let mut max = pos2(f32::NEG_INFINITY, f32::NEG_INFINITY);
                for p in &path {
                    let wp = if rotation != 0.0 {
                        rotate_point(*p, center, rotation)
                    } else {
                        *p
                    };
                    min.x = min.x.min(wp.x);
                    min.y = min.y.min(wp.y);
                    max.x = max.x.max(wp.x);
                    max.y = max.y.max(wp.y);
                }
                Some(Rect::from_min_max(min, max))
            }
        }
    }

    /// Move every coordinate-bearing field to `snapshot + delta`. Computing
    /// from the pre-drag snapshot rather than accumulating increments keeps
    /// repeated move events from drifting.
    pub fn translate_from(&mut self, snapshot: &ShapeItem, delta: egui::Vec2) {
        match (self, snapshot) {
            (Self::Freehand { path, .. }, Self::Freehand { path: orig, .. }) => {
                for (p, o) in path.iter_mut().zip(orig) {
                    *p = *o + delta;
                }
            }
            (
                Self::Shape { start, end, .. },
                Self::Shape { start: orig_start, end: orig_end, .. },
            ) => {
                *start = *orig_start + delta;
                *end = *orig_end + delta;
            }
            (Self::Text { pos, .. }, Self::Text { pos: orig, .. }) => {
                *pos = *orig + delta;
            }
            _ => {}
        }
    }
}

fn path_center(path: &[Pos2]) -> Option<Pos2> {
    let first = path.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in path {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some(pos2((min.x + max.x) / 2.0, (min.y + max.y) / 2.0))
}

fn shape_polyline(kind: ShapeKind, start: Pos2, end: Pos2) -> Vec<Pos2> {
    match kind {
        ShapeKind::Line => vec![start, end],
        ShapeKind::Square => vec![
            start,
            pos2(end.x, start.y),
            end,
            pos2(start.x, end.y),
            start,
        ],
        ShapeKind::Ellipse => {
            let cx = start.x + (end.x - start.x) / 2.0;
            let cy = start.y + (end.y - start.y) / 2.0;
            let rx = (end.x - start.x).abs() / 2.0;
            let ry = (end.y - start.y).abs() / 2.0;
            (0..=ELLIPSE_SEGMENTS)
                .map(|i| {
                    let angle = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
                    pos2(cx + rx * angle.cos(), cy + ry * angle.sin())
                })
                .collect()
        }
        ShapeKind::Arrow => {
            let angle = (end.y - start.y).atan2(end.x - start.x);
            let head = (start.distance(end) * 0.4).min(ARROW_HEAD_MAX);
            let barb = |offset: f32| {
                pos2(
                    end.x - head * (angle + offset).cos(),
                    end.y - head * (angle + offset).sin(),
                )
            };
            // Shaft, then both barbs sharing the tip: draws as two strokes.
            vec![
                start,
                end,
                barb(-std::f32::consts::FRAC_PI_6),
                end,
                barb(std::f32::consts::FRAC_PI_6),
            ]
        }
        ShapeKind::ChevronLeft => {
            let mid_y = (start.y + end.y) / 2.0;
            vec![pos2(end.x, start.y), pos2(start.x, mid_y), pos2(end.x, end.y)]
        }
        ShapeKind::ChevronRight => {
            let mid_y = (start.y + end.y) / 2.0;
            vec![start, pos2(end.x, mid_y), pos2(start.x, end.y)]
        }
    }
}

use egui::{CursorIcon, Pos2, pos2};
use log::{debug, info};

use crate::error::SaveError;
use crate::export::scene_to_svg;
use crate::gallery::ExportSink;
use crate::geometry::{densify, is_point_on_segment, rotate_point};
use crate::gizmo::{self, Endpoint};
use crate::item::{ShapeItem, ShapeKind, TextMeasure};
use crate::scene::Scene;

/// Hit tolerance for selecting line-like items.
const LINE_HIT_TOLERANCE: f32 = 10.0;
/// Spacing of converted-shape points so partial erasing looks smooth.
const ERASE_DENSIFY_STEP: f32 = 1.0;

/// The active tool. Orthogonal to the interaction state: the mode says what a
/// pointer press will start, the session says what is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Freehand,
    Square,
    Ellipse,
    Line,
    Arrow,
    ChevronLeft,
    ChevronRight,
    Text,
    Erase,
    Select,
}

impl Mode {
    pub const ALL: [Mode; 10] = [
        Mode::Freehand,
        Mode::Square,
        Mode::Ellipse,
        Mode::Line,
        Mode::Arrow,
        Mode::ChevronLeft,
        Mode::ChevronRight,
        Mode::Text,
        Mode::Erase,
        Mode::Select,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Freehand => "Freehand",
            Mode::Square => "Square",
            Mode::Ellipse => "Ellipse",
            Mode::Line => "Line",
            Mode::Arrow => "Arrow",
            Mode::ChevronLeft => "Chevron left",
            Mode::ChevronRight => "Chevron right",
            Mode::Text => "Text",
            Mode::Erase => "Erase",
            Mode::Select => "Select",
        }
    }

    /// The parametric shape this mode draws, if it is a shape tool.
    fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Mode::Square => Some(ShapeKind::Square),
            Mode::Ellipse => Some(ShapeKind::Ellipse),
            Mode::Line => Some(ShapeKind::Line),
            Mode::Arrow => Some(ShapeKind::Arrow),
            Mode::ChevronLeft => Some(ShapeKind::ChevronLeft),
            Mode::ChevronRight => Some(ShapeKind::ChevronRight),
            _ => None,
        }
    }
}

/// Brush configuration read at the moment an item is committed or an erase
/// radius is needed.
#[derive(Debug, Clone)]
pub struct BrushConfig {
    pub color: egui::Color32,
    pub stroke_width: f32,
    pub font_family: String,
    pub font_size: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            color: egui::Color32::BLACK,
            stroke_width: 4.0,
            font_family: "sans-serif".to_owned(),
            font_size: 24.0,
        }
    }
}

/// Transient interaction session, alive only while a pointer button is held
/// (plus `TextPending`, which blocks until the host resumes with
/// [`Editor::submit_text`]).
#[derive(Debug, Clone)]
enum Session {
    DrawingStroke { path: Vec<Pos2> },
    DrawingShape { kind: ShapeKind, start: Pos2, current: Pos2 },
    Erasing { last: Pos2 },
    Dragging { start: Pos2, snapshot: ShapeItem },
    Resizing { endpoint: Endpoint },
    Rotating { initial_angle: f32 },
    TextPending { pos: Pos2 },
}

/// One modal drawing session: the scene, the active tool, the in-flight
/// interaction and the brush settings. Owned by the hosting view; no global
/// state.
pub struct Editor {
    scene: Scene,
    mode: Mode,
    previous_mode: Mode,
    session: Option<Session>,
    pub brush: BrushConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            mode: Mode::Freehand,
            previous_mode: Mode::Freehand,
            session: None,
            brush: BrushConfig::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch tools. Clears the selection unless switching into `Select`
    /// itself.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!("mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        if mode != Mode::Select {
            self.scene.select(None);
        }
    }

    /// Secondary-click affordance: flip between the eraser and the tool that
    /// was active before it.
    pub fn toggle_erase(&mut self) {
        if matches!(self.mode, Mode::Erase | Mode::Select) {
            self.set_mode(self.previous_mode);
        } else {
            self.previous_mode = self.mode;
            self.set_mode(Mode::Erase);
        }
    }

    /// Drop every item and the selection.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.session = None;
    }

    /// True when no interaction is in flight.
    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    /// The anchor of a pending text prompt, if the editor is blocked on one.
    pub fn pending_text_pos(&self) -> Option<Pos2> {
        match self.session {
            Some(Session::TextPending { pos }) => Some(pos),
            _ => None,
        }
    }

    /// The in-progress freehand path, for preview painting.
    pub fn preview_stroke(&self) -> Option<&[Pos2]> {
        match &self.session {
            Some(Session::DrawingStroke { path }) => Some(path),
            _ => None,
        }
    }

    /// The in-progress parametric shape as a throwaway item, for preview
    /// painting.
    pub fn preview_shape(&self) -> Option<ShapeItem> {
        match &self.session {
            Some(Session::DrawingShape { kind, start, current }) => Some(ShapeItem::Shape {
                kind: *kind,
                start: *start,
                end: *current,
                color: self.brush.color,
                stroke_width: self.brush.stroke_width,
                rotation: 0.0,
                center: None,
            }),
            _ => None,
        }
    }

    /// Pointer cursor for the current mode/session. The eraser uses no OS
    /// cursor; the renderer draws a brush-sized ring instead.
    pub fn cursor_icon(&self) -> CursorIcon {
        match self.session {
            Some(Session::Dragging { .. }) | Some(Session::Rotating { .. }) => {
                return CursorIcon::Grabbing;
            }
            Some(Session::Resizing { .. }) => return CursorIcon::Move,
            _ => {}
        }
        match self.mode {
            Mode::Select => CursorIcon::Default,
            Mode::Text => CursorIcon::Text,
            Mode::Erase => CursorIcon::None,
            _ => CursorIcon::Crosshair,
        }
    }

    pub fn pointer_down(&mut self, pos: Pos2, measure: &dyn TextMeasure) {
        if matches!(self.session, Some(Session::TextPending { .. })) {
            return;
        }
        match self.mode {
            Mode::Select => self.select_pointer_down(pos, measure),
            Mode::Text => {
                self.session = Some(Session::TextPending { pos });
            }
            Mode::Erase => {
                self.session = Some(Session::Erasing { last: pos });
                self.erase_at(pos, measure);
            }
            Mode::Freehand => {
                self.session = Some(Session::DrawingStroke { path: vec![pos] });
            }
            _ => {
                let kind = self.mode.shape_kind().expect("drawing mode has a shape kind");
                self.session = Some(Session::DrawingShape { kind, start: pos, current: pos });
            }
        }
    }

    fn select_pointer_down(&mut self, pos: Pos2, measure: &dyn TextMeasure) {
        // A selected item's handles win over fresh hit-testing.
        if let Some(index) = self.scene.selected() {
            if let Some(item) = self.scene.item(index) {
                if let Some(endpoint) = gizmo::endpoint_handle_at(item, pos) {
                    debug!("resize session on item {index} ({endpoint:?})");
                    self.session = Some(Session::Resizing { endpoint });
                    return;
                }
                if let Some(handle) = gizmo::rotation_handle_pos(item, measure) {
                    if pos.distance(handle) < gizmo::ROTATION_HANDLE_GRAB {
                        if let Some(rect) = item.bounding_box(measure) {
                            let center = rect.center();
                            let initial_angle = (pos.y - center.y).atan2(pos.x - center.x)
                                - item.rotation().to_radians();
                            debug!("rotate session on item {index}");
                            self.session = Some(Session::Rotating { initial_angle });
                            return;
                        }
                    }
                }
            }
        }

        // Topmost first: iterate back-to-front and take the first hit.
        let hit = (0..self.scene.len())
            .rev()
            .find(|&i| self.hit_test(&self.scene.items()[i], pos, measure));

        match hit {
            Some(index) => {
                self.scene.select(Some(index));
                // Cache the rotation center for non-line items so later
                // counter-rotated hit tests and erases agree with what was
                // rendered.
                if let Some(item) = self.scene.item_mut(index) {
                    if !item.is_line_like() {
                        if let Some(rect) = item.bounding_box(measure) {
                            item.set_center(rect.center());
                        }
                    }
                }
                let snapshot = self.scene.item(index).cloned();
                if let Some(snapshot) = snapshot {
                    debug!("drag session on item {index}");
                    self.session = Some(Session::Dragging { start: pos, snapshot });
                }
            }
            None => self.scene.select(None),
        }
    }

    fn hit_test(&self, item: &ShapeItem, pos: Pos2, measure: &dyn TextMeasure) -> bool {
        if let Some((start, end)) = item.endpoints() {
            return is_point_on_segment(pos, start, end, LINE_HIT_TOLERANCE);
        }
        let Some(rect) = item.bounding_box(measure) else {
            return false;
        };
        // Counter-rotate the pointer into the item's local frame before the
        // box test.
        let probe = match (item.rotation(), item.stored_center()) {
            (rotation, Some(center)) if rotation != 0.0 => rotate_point(pos, center, -rotation),
            _ => pos,
        };
        rect.contains(probe)
    }

    pub fn pointer_move(&mut self, pos: Pos2, measure: &dyn TextMeasure) {
        let Some(session) = self.session.take() else {
            return;
        };
        match session {
            Session::Rotating { initial_angle } => {
                if let Some(index) = self.scene.selected() {
                    // The bounding-box center can shift as the item rotates,
                    // so recompute it every move.
                    let center = self
                        .scene
                        .item(index)
                        .and_then(|item| item.bounding_box(measure))
                        .map(|rect| rect.center());
                    if let (Some(center), Some(item)) = (center, self.scene.item_mut(index)) {
                        let angle = (pos.y - center.y).atan2(pos.x - center.x);
                        item.set_rotation((angle - initial_angle).to_degrees());
                    }
                }
                self.session = Some(Session::Rotating { initial_angle });
            }
            Session::Resizing { endpoint } => {
                if let Some(index) = self.scene.selected() {
                    if let Some(ShapeItem::Shape { kind, start, end, .. }) =
                        self.scene.item_mut(index)
                    {
                        if kind.is_line_like() {
                            match endpoint {
                                Endpoint::Start => *start = pos,
                                Endpoint::End => *end = pos,
                            }
                        }
                    }
                }
                self.session = Some(Session::Resizing { endpoint });
            }
            Session::Dragging { start, snapshot } => {
                if let Some(index) = self.scene.selected() {
                    if let Some(item) = self.scene.item_mut(index) {
                        item.translate_from(&snapshot, pos - start);
                    }
                }
                self.session = Some(Session::Dragging { start, snapshot });
            }
            Session::Erasing { last } => {
                // Interpolate sub-steps so a fast sweep leaves no gaps.
                let radius = self.brush.stroke_width;
                let dist = pos.distance(last);
                let steps = ((dist / (radius / 4.0)).floor() as usize).max(1);
                for i in 0..steps {
                    let t = i as f32 / steps as f32;
                    let step = pos2(last.x + (pos.x - last.x) * t, last.y + (pos.y - last.y) * t);
                    self.erase_at(step, measure);
                }
                self.session = Some(Session::Erasing { last: pos });
            }
            Session::DrawingStroke { mut path } => {
                path.push(pos);
                self.session = Some(Session::DrawingStroke { path });
            }
            Session::DrawingShape { kind, start, .. } => {
                self.session = Some(Session::DrawingShape { kind, start, current: pos });
            }
            Session::TextPending { pos: anchor } => {
                self.session = Some(Session::TextPending { pos: anchor });
            }
        }
    }

    pub fn pointer_up(&mut self, pos: Pos2) {
        let Some(session) = self.session.take() else {
            return;
        };
        match session {
            Session::DrawingStroke { path } => {
                // Single-point drags cannot form a visible stroke.
                if path.len() > 1 {
                    info!("committing freehand stroke with {} points", path.len());
                    self.scene.append(ShapeItem::Freehand {
                        path,
                        color: self.brush.color,
                        stroke_width: self.brush.stroke_width,
                        rotation: 0.0,
                        center: None,
                    });
                }
            }
            Session::DrawingShape { kind, start, .. } => {
                info!("committing {kind:?}");
                self.scene.append(ShapeItem::Shape {
                    kind,
                    start,
                    end: pos,
                    color: self.brush.color,
                    stroke_width: self.brush.stroke_width,
                    rotation: 0.0,
                    center: None,
                });
            }
            // Text commits through submit_text, not pointer release.
            Session::TextPending { pos: anchor } => {
                self.session = Some(Session::TextPending { pos: anchor });
            }
            Session::Erasing { .. }
            | Session::Dragging { .. }
            | Session::Resizing { .. }
            | Session::Rotating { .. } => {}
        }
    }

    /// Resume from the `TextPending` sub-state. `None` or an empty string
    /// cancels without creating anything.
    pub fn submit_text(&mut self, text: Option<String>) {
        let Some(Session::TextPending { pos }) = self.session.take() else {
            return;
        };
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return;
        };
        info!("committing text label ({} chars)", text.len());
        self.scene.append(ShapeItem::Text {
            text,
            pos,
            color: self.brush.color,
            font_size: self.brush.font_size,
            font_family: self.brush.font_family.clone(),
            rotation: 0.0,
        });
    }

    /// Apply one erase operation at `pos`, radius = current brush width.
    ///
    /// Back-to-front over the store: text items are deleted whole when the
    /// point lands in their box; parametric shapes are first rasterized into
    /// a dense freehand path so they can be partially erased; freehand paths
    /// are split into the maximal runs of points outside the eraser radius.
    /// Returns whether anything changed.
    pub fn erase_at(&mut self, pos: Pos2, measure: &dyn TextMeasure) -> bool {
        let radius = self.brush.stroke_width;
        let mut erased = false;

        let mut i = self.scene.len();
        while i > 0 {
            i -= 1;

            let item = self.scene.item(i).expect("index in range");

            if let ShapeItem::Text { .. } = item {
                let hit = item
                    .bounding_box(measure)
                    .is_some_and(|rect| rect.contains(pos));
                if hit {
                    self.scene.remove_at(i);
                    erased = true;
                }
                continue;
            }

            // Rasterize parametric shapes in place so the splitting below
            // treats every path-bearing item alike. Rotation and center are
            // carried over; the path itself stays in the local frame.
            if let ShapeItem::Shape { color, stroke_width, rotation, center, .. } = item {
                let (color, stroke_width, rotation, center) =
                    (*color, *stroke_width, *rotation, *center);
                let path = item.to_polyline().expect("shapes are path-bearing");
                self.scene.replace_at(
                    i,
                    ShapeItem::Freehand {
                        path: densify(&path, ERASE_DENSIFY_STEP),
                        color,
                        stroke_width,
                        rotation,
                        center,
                    },
                );
            }

            let Some(ShapeItem::Freehand { path, .. }) = self.scene.item(i) else {
                continue;
            };

            // Partition into maximal runs of points outside the eraser.
            let mut modified = false;
            let mut fragments: Vec<Vec<Pos2>> = Vec::new();
            let mut run: Vec<Pos2> = Vec::new();
            for &point in path {
                if point.distance(pos) < radius {
                    modified = true;
                    if run.len() > 1 {
                        fragments.push(std::mem::take(&mut run));
                    } else {
                        run.clear();
                    }
                } else {
                    run.push(point);
                }
            }
            if run.len() > 1 {
                fragments.push(run);
            }

            if modified {
                erased = true;
                let template = self.scene.item(i).expect("index in range").clone();
                let replacements: Vec<ShapeItem> = fragments
                    .into_iter()
                    .map(|fragment| {
                        let mut piece = template.clone();
                        if let ShapeItem::Freehand { path, .. } = &mut piece {
                            *path = fragment;
                        }
                        piece
                    })
                    .collect();
                debug!("erase split item {i} into {} fragment(s)", replacements.len());
                self.scene.replace_range(i, 1, replacements);
            }
        }

        erased
    }

    /// Serialize the scene and hand it to the export sink. The scene is left
    /// intact on every error path so the user can retry.
    pub fn finish(
        &self,
        measure: &dyn TextMeasure,
        sink: Option<&mut dyn ExportSink>,
    ) -> Result<(), SaveError> {
        let svg = scene_to_svg(&self.scene, measure).ok_or(SaveError::NothingDrawn)?;
        let sink = sink.ok_or(SaveError::SinkUnavailable)?;
        sink.save_svg(&svg)?;
        info!("saved drawing ({} items, {} bytes of svg)", self.scene.len(), svg.len());
        Ok(())
    }
}

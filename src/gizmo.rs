//! Geometry for the selection affordances: endpoint handles on line-like
//! items and the rotation grip drawn above every selected item.

use egui::{Color32, Pos2, pos2};

use crate::geometry::rotate_point;
use crate::item::{ShapeItem, TextMeasure};

/// Radius of the drawn endpoint handles.
pub const RESIZE_HANDLE_SIZE: f32 = 8.0;
/// Extra grab slop beyond the drawn handle radius.
pub const RESIZE_HANDLE_SLOP: f32 = 5.0;
/// Radius of the drawn rotation grip.
pub const ROTATION_HANDLE_SIZE: f32 = 8.0;
/// Grab radius around the rotation grip.
pub const ROTATION_HANDLE_GRAB: f32 = 15.0;
/// The grip sits this far above the bounding-box top.
pub const ROTATION_HANDLE_OFFSET: f32 = 20.0;

pub const HANDLE_FILL: Color32 = Color32::from_rgba_premultiplied(0, 135, 230, 230);
pub const HANDLE_OUTLINE: Color32 = Color32::WHITE;
pub const SELECTION_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 105, 178, 178);

/// Which end of a line-like item a resize session is dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

/// The endpoints of a line-like item rotated into world space about their
/// midpoint.
pub fn rotated_endpoints(item: &ShapeItem) -> Option<(Pos2, Pos2)> {
    let (start, end) = item.endpoints()?;
    let center = pos2((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
    let rotation = item.rotation();
    Some((
        rotate_point(start, center, rotation),
        rotate_point(end, center, rotation),
    ))
}

/// Hit-test the endpoint handles of a line-like item.
pub fn endpoint_handle_at(item: &ShapeItem, pos: Pos2) -> Option<Endpoint> {
    let (start, end) = rotated_endpoints(item)?;
    let grab = RESIZE_HANDLE_SIZE + RESIZE_HANDLE_SLOP;
    if pos.distance(start) < grab {
        Some(Endpoint::Start)
    } else if pos.distance(end) < grab {
        Some(Endpoint::End)
    } else {
        None
    }
}

/// Position of the rotation grip: 20px above the top of the world-space
/// bounding box, rotated with the item about the box center.
pub fn rotation_handle_pos(item: &ShapeItem, measure: &dyn TextMeasure) -> Option<Pos2> {
    let rect = item.bounding_box(measure)?;
    let center = rect.center();
    let unrotated = pos2(center.x, rect.min.y - ROTATION_HANDLE_OFFSET);
    Some(rotate_point(unrotated, center, item.rotation()))
}

use eframe_sketch::item::{HeuristicTextMeasure, ShapeItem, ShapeKind};
use egui::{Color32, pos2};

fn shape(kind: ShapeKind, start: (f32, f32), end: (f32, f32)) -> ShapeItem {
    ShapeItem::Shape {
        kind,
        start: pos2(start.0, start.1),
        end: pos2(end.0, end.1),
        color: Color32::BLACK,
        stroke_width: 2.0,
        rotation: 0.0,
        center: None,
    }
}

#[test]
fn square_polyline_is_closed_with_five_points() {
    let item = shape(ShapeKind::Square, (0.0, 0.0), (10.0, 10.0));
    let path = item.to_polyline().unwrap();
    assert_eq!(path.len(), 5);
    assert_eq!(path[0], path[4]);
    assert_eq!(path[1], pos2(10.0, 0.0));
    assert_eq!(path[3], pos2(0.0, 10.0));

    let rect = item.bounding_box(&HeuristicTextMeasure).unwrap();
    assert_eq!(rect.min, pos2(0.0, 0.0));
    assert_eq!(rect.max, pos2(10.0, 10.0));
}

#[test]
fn ellipse_polyline_has_51_samples() {
    let item = shape(ShapeKind::Ellipse, (0.0, 0.0), (20.0, 10.0));
    let path = item.to_polyline().unwrap();
    assert_eq!(path.len(), 51);
    // Closed: last sample returns to the first.
    assert!(path[0].distance(path[50]) < 1e-3);
    // Radii are half the corner box.
    assert!((path[0].x - 20.0).abs() < 1e-3);
    assert!((path[0].y - 5.0).abs() < 1e-3);
}

#[test]
fn line_polyline_is_the_two_endpoints() {
    let item = shape(ShapeKind::Line, (1.0, 2.0), (3.0, 4.0));
    assert_eq!(item.to_polyline().unwrap(), vec![pos2(1.0, 2.0), pos2(3.0, 4.0)]);
}

#[test]
fn arrow_polyline_shares_the_tip() {
    let item = shape(ShapeKind::Arrow, (0.0, 0.0), (100.0, 0.0));
    let path = item.to_polyline().unwrap();
    assert_eq!(path.len(), 5);
    assert_eq!(path[0], pos2(0.0, 0.0));
    assert_eq!(path[1], pos2(100.0, 0.0));
    assert_eq!(path[3], path[1]);
    // Head length caps at 15 with 30 degree barbs.
    let expected_x = 100.0 - 15.0 * (30.0_f32).to_radians().cos();
    assert!((path[2].x - expected_x).abs() < 1e-3);
    assert!((path[2].y - 7.5).abs() < 1e-3);
    assert!((path[4].y + 7.5).abs() < 1e-3);
}

#[test]
fn short_arrow_head_scales_with_shaft() {
    let item = shape(ShapeKind::Arrow, (0.0, 0.0), (10.0, 0.0));
    let path = item.to_polyline().unwrap();
    // 40% of a 10px shaft, below the 15px cap.
    let head = path[1].distance(path[2]);
    assert!((head - 4.0).abs() < 1e-3);
}

#[test]
fn chevrons_bend_at_mid_height() {
    let left = shape(ShapeKind::ChevronLeft, (0.0, 0.0), (10.0, 20.0));
    assert_eq!(
        left.to_polyline().unwrap(),
        vec![pos2(10.0, 0.0), pos2(0.0, 10.0), pos2(10.0, 20.0)]
    );
    let right = shape(ShapeKind::ChevronRight, (0.0, 0.0), (10.0, 20.0));
    assert_eq!(
        right.to_polyline().unwrap(),
        vec![pos2(0.0, 0.0), pos2(10.0, 10.0), pos2(0.0, 20.0)]
    );
}

#[test]
fn text_is_not_path_representable() {
    let item = ShapeItem::Text {
        text: "Label".to_owned(),
        pos: pos2(10.0, 10.0),
        color: Color32::BLACK,
        font_size: 24.0,
        font_family: "sans-serif".to_owned(),
        rotation: 0.0,
    };
    assert!(item.to_polyline().is_none());

    let rect = item.bounding_box(&HeuristicTextMeasure).unwrap();
    // Heuristic width: 5 chars * 24 * 0.6.
    assert!((rect.width() - 72.0).abs() < 1e-3);
    // Height spans font_size / 1.5 above and below the anchor.
    assert!((rect.height() - 32.0).abs() < 1e-3);
    assert_eq!(rect.min.x, 10.0);
}

#[test]
fn rotated_bounding_box_is_world_space() {
    let mut item = shape(ShapeKind::Square, (0.0, 0.0), (10.0, 10.0));
    item.set_rotation(45.0);
    let rect = item.bounding_box(&HeuristicTextMeasure).unwrap();
    // A 10x10 square rotated 45 degrees spans 10*sqrt(2) on both axes.
    let diag = 10.0 * 2.0_f32.sqrt();
    assert!((rect.width() - diag).abs() < 1e-3);
    assert!((rect.height() - diag).abs() < 1e-3);
    // Center stays put.
    assert!((rect.center().x - 5.0).abs() < 1e-3);
    assert!((rect.center().y - 5.0).abs() < 1e-3);
}

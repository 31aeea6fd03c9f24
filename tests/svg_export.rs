use eframe_sketch::editor::{Editor, Mode};
use eframe_sketch::error::SaveError;
use eframe_sketch::export::scene_to_svg;
use eframe_sketch::gallery::ExportSink;
use eframe_sketch::item::{HeuristicTextMeasure, ShapeItem, ShapeKind};
use eframe_sketch::scene::Scene;
use egui::{Color32, pos2};

const M: HeuristicTextMeasure = HeuristicTextMeasure;

struct CaptureSink(Option<String>);

impl ExportSink for CaptureSink {
    fn save_svg(&mut self, svg: &str) -> Result<(), SaveError> {
        self.0 = Some(svg.to_owned());
        Ok(())
    }
}

fn square(start: (f32, f32), end: (f32, f32), stroke_width: f32) -> ShapeItem {
    ShapeItem::Shape {
        kind: ShapeKind::Square,
        start: pos2(start.0, start.1),
        end: pos2(end.0, end.1),
        color: Color32::BLACK,
        stroke_width,
        rotation: 0.0,
        center: None,
    }
}

#[test]
fn empty_scene_exports_nothing() {
    assert!(scene_to_svg(&Scene::new(), &M).is_none());
}

#[test]
fn square_viewbox_is_tight_plus_stroke_and_padding() {
    let mut scene = Scene::new();
    scene.append(square((0.0, 0.0), (10.0, 10.0), 2.0));
    let svg = scene_to_svg(&scene, &M).unwrap();

    // 10 content + 1 half-stroke per side + 20 padding per side.
    assert!(svg.contains("viewBox=\"-21 -21 52 52\""), "svg: {svg}");
    assert!(svg.contains("width=\"52\""));
    assert!(svg.contains("height=\"52\""));
    assert!(svg.contains("stroke=\"#000000\""));
    assert!(svg.contains("stroke-width=\"2\""));
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
}

#[test]
fn unrotated_items_carry_no_transform() {
    let mut scene = Scene::new();
    scene.append(square((0.0, 0.0), (10.0, 10.0), 2.0));
    let svg = scene_to_svg(&scene, &M).unwrap();
    assert!(!svg.contains("transform="));
}

#[test]
fn rotated_line_gets_a_rotate_transform_about_its_midpoint() {
    let mut scene = Scene::new();
    scene.append(ShapeItem::Shape {
        kind: ShapeKind::Line,
        start: pos2(0.0, 0.0),
        end: pos2(100.0, 0.0),
        color: Color32::BLACK,
        stroke_width: 2.0,
        rotation: 90.0,
        center: None,
    });
    let svg = scene_to_svg(&scene, &M).unwrap();
    assert!(svg.contains("transform=\"rotate(90 50 0)\""), "svg: {svg}");
    // The viewBox tracks the rotated points: a vertical span of 100. The
    // rotated coordinates carry float noise, so parse rather than compare
    // strings.
    let start = svg.find("viewBox=\"").unwrap() + 9;
    let end = svg[start..].find('"').unwrap() + start;
    let nums: Vec<f32> = svg[start..end]
        .split_whitespace()
        .map(|n| n.parse().unwrap())
        .collect();
    let expected = [29.0, -71.0, 42.0, 142.0];
    for (got, want) in nums.iter().zip(expected) {
        assert!((got - want).abs() < 1e-3, "viewBox: {:?}", nums);
    }
}

#[test]
fn arrow_exports_as_two_sub_paths() {
    let mut scene = Scene::new();
    scene.append(ShapeItem::Shape {
        kind: ShapeKind::Arrow,
        start: pos2(0.0, 0.0),
        end: pos2(100.0, 0.0),
        color: Color32::BLACK,
        stroke_width: 2.0,
        rotation: 0.0,
        center: None,
    });
    let svg = scene_to_svg(&scene, &M).unwrap();
    let d_start = svg.find("d=\"").unwrap() + 3;
    let d_end = svg[d_start..].find('"').unwrap() + d_start;
    let d = &svg[d_start..d_end];
    assert_eq!(d.matches("M ").count(), 2, "d: {d}");
    assert!(d.starts_with("M 0 0 L 100 0 M "));
}

#[test]
fn text_is_escaped_and_styled() {
    let mut scene = Scene::new();
    scene.append(ShapeItem::Text {
        text: "a<b & \"c\"".to_owned(),
        pos: pos2(10.0, 20.0),
        color: Color32::from_rgb(255, 0, 0),
        font_size: 24.0,
        font_family: "sans-serif".to_owned(),
        rotation: 0.0,
    });
    let svg = scene_to_svg(&scene, &M).unwrap();
    assert!(svg.contains(">a&lt;b &amp; &quot;c&quot;</text>"), "svg: {svg}");
    assert!(svg.contains("fill=\"#ff0000\""));
    assert!(svg.contains("font-size=\"24\""));
    assert!(svg.contains("dominant-baseline=\"middle\""));
}

#[test]
fn finish_requires_content_and_a_sink() {
    let editor = Editor::new();
    let mut sink = CaptureSink(None);
    // Empty canvas: distinct error, sink untouched.
    match editor.finish(&M, Some(&mut sink)) {
        Err(SaveError::NothingDrawn) => {}
        other => panic!("expected NothingDrawn, got {other:?}"),
    }
    assert!(sink.0.is_none());

    let mut editor = Editor::new();
    editor.set_mode(Mode::Square);
    editor.pointer_down(pos2(0.0, 0.0), &M);
    editor.pointer_up(pos2(10.0, 10.0));

    // Missing sink: the drawing is preserved for a retry.
    match editor.finish(&M, None) {
        Err(SaveError::SinkUnavailable) => {}
        other => panic!("expected SinkUnavailable, got {other:?}"),
    }
    assert_eq!(editor.scene().len(), 1);

    editor.finish(&M, Some(&mut sink)).unwrap();
    let svg = sink.0.expect("sink received the svg");
    assert!(svg.starts_with("<svg "));
}

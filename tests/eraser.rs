use eframe_sketch::editor::{Editor, Mode};
use eframe_sketch::item::{HeuristicTextMeasure, ShapeItem};
use egui::{Color32, pos2};

const M: HeuristicTextMeasure = HeuristicTextMeasure;

fn editor_with_freehand(points: Vec<egui::Pos2>) -> Editor {
    let mut editor = Editor::new();
    editor.set_mode(Mode::Freehand);
    editor.pointer_down(points[0], &M);
    for p in &points[1..] {
        editor.pointer_move(*p, &M);
    }
    editor.pointer_up(*points.last().unwrap());
    editor
}

#[test]
fn erasing_a_whole_path_empties_the_store() {
    // Both points sit inside a radius-30 eraser at the midpoint, and both
    // survivor runs are shorter than two points.
    let mut editor = editor_with_freehand(vec![pos2(0.0, 0.0), pos2(50.0, 0.0)]);
    editor.brush.stroke_width = 30.0;
    editor.set_mode(Mode::Erase);
    editor.pointer_down(pos2(25.0, 0.0), &M);
    editor.pointer_up(pos2(25.0, 0.0));
    assert!(editor.scene().is_empty());
}

#[test]
fn erasing_the_middle_leaves_two_fragments() {
    let points: Vec<egui::Pos2> = (0..=100).map(|x| pos2(x as f32, 0.0)).collect();
    let mut editor = editor_with_freehand(points);
    editor.brush.stroke_width = 5.0;
    editor.set_mode(Mode::Erase);
    assert!(editor.erase_at(pos2(50.0, 0.0), &M));

    assert_eq!(editor.scene().len(), 2);
    let paths: Vec<&Vec<egui::Pos2>> = editor
        .scene()
        .items()
        .iter()
        .map(|item| match item {
            ShapeItem::Freehand { path, .. } => path,
            other => panic!("unexpected item {other:?}"),
        })
        .collect();
    // Points within distance 5 of x=50 are gone: 46..=54.
    assert_eq!(*paths[0].last().unwrap(), pos2(45.0, 0.0));
    assert_eq!(paths[1][0], pos2(55.0, 0.0));
}

#[test]
fn lone_surviving_points_are_dropped() {
    // Middle point survives alone between two erased neighbors.
    let mut editor = editor_with_freehand(vec![
        pos2(0.0, 0.0),
        pos2(10.0, 0.0),
        pos2(20.0, 0.0),
        pos2(30.0, 0.0),
        pos2(40.0, 0.0),
    ]);
    editor.brush.stroke_width = 4.0;
    editor.set_mode(Mode::Erase);
    assert!(editor.erase_at(pos2(10.0, 0.0), &M));
    assert!(editor.erase_at(pos2(30.0, 0.0), &M));

    // Runs [0], [20] and [40] all have fewer than two points.
    assert!(editor.scene().is_empty());
}

#[test]
fn shapes_convert_to_dense_freehand_before_erasing() {
    let mut editor = Editor::new();
    editor.brush.color = Color32::RED;
    editor.brush.stroke_width = 3.0;
    editor.set_mode(Mode::Square);
    editor.pointer_down(pos2(0.0, 0.0), &M);
    editor.pointer_move(pos2(10.0, 10.0), &M);
    editor.pointer_up(pos2(10.0, 10.0));

    editor.set_mode(Mode::Erase);
    // Nothing is within reach, but the pass still rasterizes the shape.
    assert!(!editor.erase_at(pos2(1000.0, 1000.0), &M));

    match &editor.scene().items()[0] {
        ShapeItem::Freehand { path, color, stroke_width, rotation, .. } => {
            // Densified at step 1: every segment at most 1 apart, style kept.
            assert!(path.len() >= 40);
            for pair in path.windows(2) {
                assert!(pair[0].distance(pair[1]) <= 1.0 + 1e-4);
            }
            assert_eq!(*color, Color32::RED);
            assert_eq!(*stroke_width, 3.0);
            assert_eq!(*rotation, 0.0);
        }
        other => panic!("unexpected item {other:?}"),
    }
}

#[test]
fn converted_shape_keeps_rotation_and_center() {
    let mut editor = Editor::new();
    editor.set_mode(Mode::Square);
    editor.pointer_down(pos2(0.0, 0.0), &M);
    editor.pointer_up(pos2(10.0, 10.0));

    // Select and rotate so the item carries a cached center.
    editor.set_mode(Mode::Select);
    editor.pointer_down(pos2(5.0, 5.0), &M);
    editor.pointer_up(pos2(5.0, 5.0));
    editor.pointer_down(pos2(5.0, -15.0), &M);
    editor.pointer_move(pos2(25.0, 5.0), &M);
    editor.pointer_up(pos2(25.0, 5.0));
    let rotation = editor.scene().items()[0].rotation();
    assert!(rotation.abs() > 1.0);

    editor.set_mode(Mode::Erase);
    editor.brush.stroke_width = 2.0;
    editor.erase_at(pos2(1000.0, 1000.0), &M);

    let item = &editor.scene().items()[0];
    assert!(matches!(item, ShapeItem::Freehand { .. }));
    // The densified path stays in the local frame; rotation and center ride
    // along and are re-applied on redraw.
    assert!((item.rotation() - rotation).abs() < 1e-3);
    assert_eq!(item.stored_center(), Some(pos2(5.0, 5.0)));
}

#[test]
fn text_is_erased_whole() {
    let mut editor = Editor::new();
    editor.set_mode(Mode::Text);
    editor.pointer_down(pos2(10.0, 10.0), &M);
    editor.submit_text(Some("Hi".to_owned()));
    assert_eq!(editor.scene().len(), 1);

    editor.set_mode(Mode::Erase);
    editor.brush.stroke_width = 1.0;
    // Inside the text box: the whole label goes at once.
    assert!(editor.erase_at(pos2(20.0, 10.0), &M));
    assert!(editor.scene().is_empty());
}

#[test]
fn erase_miss_changes_nothing() {
    let mut editor = editor_with_freehand(vec![pos2(0.0, 0.0), pos2(50.0, 0.0)]);
    editor.brush.stroke_width = 5.0;
    editor.set_mode(Mode::Erase);
    assert!(!editor.erase_at(pos2(200.0, 200.0), &M));
    assert_eq!(editor.scene().len(), 1);
}

#[test]
fn erase_sweep_interpolates_between_events() {
    // A dense stroke crossing the sweep path between two far-apart move
    // events still gets hit by the interpolated sub-steps.
    let points: Vec<egui::Pos2> = (-40..=40).map(|y| pos2(50.0, y as f32)).collect();
    let mut editor = editor_with_freehand(points);
    editor.brush.stroke_width = 8.0;
    editor.set_mode(Mode::Erase);
    editor.pointer_down(pos2(0.0, 0.0), &M);
    editor.pointer_move(pos2(100.0, 0.0), &M);
    editor.pointer_up(pos2(100.0, 0.0));

    // The endpoints at y = +/-40 are outside every step's radius, so the
    // stroke splits rather than disappears.
    assert_eq!(editor.scene().len(), 2);
}

#[test]
fn shape_kind_survives_conversion_only_as_geometry() {
    let mut editor = Editor::new();
    editor.set_mode(Mode::Line);
    editor.pointer_down(pos2(0.0, 0.0), &M);
    editor.pointer_up(pos2(100.0, 0.0));

    editor.set_mode(Mode::Erase);
    editor.brush.stroke_width = 10.0;
    assert!(editor.erase_at(pos2(50.0, 0.0), &M));

    // The line is now two freehand fragments, split around x=50.
    assert_eq!(editor.scene().len(), 2);
    for item in editor.scene().items() {
        assert!(matches!(item, ShapeItem::Freehand { .. }));
        assert!(item.endpoints().is_none());
    }
}

//! Tests for the canvas component driven through pointer events.

use std::cell::RefCell;
use std::rc::Rc;

use heliobox_raster::{Color, RasterImage};

use super::AnnotationCanvas;
use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::interaction::{CursorStyle, Gesture, PointerOutcome};
use crate::model::{AnnotationBox, BoundingRect, ClassTable, GridLine, GridOverlay, Point};
use crate::render::SceneRenderer;

type Published = Rc<RefCell<Vec<Vec<AnnotationBox>>>>;

/// Canvas without font loading, recording every published list.
fn create_canvas() -> (AnnotationCanvas, Published) {
    let renderer = SceneRenderer::without_text(CanvasConfig::default());
    let mut canvas = AnnotationCanvas::with_renderer(renderer, ClassTable::sunspot_default());
    let published: Published = Rc::default();
    let sink = Rc::clone(&published);
    canvas.set_on_change(move |boxes| sink.borrow_mut().push(boxes.to_vec()));
    (canvas, published)
}

fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> BoundingRect {
    BoundingRect::new(x, y, w, h)
}

fn drag(canvas: &mut AnnotationCanvas, from: Point, to: Point) -> PointerOutcome {
    canvas.pointer_down(from).unwrap();
    canvas.pointer_move(to);
    canvas.pointer_up(to)
}

#[test]
fn test_draw_move_then_draw_without_class() {
    let (mut canvas, published) = create_canvas();
    canvas.select_class(Some("A")).unwrap();

    // Draw (100,100) -> (180,160)
    assert_eq!(drag(&mut canvas, p(100.0, 100.0), p(180.0, 160.0)), PointerOutcome::Commit);
    assert_eq!(
        canvas.boxes(),
        &[AnnotationBox::new("A", rect(100.0, 100.0, 80.0, 60.0))]
    );

    // Drag the body by (+20, 0)
    assert_eq!(drag(&mut canvas, p(140.0, 130.0), p(160.0, 130.0)), PointerOutcome::Commit);
    assert_eq!(
        canvas.boxes(),
        &[AnnotationBox::new("A", rect(120.0, 100.0, 80.0, 60.0))]
    );

    // Empty area with no class selected
    canvas.select_class(None).unwrap();
    let before = canvas.boxes().to_vec();
    assert_eq!(
        canvas.pointer_down(p(400.0, 400.0)),
        Err(CanvasError::NoClassSelected)
    );
    assert_eq!(canvas.pointer_up(p(450.0, 450.0)), PointerOutcome::Unchanged);
    assert_eq!(canvas.boxes(), before.as_slice());
    assert_eq!(canvas.gesture(), &Gesture::Idle);

    assert_eq!(published.borrow().len(), 2);
}

#[test]
fn test_publishes_only_at_gesture_boundaries() {
    let (mut canvas, published) = create_canvas();
    canvas.set_boxes(vec![AnnotationBox::new("B", rect(10.0, 10.0, 40.0, 40.0))]);
    assert!(published.borrow().is_empty());

    canvas.pointer_down(p(30.0, 30.0)).unwrap();
    for x in [32.0, 34.0, 36.0] {
        canvas.pointer_move(p(x, 30.0));
    }
    assert!(published.borrow().is_empty());

    canvas.pointer_up(p(36.0, 30.0));
    let published = published.borrow();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0][0].rect, rect(16.0, 10.0, 40.0, 40.0));
}

#[test]
fn test_discarded_draw_not_published() {
    let (mut canvas, published) = create_canvas();
    canvas.select_class(Some("C")).unwrap();
    assert_eq!(drag(&mut canvas, p(10.0, 10.0), p(15.0, 60.0)), PointerOutcome::Discarded);
    assert!(canvas.boxes().is_empty());
    assert!(published.borrow().is_empty());
}

#[test]
fn test_leave_finishes_move() {
    let (mut canvas, published) = create_canvas();
    canvas.set_boxes(vec![AnnotationBox::new("B", rect(10.0, 10.0, 40.0, 40.0))]);
    canvas.pointer_down(p(30.0, 30.0)).unwrap();
    canvas.pointer_move(p(50.0, 40.0));

    assert_eq!(canvas.pointer_leave(), PointerOutcome::Commit);
    assert_eq!(canvas.gesture(), &Gesture::Idle);
    assert_eq!(canvas.hovered(), None);
    assert_eq!(canvas.boxes()[0].rect, rect(30.0, 20.0, 40.0, 40.0));
    assert_eq!(published.borrow().len(), 1);
}

#[test]
fn test_edit_clears_proposal_confidence() {
    let (mut canvas, published) = create_canvas();
    canvas.set_boxes(vec![
        AnnotationBox::new("D", rect(10.0, 10.0, 40.0, 40.0)).with_confidence(0.9),
        AnnotationBox::new("E", rect(100.0, 100.0, 40.0, 40.0)).with_confidence(0.8),
    ]);

    // Click without moving
    canvas.pointer_down(p(30.0, 30.0)).unwrap();
    canvas.pointer_up(p(30.0, 30.0));

    assert_eq!(canvas.boxes()[0].confidence, None);
    assert_eq!(canvas.boxes()[0].rect, rect(10.0, 10.0, 40.0, 40.0));
    assert_eq!(canvas.boxes()[1].confidence, Some(0.8));
    assert_eq!(published.borrow()[0][0].confidence, None);
}

#[test]
fn test_set_boxes_sanitizes_input() {
    let (mut canvas, _) = create_canvas();
    let mut clamped = AnnotationBox::new("A", rect(0.0, 0.0, 20.0, 20.0));
    clamped.confidence = Some(1.7);
    canvas.set_boxes(vec![
        clamped,
        AnnotationBox::new("A", rect(0.0, 0.0, 0.0, 20.0)),
        AnnotationBox::new("", rect(0.0, 0.0, 20.0, 20.0)),
        AnnotationBox::new("A", rect(0.0, 0.0, f32::NAN, 20.0)),
    ]);
    assert_eq!(canvas.boxes().len(), 1);
    assert_eq!(canvas.boxes()[0].confidence, Some(1.0));
}

#[test]
fn test_set_boxes_abandons_gesture() {
    let (mut canvas, published) = create_canvas();
    canvas.set_boxes(vec![AnnotationBox::new("A", rect(10.0, 10.0, 40.0, 40.0))]);
    canvas.pointer_down(p(30.0, 30.0)).unwrap();
    canvas.set_boxes(Vec::new());

    assert_eq!(canvas.gesture(), &Gesture::Idle);
    assert_eq!(canvas.pointer_up(p(60.0, 60.0)), PointerOutcome::Unchanged);
    assert!(published.borrow().is_empty());
}

#[test]
fn test_select_unknown_class() {
    let (mut canvas, _) = create_canvas();
    canvas.select_class(Some("A")).unwrap();
    assert_eq!(
        canvas.select_class(Some("X")),
        Err(CanvasError::UnknownClass("X".to_string()))
    );
    assert_eq!(canvas.selected_class(), Some("A"));
}

#[test]
fn test_class_table_swap_clears_missing_selection() {
    let (mut canvas, _) = create_canvas();
    canvas.select_class(Some("H")).unwrap();
    canvas.set_classes(ClassTable::new([crate::model::ClassDefinition::new(
        "A",
        Color::rgb(0, 255, 0),
    )]));
    assert_eq!(canvas.selected_class(), None);
}

#[test]
fn test_remove_hovered() {
    let (mut canvas, published) = create_canvas();
    canvas.set_boxes(vec![
        AnnotationBox::new("A", rect(10.0, 10.0, 40.0, 40.0)),
        AnnotationBox::new("B", rect(100.0, 100.0, 40.0, 40.0)),
    ]);
    assert_eq!(canvas.remove_hovered(), None);

    canvas.pointer_move(p(120.0, 120.0));
    assert_eq!(canvas.hovered(), Some(1));
    assert_eq!(canvas.cursor(), CursorStyle::Move);

    let removed = canvas.remove_hovered().unwrap();
    assert_eq!(removed.class_label, "B");
    assert_eq!(canvas.hovered(), None);
    assert_eq!(canvas.boxes().len(), 1);
    assert_eq!(published.borrow().len(), 1);
}

#[test]
fn test_remove_refused_during_gesture() {
    let (mut canvas, published) = create_canvas();
    canvas.set_boxes(vec![AnnotationBox::new("A", rect(10.0, 10.0, 40.0, 40.0))]);
    canvas.pointer_down(p(30.0, 30.0)).unwrap();
    assert_eq!(canvas.remove_box(0), None);
    assert_eq!(canvas.remove_box(5), None);
    assert_eq!(canvas.boxes().len(), 1);
    assert!(published.borrow().is_empty());
}

#[test]
fn test_no_frame_before_image() {
    let (mut canvas, _) = create_canvas();
    assert!(canvas.frame().is_none());
    assert!(canvas.render().unwrap().is_none());
}

#[test]
fn test_frame_follows_state() {
    let (mut canvas, _) = create_canvas();
    canvas.set_image(RasterImage::solid(200, 150, Color::BLACK).unwrap());
    canvas.set_grid(Some(GridOverlay {
        latitude_lines: vec![GridLine::new(vec![p(0.0, 75.0), p(200.0, 75.0)])],
        longitude_lines: Vec::new(),
    }));
    canvas.select_class(Some("F")).unwrap();
    canvas.pointer_down(p(20.0, 20.0)).unwrap();
    canvas.pointer_move(p(80.0, 60.0));

    let kinds = |canvas: &AnnotationCanvas| -> Vec<&'static str> {
        canvas
            .frame()
            .unwrap()
            .commands
            .iter()
            .map(|c| c.kind())
            .collect()
    };
    assert_eq!(kinds(&canvas), vec!["clear", "image", "polyline", "stroke_rect"]);

    canvas.pointer_up(p(80.0, 60.0));
    canvas.set_grid_visible(false);
    // Pointer still over the new box's corner: hovered with handles.
    assert_eq!(canvas.hovered(), Some(0));
    assert_eq!(
        kinds(&canvas),
        vec![
            "clear",
            "image",
            "stroke_rect",
            "text",
            "fill_rect",
            "fill_rect",
            "fill_rect",
            "fill_rect",
        ]
    );

    let surface = canvas.render().unwrap().unwrap();
    assert_eq!(canvas.image_size(), Some((200, 150)));
    assert_eq!((surface.width(), surface.height()), (200, 150));
}

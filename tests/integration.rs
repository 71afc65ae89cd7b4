//! Integration tests for gilt-canvas.
//!
//! These drive the public API from outside the crate: building scenes,
//! running frames against a recording surface and probing the results.

use std::time::Duration;

use gilt_canvas::collection::{IndexOutOfRange, OrderedSet};
use gilt_canvas::geometry::{Point, Size};
use gilt_canvas::layer::{LayerOptions, Property, PropertyKey};
use gilt_canvas::scene::{CanvasConfig, Cursor, FrameInput, Scene, SceneError};
use gilt_canvas::testing::{Pilot, RecordingSurface};
use pretty_assertions::assert_eq;

fn frame_input() -> FrameInput {
    FrameInput::new(Duration::from_millis(16), Size::new(400.0, 300.0))
}

// ---------------------------------------------------------------------------
// Hit testing
// ---------------------------------------------------------------------------

#[test]
fn test_hit_inside_and_outside() {
    let mut pilot = Pilot::new(400.0, 300.0);
    let node = pilot
        .add(LayerOptions::rect().with_position(10, 10).with_size(100, 100))
        .unwrap();
    pilot.frame().unwrap();

    assert_eq!(pilot.hit(Point::new(50.0, 50.0)), Some(node));
    assert_eq!(pilot.hit(Point::new(390.0, 290.0)), None);
}

#[test]
fn test_hit_follows_zoom() {
    let mut pilot = Pilot::new(400.0, 300.0);
    let node = pilot
        .add(LayerOptions::rect().with_position(190, 140).with_size(20, 20))
        .unwrap();
    pilot.frame().unwrap();
    assert_eq!(pilot.hit(Point::new(215.0, 165.0)), None);

    let canvas = pilot.canvas();
    pilot.scene_mut().set_zoom(canvas, 2.0).unwrap();
    assert!(pilot.frame().unwrap().rendered);
    assert_eq!(pilot.hit(Point::new(215.0, 165.0)), Some(node));
}

#[test]
fn test_hover_updates_cursor() {
    let mut pilot = Pilot::new(400.0, 300.0);
    pilot.add(LayerOptions::rect().with_size(100, 100)).unwrap();
    pilot.frame().unwrap();

    pilot.hover(Point::new(50.0, 50.0)).unwrap();
    let canvas = pilot.canvas();
    assert_eq!(pilot.scene().canvas(canvas).unwrap().cursor(), Cursor::Pointer);
    pilot.hover(Point::new(350.0, 50.0)).unwrap();
    assert_eq!(pilot.scene().canvas(canvas).unwrap().cursor(), Cursor::Default);
}

// ---------------------------------------------------------------------------
// Resolution and composition
// ---------------------------------------------------------------------------

#[test]
fn test_percent_width_reads_canvas() {
    let mut pilot = Pilot::new(400.0, 300.0);
    let node = pilot.add(LayerOptions::rect().with_width("50%")).unwrap();
    pilot.frame().unwrap();
    assert_eq!(pilot.scene().layer(node).unwrap().width().pixels(), 200.0);
}

#[test]
fn test_nested_percent_reads_parent() {
    let mut pilot = Pilot::new(400.0, 300.0);
    let parent = pilot
        .add(LayerOptions::rect().with_position(20, 20).with_size(200, 100).with_padding(10))
        .unwrap();
    let child = pilot
        .add_child(parent, LayerOptions::rect().with_position("10%", 0).with_size("50%", "50%"))
        .unwrap();
    pilot.frame().unwrap();

    let scene = pilot.scene();
    assert_eq!(scene.layer(child).unwrap().size(), Size::new(100.0, 50.0));
    let corner = scene.corners(child).unwrap().unwrap().top_left();
    // parent origin 20 + padding 10 + 10% of 200
    assert!(corner.approx_eq(Point::new(50.0, 30.0), 1e-9), "{corner:?}");
}

#[test]
fn test_viewport_units_on_layers_read_canvas() {
    let mut pilot = Pilot::with_config(CanvasConfig::new().with_size(200, 100), 1000.0, 1000.0);
    let node = pilot.add(LayerOptions::rect().with_size("50vw", "50vh")).unwrap();
    pilot.frame().unwrap();
    assert_eq!(pilot.scene().layer(node).unwrap().size(), Size::new(100.0, 50.0));
}

#[test]
fn test_untransformed_corners() {
    let mut pilot = Pilot::new(400.0, 300.0);
    let node = pilot
        .add(LayerOptions::rect().with_position(30, 40).with_size(120, 60))
        .unwrap();
    pilot.frame().unwrap();

    let quad = pilot.scene().corners(node).unwrap().unwrap();
    let expected = [(30.0, 40.0), (150.0, 40.0), (150.0, 100.0), (30.0, 100.0)];
    for (corner, (x, y)) in quad.corners.iter().zip(expected) {
        assert!(corner.approx_eq(Point::new(x, y), 1e-9), "{corner:?} != ({x}, {y})");
    }
}

#[test]
fn test_resize_reflows_relative_layers() {
    let mut pilot = Pilot::new(400.0, 300.0);
    let node = pilot.add(LayerOptions::rect().with_size("50%", "50%")).unwrap();
    pilot.frame().unwrap();
    pilot.resize(800.0, 600.0);
    pilot.frame().unwrap();
    assert_eq!(pilot.scene().layer(node).unwrap().size(), Size::new(400.0, 300.0));
}

// ---------------------------------------------------------------------------
// Tree operations
// ---------------------------------------------------------------------------

#[test]
fn test_self_parenting_is_rejected() {
    let mut scene = Scene::new();
    let node = scene.create_layer(LayerOptions::rect()).unwrap();
    let err = scene.add_child(node, node).unwrap_err();
    assert!(matches!(err, SceneError::InvalidHierarchy { .. }));
}

#[test]
fn test_reattach_across_canvases() {
    let mut scene = Scene::new();
    let first = scene.create_canvas(CanvasConfig::new()).unwrap();
    let second = scene.create_canvas(CanvasConfig::new()).unwrap();
    let node = scene.create_layer(LayerOptions::rect()).unwrap();

    scene.add(first, node).unwrap();
    scene.add(second, node).unwrap();

    assert!(scene.canvas(first).unwrap().layers().is_empty());
    assert_eq!(scene.canvas(second).unwrap().layers(), &[node]);
    assert_eq!(scene.canvas_of(node), Some(second));
}

#[test]
fn test_reattach_under_another_canvas_child() {
    let mut scene = Scene::new();
    let first = scene.create_canvas(CanvasConfig::new()).unwrap();
    let second = scene.create_canvas(CanvasConfig::new()).unwrap();
    let node = scene.create_layer(LayerOptions::rect()).unwrap();
    let nested = scene.create_layer(LayerOptions::rect()).unwrap();
    let parent = scene.create_layer(LayerOptions::rect()).unwrap();

    scene.add_child(node, nested).unwrap();
    scene.add(first, node).unwrap();
    scene.add(second, parent).unwrap();
    assert_eq!(scene.canvas_of(nested), Some(first));

    scene.add_child(parent, node).unwrap();

    assert!(scene.canvas(first).unwrap().layers().is_empty());
    assert_eq!(scene.canvas(second).unwrap().layers(), &[parent]);
    assert_eq!(scene.children(parent), &[node]);
    assert_eq!(scene.parent(node), Some(parent));
    assert_eq!(scene.canvas_of(node), Some(second));
    assert_eq!(scene.canvas_of(nested), Some(second));
}

#[test]
fn test_detached_geometry_queries_fail() {
    let mut scene = Scene::new();
    let node = scene.create_layer(LayerOptions::rect()).unwrap();
    assert_eq!(scene.decompose(node), Err(SceneError::DetachedOperation));
}

#[test]
fn test_move_item_range_errors() {
    for len in 0..4usize {
        let mut set: OrderedSet<usize> = (0..len).collect();
        assert_eq!(set.move_item(len, 0), Err(IndexOutOfRange { index: len, len }));
    }

    let mut scene = Scene::new();
    let canvas = scene.create_canvas(CanvasConfig::new()).unwrap();
    let node = scene.create_layer(LayerOptions::rect()).unwrap();
    scene.add(canvas, node).unwrap();
    assert_eq!(
        scene.move_to(node, 1usize),
        Err(SceneError::IndexOutOfRange(IndexOutOfRange { index: 1, len: 1 }))
    );
}

#[test]
fn test_unknown_property_is_rejected() {
    let mut scene = Scene::new();
    let node = scene.create_layer(LayerOptions::image("cat.png")).unwrap();
    assert_eq!(
        scene.set(node, Property::FontSize(10.0)),
        Err(SceneError::UnknownProperty { property: PropertyKey::FontSize, kind: "Image" })
    );
}

// ---------------------------------------------------------------------------
// Painting
// ---------------------------------------------------------------------------

#[test]
fn test_first_frame_paint_log() {
    let mut pilot = Pilot::with_config(CanvasConfig::new().with_background("green"), 400.0, 300.0);
    pilot
        .add(LayerOptions::rect().with_position(10, 10).with_size(100, 100).with_background("red"))
        .unwrap();
    pilot.frame().unwrap();

    assert_eq!(
        pilot.surface().commands(),
        [
            "backing 400x300 @1",
            "clear 400x300",
            "save",
            "transform 1 0 0 1 0 0",
            "background green 0,0 400x300",
            "restore",
            "save",
            "transform 1 0 0 1 60 60",
            "box -50,-50 100x100 fill=red",
            "restore",
        ]
    );
}

#[test]
fn test_high_density_frame_scales_every_matrix() {
    let mut pilot = Pilot::with_config(CanvasConfig::new().with_background("green"), 400.0, 300.0);
    pilot.set_pixel_ratio(2.0);
    pilot
        .add(LayerOptions::rect().with_position(10, 10).with_size(100, 100).with_background("red"))
        .unwrap();
    pilot.frame().unwrap();

    assert_eq!(
        pilot.surface().commands(),
        [
            "backing 400x300 @2",
            "clear 400x300",
            "save",
            "transform 2 0 0 2 0 0",
            "background green 0,0 400x300",
            "restore",
            "save",
            "transform 2 0 0 2 120 120",
            "box -50,-50 100x100 fill=red",
            "restore",
        ]
    );
    // Hit testing stays in canvas pixels.
    assert!(pilot.hit(Point::new(50.0, 50.0)).is_some());
}

#[test]
fn test_reorder_changes_paint_order() {
    let mut pilot = Pilot::new(400.0, 300.0);
    let a = pilot.add(LayerOptions::rect().with_size(10, 10).with_background("a")).unwrap();
    pilot.add(LayerOptions::rect().with_size(10, 10).with_background("b")).unwrap();
    pilot.frame().unwrap();
    pilot.surface_mut().take();

    pilot.scene_mut().move_to_front(a).unwrap();
    assert!(pilot.frame().unwrap().rendered);
    assert_eq!(
        pilot.surface().matching("box"),
        ["box -5,-5 10x10 fill=b", "box -5,-5 10x10 fill=a"]
    );
}

#[test]
fn test_idle_frames_paint_nothing() {
    let mut pilot = Pilot::new(400.0, 300.0);
    pilot.add(LayerOptions::rect().with_size(10, 10)).unwrap();
    pilot.frame().unwrap();
    pilot.surface_mut().take();

    for _ in 0..3 {
        assert!(!pilot.frame().unwrap().rendered);
    }
    assert!(pilot.surface().commands().is_empty());
}

#[test]
fn test_text_wraps_and_sizes_itself() {
    let mut pilot = Pilot::new(400.0, 300.0);
    let node = pilot
        .add(LayerOptions::text("hello world").with_font_size(10.0).with_size(40, "auto"))
        .unwrap();
    pilot.frame().unwrap();

    assert_eq!(pilot.scene().layer(node).unwrap().height().pixels(), 24.0);
    assert_eq!(
        pilot.surface().matching("text"),
        [
            "text \"hello\" at -20,-12 font=normal normal 10px serif color=black",
            "text \"world\" at -20,0 font=normal normal 10px serif color=black",
        ]
    );
}

#[test]
fn test_text_style_inherits_from_text_ancestor() {
    let mut pilot = Pilot::new(400.0, 300.0);
    let parent = pilot
        .add(
            LayerOptions::text("")
                .with_size(100, 100)
                .with_font_size(20.0)
                .with_font_family("mono")
                .with_color("red"),
        )
        .unwrap();
    let spacer = pilot.add_child(parent, LayerOptions::rect().with_size(100, 100)).unwrap();
    pilot
        .add_child(spacer, LayerOptions::text("hi").with_size(100, 100).with_color("blue"))
        .unwrap();
    pilot.frame().unwrap();

    assert_eq!(
        pilot.surface().matching("text"),
        ["text \"hi\" at -50,-50 font=normal normal 20px mono color=blue"]
    );
}

#[test]
fn test_image_lifecycle() {
    let mut pilot = Pilot::new(400.0, 300.0);
    let node = pilot
        .add(LayerOptions::image("cat.png").with_size(100, "auto").with_background("grey"))
        .unwrap();
    pilot.frame().unwrap();
    assert!(pilot.surface().matching("image").is_empty());
    assert_eq!(pilot.scene().pending_images(), vec![(node, "cat.png")]);

    pilot.scene_mut().image_loaded(node, Size::new(200.0, 100.0)).unwrap();
    assert!(pilot.frame().unwrap().rendered);
    assert_eq!(pilot.scene().layer(node).unwrap().height().pixels(), 50.0);
    assert_eq!(pilot.surface().matching("image"), ["image cat.png -50,-25 100x50"]);
}

#[test]
fn test_failure_after_load_repaints_without_image() {
    let mut pilot = Pilot::new(400.0, 300.0);
    let node = pilot.add(LayerOptions::image("cat.png").with_size(100, 100)).unwrap();
    pilot.scene_mut().image_loaded(node, Size::new(10.0, 10.0)).unwrap();
    pilot.frame().unwrap();
    assert_eq!(pilot.surface().matching("image").len(), 1);
    pilot.surface_mut().take();

    pilot.scene_mut().image_failed(node).unwrap();
    assert!(pilot.frame().unwrap().rendered);
    assert!(pilot.surface().matching("image").is_empty());
}

#[test]
fn test_failed_image_skips_paint_only() {
    let mut pilot = Pilot::new(400.0, 300.0);
    let node = pilot
        .add(LayerOptions::image("cat.png").with_size(100, 100).with_background("grey"))
        .unwrap();
    pilot.scene_mut().image_failed(node).unwrap();
    pilot.scene_mut().image_loaded(node, Size::new(10.0, 10.0)).unwrap();
    let report = pilot.frame().unwrap();

    assert_eq!(report.painted, 1);
    assert!(pilot.surface().matching("image").is_empty());
    assert_eq!(pilot.surface().matching("box"), ["box -50,-50 100x100 fill=grey"]);
}

#[test]
fn test_tick_against_plain_surface() {
    let mut scene = Scene::new();
    let canvas = scene.create_canvas(CanvasConfig::new()).unwrap();
    let node = scene.create_layer(LayerOptions::rect().with_size("25%", "25%")).unwrap();
    scene.add(canvas, node).unwrap();

    let mut surface = RecordingSurface::new();
    let report = scene.tick(canvas, &frame_input().with_pixel_ratio(2.0), &mut surface).unwrap();

    assert!(report.rendered);
    assert_eq!(report.painted, 1);
    assert_eq!(scene.canvas(canvas).unwrap().backing_size(), Size::new(800.0, 600.0));
    assert_eq!(scene.layer(node).unwrap().size(), Size::new(100.0, 75.0));
}

#[test]
fn test_destroyed_layers_leave_no_trace() {
    let mut pilot = Pilot::new(400.0, 300.0);
    let node = pilot.add(LayerOptions::rect().with_size(50, 50)).unwrap();
    pilot.frame().unwrap();

    let canvas = pilot.canvas();
    pilot.scene_mut().remove(canvas, node).unwrap();
    assert_eq!(pilot.scene_mut().destroy(node).unwrap(), 1);
    assert!(pilot.frame().unwrap().rendered);
    assert_eq!(pilot.hit(Point::new(10.0, 10.0)), None);
}

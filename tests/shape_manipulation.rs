use eframe_annotate::input::{ArrowKey, ClickCount, Modifier, PointerButton};
use eframe_annotate::shape::ShapeDimensions;
use eframe_annotate::surface::Style;
use eframe_annotate::{
    Canvas, DrawingSurface, EditorConfig, InputEvent, Mode, Point, PointerHistory, Scene, ShapeKind, ShapeTool,
};
use egui::{Color32, Rect, pos2};

struct Fixture {
    scene: Scene,
    history: PointerHistory,
    tool: ShapeTool,
}

impl Fixture {
    fn new() -> Self {
        Self {
            scene: Scene::new(),
            history: PointerHistory::new(),
            tool: ShapeTool::new(&EditorConfig::default()),
        }
    }

    fn create(&mut self, x: i32, y: i32, kind: ShapeKind, dims: ShapeDimensions) -> eframe_annotate::PrimitiveId {
        self.tool
            .create_shape(
                &mut self.scene,
                &mut self.history,
                Point::new(x, y),
                kind,
                Style::new(Color32::RED, 2.0),
                dims,
            )
            .unwrap()
    }
}

#[test]
fn test_example_session() {
    let mut f = Fixture::new();
    let oval = f.create(100, 100, ShapeKind::Oval, ShapeDimensions::new(20, 20));

    assert_eq!(f.tool.registry().len(), 1);
    let record = f.tool.registry().last().unwrap();
    assert_eq!(record.tag, "oval1");
    assert_eq!(record.center, Point::new(100, 100));
    assert_eq!(f.scene.bounds(oval).unwrap(), Rect::from_min_max(pos2(90.0, 90.0), pos2(110.0, 110.0)));

    assert!(f.tool.drag(&mut f.scene, &mut f.history, Point::new(105, 100), false));
    assert_eq!(f.tool.registry().get("oval1").unwrap().center, Point::new(101, 100));
    assert_eq!(f.scene.bounds(oval).unwrap().min, pos2(91.0, 90.0));

    let rect = f.create(200, 200, ShapeKind::Rectangle, ShapeDimensions::new(20, 20));
    assert_eq!(f.tool.registry().len(), 2);
    assert_eq!(f.tool.selected(), Some(rect));

    assert_eq!(f.tool.unselect(&mut f.scene, 3.0), Some(rect));
    assert_eq!(f.tool.pending_flash(), Some(rect));
    assert_eq!(f.tool.next_due(), Some(3.5));
}

#[test]
fn test_create_registers_exactly_one_record() {
    let mut f = Fixture::new();
    let mut tags = Vec::new();

    for (i, kind) in [ShapeKind::Oval, ShapeKind::Arc, ShapeKind::Rectangle, ShapeKind::Oval]
        .into_iter()
        .enumerate()
    {
        let id = f.create(50 * i as i32, 40, kind, ShapeDimensions::default());
        assert_eq!(f.tool.registry().len(), i + 1);
        assert_eq!(f.tool.selected(), Some(id));

        let tag = f.tool.registry().last().unwrap().tag.clone();
        assert!(!tags.contains(&tag));
        assert_eq!(f.scene.tags(id).unwrap(), vec![kind.name().to_owned(), tag.clone()]);
        tags.push(tag);
    }
    assert_eq!(tags, ["oval1", "arc2", "rectangle3", "oval4"]);
}

#[test]
fn test_unknown_kind_creates_nothing() {
    let mut f = Fixture::new();
    let first = f.create(10, 10, ShapeKind::Oval, ShapeDimensions::default());

    let created = f.tool.create_shape_named(
        &mut f.scene,
        &mut f.history,
        Point::new(80, 80),
        "hexagon",
        Style::new(Color32::RED, 1.0),
        ShapeDimensions::default(),
    );

    assert!(created.is_none());
    assert_eq!(f.tool.registry().len(), 1);
    assert_eq!(f.scene.len(), 1);
    assert_eq!(f.tool.selected(), Some(first));
}

#[test]
fn test_named_kind_creates_shape() {
    let mut f = Fixture::new();
    let id = f.tool.create_shape_named(
        &mut f.scene,
        &mut f.history,
        Point::new(80, 80),
        "rectangle",
        Style::new(Color32::RED, 1.0),
        ShapeDimensions::default(),
    );
    assert!(id.is_some());
    assert_eq!(f.tool.registry().last().unwrap().kind, ShapeKind::Rectangle);
}

#[test]
fn test_repeated_drag_moves_one_unit_per_event() {
    let mut f = Fixture::new();
    let id = f.create(100, 100, ShapeKind::Rectangle, ShapeDimensions::new(30, 16));

    // Pointer speed does not matter, only direction
    for step in 1..=7 {
        let pos = Point::new(100 + step * 9, 100);
        assert!(f.tool.drag(&mut f.scene, &mut f.history, pos, false));
    }

    let bounds = f.scene.bounds(id).unwrap();
    assert_eq!(bounds.min, pos2(92.0, 92.0));
    assert_eq!(f.tool.selected_record().unwrap().center, Point::from_pos2(bounds.center()));
    assert_eq!(f.tool.selected_record().unwrap().center, Point::new(107, 100));
}

#[test]
fn test_operations_without_selection_are_noops() {
    let mut f = Fixture::new();

    assert!(!f.tool.drag(&mut f.scene, &mut f.history, Point::new(5, 5), false));
    assert!(!f.tool.nudge(&mut f.scene, 1, 0));
    assert!(!f.tool.resize(&mut f.scene, Point::new(5, 0)));
    assert_eq!(f.tool.center_report(), None);
    assert!(f.scene.is_empty());
}

#[test]
fn test_resize_follows_vertical_direction() {
    let mut f = Fixture::new();
    let id = f.create(100, 100, ShapeKind::Oval, ShapeDimensions::new(40, 40));
    let original = f.scene.bounds(id).unwrap();

    // Moving up grows about the center
    assert!(f.tool.resize(&mut f.scene, Point::new(100, 90)));
    let grown = f.scene.bounds(id).unwrap();
    assert!(grown.width() > original.width());
    assert!((grown.width() - 40.0 * 1.01).abs() < 1e-3);
    assert!((grown.center() - original.center()).length() < 1e-3);

    // Same y leaves it alone
    assert!(!f.tool.resize(&mut f.scene, Point::new(130, 90)));
    assert_eq!(f.scene.bounds(id).unwrap(), grown);

    // Moving down shrinks
    assert!(f.tool.resize(&mut f.scene, Point::new(130, 95)));
    assert!(f.scene.bounds(id).unwrap().width() < grown.width());
    assert_eq!(f.tool.last_motion(), Point::new(130, 95));
}

#[test]
fn test_canvas_bindings() {
    let mut canvas = Canvas::new(Mode::Shapes, EditorConfig::default());
    let press = InputEvent::PointerDown {
        pos: Point::new(100, 100),
        button: PointerButton::Primary,
        modifier: Modifier::None,
        clicks: ClickCount::Single,
    };
    canvas.handle_event(&press, 0.0);
    let id = canvas.shape_tool().unwrap().selected().unwrap();

    // Shift drag moves freely
    canvas.handle_event(
        &InputEvent::PointerMove { pos: Point::new(103, 97), held: None, modifier: Modifier::Shift },
        0.0,
    );
    assert_eq!(canvas.scene().bounds(id).unwrap().min, pos2(81.0, 79.0));

    // Alt drag locks to the dominant axis
    canvas.handle_event(
        &InputEvent::PointerMove { pos: Point::new(110, 98), held: None, modifier: Modifier::Alt },
        0.0,
    );
    assert_eq!(canvas.scene().bounds(id).unwrap().min, pos2(82.0, 79.0));

    // Shift + arrow nudges exactly
    canvas.handle_event(&InputEvent::KeyDown { key: ArrowKey::Down, modifier: Modifier::Shift }, 0.0);
    assert_eq!(canvas.scene().bounds(id).unwrap().min, pos2(82.0, 80.0));
    assert_eq!(canvas.center_report().unwrap().center, Point::new(102, 100));

    // Arrows without shift are ignored
    canvas.handle_event(&InputEvent::KeyDown { key: ArrowKey::Down, modifier: Modifier::None }, 0.0);
    assert_eq!(canvas.scene().bounds(id).unwrap().min, pos2(82.0, 80.0));

    // Ctrl motion upward grows
    canvas.handle_event(
        &InputEvent::PointerMove { pos: Point::new(110, 50), held: None, modifier: Modifier::Ctrl },
        0.0,
    );
    assert!(canvas.scene().bounds(id).unwrap().width() > 40.0);
}

#[test]
fn test_both_presses_of_a_double_click_create_shapes() {
    let mut canvas = Canvas::new(Mode::Shapes, EditorConfig::default());
    for clicks in [ClickCount::Single, ClickCount::Double] {
        canvas.handle_event(
            &InputEvent::PointerDown {
                pos: Point::new(100, 100),
                button: PointerButton::Primary,
                modifier: Modifier::None,
                clicks,
            },
            0.0,
        );
    }
    assert_eq!(canvas.scene().len(), 2);
}

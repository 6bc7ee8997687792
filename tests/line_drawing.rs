use eframe_annotate::input::{ClickCount, Modifier, PointerButton};
use eframe_annotate::surface::Geometry;
use eframe_annotate::{Canvas, EditorConfig, InputEvent, InputHandler, Mode, Point, Tool};

fn click(canvas: &mut Canvas, x: i32, y: i32, button: PointerButton, clicks: ClickCount) {
    canvas.handle_event(
        &InputEvent::PointerDown {
            pos: Point::new(x, y),
            button,
            modifier: Modifier::None,
            clicks,
        },
        0.0,
    );
}

fn left(canvas: &mut Canvas, x: i32, y: i32) {
    click(canvas, x, y, PointerButton::Primary, ClickCount::Single);
}

fn segments(canvas: &Canvas) -> usize {
    canvas.scene().primitives().iter().filter(|p| p.has_tag("line")).count()
}

#[test]
fn test_segments_are_clicks_minus_one() {
    let mut canvas = Canvas::new(Mode::Lines, EditorConfig::default());
    let clicks = [(0, 0), (30, 0), (30, 30), (60, 45), (10, 90)];

    for (n, (x, y)) in clicks.iter().enumerate() {
        left(&mut canvas, *x, *y);
        assert_eq!(segments(&canvas), n);
    }
    assert_eq!(canvas.history().points().len(), clicks.len());
}

#[test]
fn test_undo_reverses_last_click() {
    let mut canvas = Canvas::new(Mode::Lines, EditorConfig::default());
    left(&mut canvas, 0, 0);
    left(&mut canvas, 10, 0);

    let before = (segments(&canvas), canvas.history().points().len());
    left(&mut canvas, 10, 10);
    click(&mut canvas, 0, 0, PointerButton::Secondary, ClickCount::Single);

    assert_eq!((segments(&canvas), canvas.history().points().len()), before);
    assert_eq!(canvas.history().start(), Point::new(10, 0));
}

#[test]
fn test_double_click_closes_and_forgets_polyline() {
    let mut canvas = Canvas::new(Mode::Lines, EditorConfig::default());
    left(&mut canvas, 0, 0);
    left(&mut canvas, 40, 0);
    // The first press at the closing point is single, the second is the double
    left(&mut canvas, 40, 40);
    click(&mut canvas, 40, 40, PointerButton::Primary, ClickCount::Double);

    let line_tool = canvas.line_tool().unwrap();
    assert!(line_tool.segment_tags().is_empty());
    assert_eq!(line_tool.current_state_name(), "Idle");
    assert!(canvas.history().points().is_empty());
    assert_eq!(canvas.history().first(), None);
    // two chained segments plus the closing one
    assert_eq!(segments(&canvas), 3);

    // Next click starts a fresh polyline and numbering continues
    left(&mut canvas, 100, 100);
    left(&mut canvas, 120, 100);
    let newest = canvas.scene().primitives().last().unwrap();
    assert!(newest.has_tag("line4"));
}

#[test]
fn test_freehand_draws_while_primary_held() {
    let mut canvas = Canvas::new(Mode::Freehand, EditorConfig::default());
    left(&mut canvas, 5, 5);

    for x in 6..=10 {
        canvas.handle_event(
            &InputEvent::PointerMove {
                pos: Point::new(x, 5),
                held: Some(PointerButton::Primary),
                modifier: Modifier::None,
            },
            0.0,
        );
    }
    // Hover without a button draws nothing
    canvas.handle_event(
        &InputEvent::PointerMove { pos: Point::new(20, 20), held: None, modifier: Modifier::None },
        0.0,
    );

    assert_eq!(canvas.scene().len(), 5);
    assert!(canvas.scene().primitives().iter().all(|p| p.has_tag("freehand")));
    assert_eq!(canvas.cursor_text().as_deref(), Some("20,20"));
}

fn egui_frame(ctx: &egui::Context, handler: &mut InputHandler, canvas: &mut Canvas, time: f64, x: f32, y: f32, pressed: bool) {
    let input = egui::RawInput {
        time: Some(time),
        events: vec![egui::Event::PointerButton {
            pos: egui::pos2(x, y),
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }],
        ..Default::default()
    };
    let _ = ctx.run(input, |ctx| {
        for event in handler.process_input(ctx) {
            canvas.handle_event(&event, time);
        }
    });
}

fn egui_click(ctx: &egui::Context, handler: &mut InputHandler, canvas: &mut Canvas, time: f64, x: f32, y: f32) {
    egui_frame(ctx, handler, canvas, time, x, y, true);
    egui_frame(ctx, handler, canvas, time + 0.05, x, y, false);
}

#[test]
fn test_double_click_from_egui_adds_only_the_closing_segment() {
    let ctx = egui::Context::default();
    let mut handler = InputHandler::new(egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(640.0, 640.0)));
    let mut canvas = Canvas::new(Mode::Lines, EditorConfig::default());

    egui_click(&ctx, &mut handler, &mut canvas, 0.0, 10.0, 10.0);
    egui_click(&ctx, &mut handler, &mut canvas, 1.0, 100.0, 10.0);
    egui_click(&ctx, &mut handler, &mut canvas, 2.0, 100.0, 100.0);
    egui_click(&ctx, &mut handler, &mut canvas, 2.15, 100.0, 100.0);

    // a-b, b-c, then c back to a
    assert_eq!(segments(&canvas), 3);
    assert!(canvas.scene().primitives().iter().all(|p| match *p.geometry() {
        Geometry::Line { from, to } => from != to,
        _ => false,
    }));
    assert!(canvas.history().points().is_empty());
}

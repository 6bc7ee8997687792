use egui::{Context, Key, Pos2, Rect};

use crate::point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

impl PointerButton {
    fn from_egui(button: egui::PointerButton) -> Option<Self> {
        match button {
            egui::PointerButton::Primary => Some(Self::Primary),
            egui::PointerButton::Secondary => Some(Self::Secondary),
            _ => None,
        }
    }

    fn to_egui(self) -> egui::PointerButton {
        match self {
            Self::Primary => egui::PointerButton::Primary,
            Self::Secondary => egui::PointerButton::Secondary,
        }
    }
}

/// The single modifier an event is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modifier {
    #[default]
    None,
    Shift,
    Ctrl,
    Alt,
}

impl Modifier {
    /// Shift wins over Ctrl, Ctrl over Alt
    pub fn from_egui(modifiers: egui::Modifiers) -> Self {
        if modifiers.shift {
            Self::Shift
        } else if modifiers.ctrl || modifiers.mac_cmd {
            Self::Ctrl
        } else if modifiers.alt {
            Self::Alt
        } else {
            Self::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickCount {
    Single,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowKey {
    fn from_egui(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(Self::Up),
            Key::ArrowDown => Some(Self::Down),
            Key::ArrowLeft => Some(Self::Left),
            Key::ArrowRight => Some(Self::Right),
            _ => None,
        }
    }

    /// One-pixel step in canvas coordinates (y grows downward)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Input delivered to a canvas, in canvas-local integer coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A button was pressed. A double click arrives as a `Single` for the
    /// first press and a `Double` in place of the second.
    PointerDown {
        pos: Point,
        button: PointerButton,
        modifier: Modifier,
        clicks: ClickCount,
    },
    /// Pointer moved over the canvas
    PointerMove {
        pos: Point,
        held: Option<PointerButton>,
        modifier: Modifier,
    },
    /// Pointer left the canvas
    PointerLeave,
    KeyDown {
        key: ArrowKey,
        modifier: Modifier,
    },
}

/// A press that may still turn out to be the second half of a double click
#[derive(Debug, Clone, Copy)]
struct PendingPress {
    pos: Point,
    button: PointerButton,
    modifier: Modifier,
}

impl PendingPress {
    fn single(self) -> InputEvent {
        InputEvent::PointerDown {
            pos: self.pos,
            button: self.button,
            modifier: self.modifier,
            clicks: ClickCount::Single,
        }
    }

    fn double(self) -> InputEvent {
        InputEvent::PointerDown {
            pos: self.pos,
            button: self.button,
            modifier: self.modifier,
            clicks: ClickCount::Double,
        }
    }
}

/// Converts raw egui input into [`InputEvent`]s for one canvas
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    pending: Option<PendingPress>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
            pending: None,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    fn to_canvas(&self, pos: Pos2) -> Point {
        Point::from_pos2(pos - self.canvas_rect.min.to_vec2())
    }

    /// Process raw egui input and generate our InputEvents
    ///
    /// egui only knows a press was the second half of a double click once
    /// the button is released. A press that comes soon enough after the last
    /// click is held back until then and delivered either as a `Double` or,
    /// if the release was not a double click, as the `Single` it was.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();
        // Arrow keys belong to a focused text field when there is one
        let keys_free = !ctx.wants_keyboard_input();
        let double_click_delay = ctx.options(|options| options.input_options.max_double_click_delay);

        ctx.input(|input| {
            let modifier = Modifier::from_egui(input.modifiers);
            let hover = input
                .pointer
                .hover_pos()
                .filter(|pos| self.canvas_rect.contains(*pos));

            // Moved too far or held too long to become a click
            if input.pointer.is_decidedly_dragging() {
                if let Some(pending) = self.pending.take() {
                    events.push(pending.single());
                }
            }

            match hover {
                Some(pos) => {
                    if Some(pos) != self.last_pointer_pos {
                        // A button pressed this frame is not yet dragging
                        let held = [egui::PointerButton::Primary, egui::PointerButton::Secondary]
                            .into_iter()
                            .find(|b| input.pointer.button_down(*b) && !input.pointer.button_pressed(*b))
                            .and_then(PointerButton::from_egui);
                        events.push(InputEvent::PointerMove {
                            pos: self.to_canvas(pos),
                            held,
                            modifier,
                        });
                    }
                    self.last_pointer_pos = Some(pos);

                    for button in [PointerButton::Primary, PointerButton::Secondary] {
                        if !input.pointer.button_pressed(button.to_egui()) {
                            continue;
                        }
                        if let Some(earlier) = self.pending.take() {
                            events.push(earlier.single());
                        }
                        let press = PendingPress {
                            pos: self.to_canvas(pos),
                            button,
                            modifier,
                        };
                        if f64::from(input.pointer.time_since_last_click()) < double_click_delay {
                            self.pending = Some(press);
                        } else {
                            events.push(press.single());
                        }
                    }
                }
                None => {
                    if self.last_pointer_pos.take().is_some() {
                        events.push(InputEvent::PointerLeave);
                    }
                }
            }

            if let Some(pending) = self.pending {
                let button = pending.button.to_egui();
                if input.pointer.button_double_clicked(button) {
                    events.push(pending.double());
                    self.pending = None;
                } else if input.pointer.button_released(button) {
                    events.push(pending.single());
                    self.pending = None;
                }
            }

            for event in input.raw.events.iter().filter(|_| keys_free) {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = event
                {
                    if let Some(key) = ArrowKey::from_egui(*key) {
                        events.push(InputEvent::KeyDown {
                            key,
                            modifier: Modifier::from_egui(*modifiers),
                        });
                    }
                }
            }
        });

        events
    }
}

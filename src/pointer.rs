use crate::point::Point;

/// Click history for one drawing surface.
///
/// `first` is the first click since the last reset, `start` the most recent
/// click and `previous` the click before it. `points` holds the vertices of
/// the polyline under construction.
#[derive(Debug, Clone, Default)]
pub struct PointerHistory {
    first: Option<Point>,
    start: Point,
    previous: Point,
    points: Vec<Point>,
}

impl PointerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first(&self) -> Option<Point> {
        self.first
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn previous(&self) -> Point {
        self.previous
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// True until the first click after construction or a reset
    pub fn is_idle(&self) -> bool {
        self.first.is_none()
    }

    /// Record a click without touching the polyline vertices
    pub fn record_click(&mut self, pos: Point) {
        match self.first {
            None => {
                self.first = Some(pos);
                self.previous = pos;
            }
            Some(_) => self.previous = self.start,
        }
        self.start = pos;
    }

    /// Record a click that is also a vertex of the polyline
    pub fn record_polyline_click(&mut self, pos: Point) {
        self.record_click(pos);
        self.points.push(pos);
    }

    /// Drag bookkeeping: the next motion delta is measured from `pos`
    pub fn set_previous(&mut self, pos: Point) {
        self.previous = pos;
    }

    /// Drop the last vertex. If any remain, the next segment starts at the
    /// new last vertex.
    pub fn pop_point(&mut self) -> Option<Point> {
        let popped = self.points.pop()?;
        if let Some(&last) = self.points.last() {
            self.start = last;
        }
        Some(popped)
    }

    pub fn reset(&mut self) {
        self.first = None;
        self.points.clear();
    }
}

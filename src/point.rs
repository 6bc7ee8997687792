use egui::Pos2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer pointer coordinate in canvas space
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_pos2(self) -> Pos2 {
        Pos2::new(self.x as f32, self.y as f32)
    }

    /// Rounds to the nearest pixel
    pub fn from_pos2(pos: Pos2) -> Self {
        Self {
            x: pos.x.round() as i32,
            y: pos.y.round() as i32,
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pos2_rounds() {
        assert_eq!(Point::from_pos2(Pos2::new(10.4, 10.6)), Point::new(10, 11));
        assert_eq!(Point::from_pos2(Pos2::new(-0.6, 0.0)), Point::new(-1, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(12, 340).to_string(), "12,340");
    }
}

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::stone::Stone;

/// One entry in the board's undo log.
///
/// A single tagged record holds everything needed to exactly reverse a move:
/// the point played (`None` = pass), the stones removed as captures, and the
/// Ko point and consecutive-pass counter as they stood immediately before the
/// move. Push and pop are each one `Vec` operation, so the fields can never
/// fall out of step with each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub pos: Option<Point>,
    pub captures: Vec<(Point, Stone)>,
    pub ko_before: Option<Point>,
    pub passes_before: u32,
}

impl MoveRecord {
    pub fn play(
        point: Point,
        captures: Vec<(Point, Stone)>,
        ko_before: Option<Point>,
        passes_before: u32,
    ) -> Self {
        MoveRecord {
            pos: Some(point),
            captures,
            ko_before,
            passes_before,
        }
    }

    pub fn pass(ko_before: Option<Point>, passes_before: u32) -> Self {
        MoveRecord {
            pos: None,
            captures: Vec::new(),
            ko_before,
            passes_before,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.pos.is_none()
    }
}

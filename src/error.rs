use std::fmt;

/// Every way a board operation can be rejected. Each failure leaves the board
/// in exactly its pre-call state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate outside `[0, size)`.
    OutOfBounds,
    /// Target point already holds a stone.
    Occupied,
    /// Target point is the current Ko point.
    KoViolation,
    /// Placement would leave the mover's own group with zero liberties
    /// and captures nothing.
    Suicide,
    /// Undo with no moves played.
    EmptyHistory,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds => write!(f, "out of bounds"),
            BoardError::Occupied => write!(f, "occupied"),
            BoardError::KoViolation => write!(f, "ko violation"),
            BoardError::Suicide => write!(f, "suicide"),
            BoardError::EmptyHistory => write!(f, "empty history"),
        }
    }
}

impl std::error::Error for BoardError {}

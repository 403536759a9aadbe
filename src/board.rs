use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::Point;
use crate::error::BoardError;
use crate::record::MoveRecord;
use crate::stone::Stone;

/// Read-only snapshot of a board's mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Vec<i8>,
    pub size: u8,
    pub turn: Stone,
    pub ko: Option<Point>,
    pub passes: u32,
}

/// A square Go board with legal-move enforcement, capture resolution,
/// Ko tracking, and an undo log.
///
/// The grid is stored as a flat row-major array of `i8` (0 = empty,
/// otherwise a [`Stone`] value). The board is the only writer of its own
/// state: every mutation goes through [`place_stone`](Board::place_stone),
/// [`pass_move`](Board::pass_move), or [`undo`](Board::undo).
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    grid: Vec<i8>,
    size: u8,
    turn: Stone,
    ko: Option<Point>,
    passes: u32,
    history: Vec<MoveRecord>,
}

impl Board {
    /// Create an empty board of the given size, Black to move.
    ///
    /// Panics if `size` is zero.
    pub fn new(size: u8) -> Self {
        assert!(size > 0, "board size must be positive");
        Board {
            grid: vec![0i8; size as usize * size as usize],
            size,
            turn: Stone::Black,
            ko: None,
            passes: 0,
            history: Vec::new(),
        }
    }

    /// Build a board from an existing position matrix (size x size of i8
    /// values) with the given side to move. History starts empty.
    ///
    /// Panics if the matrix is empty or not square.
    pub fn with_position(grid: Vec<Vec<i8>>, turn: Stone) -> Self {
        let size = grid.len();
        assert!(
            size > 0 && grid.iter().all(|row| row.len() == size),
            "malformed board matrix"
        );

        Board {
            grid: grid.into_iter().flatten().collect(),
            size: size as u8,
            turn,
            ko: None,
            passes: 0,
            history: Vec::new(),
        }
    }

    /// Replay a move sequence (`None` = pass) onto an empty board,
    /// rebuilding the full undo log.
    pub fn with_moves(size: u8, moves: &[Option<Point>]) -> Result<Self, BoardError> {
        let mut board = Board::new(size);
        for m in moves {
            match m {
                Some((row, col)) => board.place_stone(*row, *col)?,
                None => board.pass_move(),
            }
        }
        Ok(board)
    }

    // -- Accessors --

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn grid(&self) -> &[i8] {
        &self.grid
    }

    pub fn turn(&self) -> Stone {
        self.turn
    }

    pub fn ko(&self) -> Option<Point> {
        self.ko
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.passes
    }

    /// True once the two most recent moves were both passes.
    pub fn is_over(&self) -> bool {
        self.passes >= 2
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        if self.on_board(point) {
            Stone::from_int(self.grid[self.idx(point)])
        } else {
            None
        }
    }

    pub fn on_board(&self, (row, col): Point) -> bool {
        row < self.size && col < self.size
    }

    /// Played points in order, `None` for a pass.
    pub fn moves(&self) -> Vec<Option<Point>> {
        self.history.iter().map(|r| r.pos).collect()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn game_state(&self) -> GameState {
        GameState {
            board: self.grid.clone(),
            size: self.size,
            turn: self.turn,
            ko: self.ko,
            passes: self.passes,
        }
    }

    // -- Game actions --

    /// Place a stone for the side to move.
    ///
    /// Checks run in order: bounds, occupancy, Ko. Then the stone is placed
    /// tentatively, adjacent opponent groups with no liberties are captured,
    /// and the move is rolled back as suicide if the placed stone's own group
    /// ends up with zero liberties without having captured anything. On
    /// success one record is appended to the undo log, the pass counter
    /// resets, and the turn switches. Every failure leaves the board in
    /// exactly its pre-call state.
    pub fn place_stone(&mut self, row: u8, col: u8) -> Result<(), BoardError> {
        let point = (row, col);
        if !self.on_board(point) {
            return Err(BoardError::OutOfBounds);
        }
        if self.stone_at(point).is_some() {
            return Err(BoardError::Occupied);
        }
        if self.ko == Some(point) {
            return Err(BoardError::KoViolation);
        }

        let stone = self.turn;
        self.set_stone(point, stone);

        // Remove every adjacent opponent group left without liberties,
        // visiting each group once even when it borders the point twice.
        let mut captures: Vec<(Point, Stone)> = Vec::new();
        let mut visited = vec![false; self.grid.len()];
        for n in self.neighbors(point) {
            if self.stone_at(n) != Some(stone.opp()) || visited[self.idx(n)] {
                continue;
            }
            let group = self.chain_from(n, &mut visited);
            if self.chain_liberties(&group).is_empty() {
                for &p in &group {
                    captures.push((p, stone.opp()));
                    self.clear_stone(p);
                }
            }
        }

        // Capturing takes precedence over suicide: the placed stone may sit
        // with zero liberties only transiently, never after this call.
        let (own_group, own_liberties) = self.group_and_liberties(row, col);
        if own_liberties.is_empty() && captures.is_empty() {
            self.clear_stone(point);
            return Err(BoardError::Suicide);
        }

        // A Ko arises only from a single-stone capture by a lone stone;
        // multi-stone and snapback captures never lock a point.
        let ko = if captures.len() == 1 && own_group.len() == 1 {
            Some(captures[0].0)
        } else {
            None
        };

        self.history
            .push(MoveRecord::play(point, captures, self.ko, self.passes));
        self.ko = ko;
        self.passes = 0;
        self.turn = stone.opp();
        Ok(())
    }

    /// Pass: clears any Ko point, increments the consecutive-pass counter,
    /// and switches the turn. Never fails.
    pub fn pass_move(&mut self) {
        self.history.push(MoveRecord::pass(self.ko.take(), self.passes));
        self.passes += 1;
        self.turn = self.turn.opp();
    }

    /// Exactly reverse the most recent move or pass.
    pub fn undo(&mut self) -> Result<(), BoardError> {
        let record = self.history.pop().ok_or(BoardError::EmptyHistory)?;

        if let Some(point) = record.pos {
            self.clear_stone(point);
        }
        for &(point, stone) in &record.captures {
            self.set_stone(point, stone);
        }
        self.ko = record.ko_before;
        self.passes = record.passes_before;
        self.turn = self.turn.opp();
        Ok(())
    }

    // -- Graph algorithms --

    /// The 4-connected neighbors that are on the board.
    pub fn neighbors(&self, (row, col): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if row > 0 {
            result.push((row - 1, col));
        }
        if row + 1 < self.size {
            result.push((row + 1, col));
        }
        if col > 0 {
            result.push((row, col - 1));
        }
        if col + 1 < self.size {
            result.push((row, col + 1));
        }
        result
    }

    /// The full same-color group containing (row, col) and the empty points
    /// adjacent to it. An empty or off-board point yields two empty vectors.
    pub fn group_and_liberties(&self, row: u8, col: u8) -> (Vec<Point>, Vec<Point>) {
        let point = (row, col);
        if self.stone_at(point).is_none() {
            return (Vec::new(), Vec::new());
        }

        let mut visited = vec![false; self.grid.len()];
        let group = self.chain_from(point, &mut visited);
        let liberties = self.chain_liberties(&group);
        (group, liberties)
    }

    /// Flood-fill the same-color group from `point` with an explicit stack,
    /// using a shared visited bitset so callers can skip already-seen groups.
    fn chain_from(&self, point: Point, visited: &mut [bool]) -> Vec<Point> {
        let stone = match self.stone_at(point) {
            Some(s) => s,
            None => return Vec::new(),
        };

        let mut group = Vec::new();
        let mut stack = vec![point];
        while let Some(p) = stack.pop() {
            let pi = self.idx(p);
            if visited[pi] {
                continue;
            }
            visited[pi] = true;
            group.push(p);
            for n in self.neighbors(p) {
                if self.stone_at(n) == Some(stone) && !visited[self.idx(n)] {
                    stack.push(n);
                }
            }
        }

        group
    }

    /// Deduplicated empty points adjacent to any stone of a group.
    fn chain_liberties(&self, group: &[Point]) -> Vec<Point> {
        let mut seen = vec![false; self.grid.len()];
        let mut liberties = Vec::new();
        for &p in group {
            for n in self.neighbors(p) {
                let ni = self.idx(n);
                if !seen[ni] && self.stone_at(n).is_none() {
                    seen[ni] = true;
                    liberties.push(n);
                }
            }
        }
        liberties
    }

    // -- Internal helpers --

    #[inline]
    fn idx(&self, (row, col): Point) -> usize {
        row as usize * self.size as usize + col as usize
    }

    fn set_stone(&mut self, point: Point, stone: Stone) {
        let i = self.idx(point);
        self.grid[i] = stone.to_int();
    }

    fn clear_stone(&mut self, point: Point) {
        let i = self.idx(point);
        self.grid[i] = 0;
    }
}

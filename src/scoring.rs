use std::collections::VecDeque;

use serde::Serialize;

use crate::board::Board;
use crate::stone::Stone;

/// Standard compensation added to White's final score.
pub const DEFAULT_KOMI: f64 = 6.5;

/// Empty points enclosed by each color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Territory {
    pub black: u32,
    pub white: u32,
}

/// Final Chinese-rules totals: stones on board + territory, komi to White.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinalScore {
    pub black: f64,
    pub white: f64,
}

/// Count territory for both colors.
///
/// Every maximal region of empty points is flood-filled once (BFS) while
/// collecting the set of stone colors found on its border. A region counts
/// for a color only when that color alone borders it; regions touching both
/// colors, or none (a fully empty board), are neutral.
pub fn territory(board: &Board) -> Territory {
    let size = board.size() as usize;
    let mut visited = vec![false; board.grid().len()];
    let mut totals = Territory::default();

    for row in 0..board.size() {
        for col in 0..board.size() {
            let idx = row as usize * size + col as usize;
            if visited[idx] || board.stone_at((row, col)).is_some() {
                continue;
            }

            let mut count = 0u32;
            let mut borders = 0u8; // bit 0 = Black seen, bit 1 = White seen
            let mut queue = VecDeque::from([(row, col)]);
            visited[idx] = true;

            while let Some(p) = queue.pop_front() {
                count += 1;
                for n in board.neighbors(p) {
                    match board.stone_at(n) {
                        Some(Stone::Black) => borders |= 1,
                        Some(Stone::White) => borders |= 2,
                        None => {
                            let ni = n.0 as usize * size + n.1 as usize;
                            if !visited[ni] {
                                visited[ni] = true;
                                queue.push_back(n);
                            }
                        }
                    }
                }
            }

            match borders {
                1 => totals.black += count,
                2 => totals.white += count,
                _ => {} // dame
            }
        }
    }

    totals
}

/// Final scores under Chinese rules: one point per stone on the board plus
/// enclosed territory, with `komi` added to White. Callers are expected to
/// have resolved dead stones by playing them out before scoring.
pub fn final_scores(board: &Board, komi: f64) -> FinalScore {
    let t = territory(board);

    let mut black_stones = 0u32;
    let mut white_stones = 0u32;
    for &v in board.grid() {
        match Stone::from_int(v) {
            Some(Stone::Black) => black_stones += 1,
            Some(Stone::White) => white_stones += 1,
            None => {}
        }
    }

    FinalScore {
        black: (black_stones + t.black) as f64,
        white: (white_stones + t.white) as f64 + komi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a board from an ASCII layout. 'B' = Black, 'W' = White, '+' = Empty.
    fn board_from_layout(layout: &[&str]) -> Board {
        let grid: Vec<Vec<i8>> = layout
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        'B' => Stone::Black.to_int(),
                        'W' => Stone::White.to_int(),
                        _ => 0,
                    })
                    .collect()
            })
            .collect();
        Board::with_position(grid, Stone::Black)
    }

    #[test]
    fn empty_board_is_all_neutral() {
        let board = Board::new(5);
        assert_eq!(territory(&board), Territory { black: 0, white: 0 });

        let scores = final_scores(&board, DEFAULT_KOMI);
        assert_eq!(scores.black, 0.0);
        assert_eq!(scores.white, 6.5);
    }

    #[test]
    fn walled_off_pocket_counts_for_its_color() {
        let board = board_from_layout(&["BBBB+", "B++B+", "B++B+", "BBBB+", "++++W"]);
        let t = territory(&board);
        assert_eq!(t.black, 4);
        assert_eq!(t.white, 0);
    }

    #[test]
    fn region_bordering_both_colors_is_dame() {
        let board = board_from_layout(&["BB+WW", "BB+WW", "BB+WW", "BB+WW", "BB+WW"]);
        assert_eq!(territory(&board), Territory { black: 0, white: 0 });
    }

    #[test]
    fn separate_regions_score_independently() {
        let board = board_from_layout(&["+B+W+", "+B+W+", "+B+W+", "+B+W+", "+B+W+"]);
        let t = territory(&board);
        // Left column is Black's, right column is White's, the middle is dame.
        assert_eq!(t.black, 5);
        assert_eq!(t.white, 5);
    }

    #[test]
    fn single_point_eye() {
        let board = board_from_layout(&["BB", "B+"]);
        assert_eq!(territory(&board), Territory { black: 1, white: 0 });
    }

    #[test]
    fn edge_enclosed_territory() {
        let board = board_from_layout(&["BB+W+", "B+BW+", "BB+W+", "+++W+", "+++W+"]);
        let t = territory(&board);
        // Only the eye at (1,1) is enclosed by Black alone; the column right
        // of the White wall is White's.
        assert_eq!(t.black, 1);
        assert_eq!(t.white, 5);
    }

    #[test]
    fn chinese_scoring_adds_stones_and_territory() {
        let board = board_from_layout(&["BBBB+", "B++B+", "B++B+", "BBBB+", "++++W"]);
        let scores = final_scores(&board, DEFAULT_KOMI);
        // Black: 12 stones + 4 territory; White: 1 stone + 0 territory + komi.
        assert_eq!(scores.black, 16.0);
        assert_eq!(scores.white, 7.5);
    }

    #[test]
    fn custom_komi_applies_to_white_only() {
        let board = board_from_layout(&["B++++", "+++++", "+++++", "+++++", "++++W"]);
        let scores = final_scores(&board, 0.5);
        assert_eq!(scores.black, 1.0);
        assert_eq!(scores.white, 1.5);
    }

    #[test]
    fn scoring_reads_played_positions() {
        // Score a position reached through the mutation API rather than a layout:
        // Black walls off the left column, White walls off nothing.
        let mut board = Board::new(3);
        board.place_stone(0, 1).unwrap(); // B
        board.place_stone(0, 2).unwrap(); // W
        board.place_stone(1, 1).unwrap(); // B
        board.place_stone(1, 2).unwrap(); // W
        board.place_stone(2, 1).unwrap(); // B
        board.place_stone(2, 2).unwrap(); // W

        assert_eq!(territory(&board), Territory { black: 3, white: 0 });
        let scores = final_scores(&board, 0.5);
        assert_eq!(scores.black, 6.0);
        assert_eq!(scores.white, 3.5);
    }

    #[test]
    fn score_structs_serialize() {
        let t = Territory { black: 4, white: 0 };
        let json = serde_json::to_value(t).unwrap();
        assert_eq!(json["black"], 4);
        assert_eq!(json["white"], 0);

        let s = FinalScore {
            black: 6.0,
            white: 12.5,
        };
        let json = serde_json::to_value(s).unwrap();
        assert_eq!(json["black"], 6.0);
        assert_eq!(json["white"], 12.5);
    }
}

//! Immutable sliding-puzzle configurations.
//!
//! A [`Board`] is an N×N arrangement of the values `0..N²`, where `0` is the
//! blank. Both heuristic scores and the blank position are computed once at
//! construction; every transformation ([`Board::slide`], [`Board::twin`])
//! allocates a new board.

use rand::{seq::SliceRandom, Rng};
use std::fmt;

use crate::error::InvalidArrangement;

/// Direction the blank travels in a single slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

impl Move {
    /// Every direction, in the order [`Board::neighbors`] tries them.
    pub const ALL: [Move; 4] = [Move::Left, Move::Right, Move::Up, Move::Down];

    /// `(row, col)` displacement of the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Left => (0, -1),
            Move::Right => (0, 1),
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One puzzle arrangement plus its precomputed metrics.
///
/// Equality and hashing compare the dimension and the tiles; the cached
/// metrics are pure functions of those, so two equal arrangements are
/// interchangeable everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<u32>,
    blank: usize,
    hamming: usize,
    manhattan: usize,
}

impl Board {
    /// Builds a board from its rows.
    pub fn new(rows: Vec<Vec<u32>>) -> Result<Self, InvalidArrangement> {
        let size = rows.len();
        if size < 2 {
            return Err(InvalidArrangement::TooSmall { size });
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(InvalidArrangement::RaggedRow {
                row,
                len: r.len(),
                size,
            });
        }

        Self::from_tiles(size, rows.into_iter().flatten().collect())
    }

    /// Builds a board from `size * size` tiles in row-major order.
    pub fn from_tiles(size: usize, tiles: Vec<u32>) -> Result<Self, InvalidArrangement> {
        if size < 2 {
            return Err(InvalidArrangement::TooSmall { size });
        }
        let limit = size * size;
        if tiles.len() != limit {
            return Err(InvalidArrangement::TileCount {
                expected: limit,
                found: tiles.len(),
            });
        }

        let mut seen = vec![false; limit];
        for &value in &tiles {
            let slot = seen
                .get_mut(value as usize)
                .ok_or(InvalidArrangement::OutOfRange { value, limit })?;
            if *slot {
                return Err(InvalidArrangement::Duplicate { value });
            }
            *slot = true;
        }

        Ok(Self::from_valid_tiles(size, tiles))
    }

    /// The solved board: `1..N²` in row-major order, blank last.
    pub fn goal(size: usize) -> Result<Self, InvalidArrangement> {
        if size < 2 {
            return Err(InvalidArrangement::TooSmall { size });
        }
        let limit = size * size;
        let tiles = (1..limit as u32).chain(std::iter::once(0)).collect();
        Ok(Self::from_valid_tiles(size, tiles))
    }

    /// Draws a uniformly random board among the solvable ones.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, InvalidArrangement> {
        let mut tiles = Self::goal(size)?.tiles;

        loop {
            tiles.shuffle(rng);
            let candidate = Self::from_valid_tiles(size, tiles.clone());
            if candidate.has_solvable_parity() {
                return Ok(candidate);
            }
        }
    }

    // Callers guarantee `tiles` is a permutation of 0..size².
    fn from_valid_tiles(size: usize, tiles: Vec<u32>) -> Self {
        let mut blank = 0;
        let mut hamming = 0;
        let mut manhattan = 0;

        for (index, &value) in tiles.iter().enumerate() {
            if value == 0 {
                blank = index;
                continue;
            }
            let goal = value as usize - 1;
            if goal != index {
                hamming += 1;
            }
            manhattan += (index / size).abs_diff(goal / size) + (index % size).abs_diff(goal % size);
        }

        Self {
            size,
            tiles,
            blank,
            hamming,
            manhattan,
        }
    }

    fn swapped(&self, a: usize, b: usize) -> Self {
        let mut tiles = self.tiles.clone();
        tiles.swap(a, b);
        Self::from_valid_tiles(self.size, tiles)
    }

    pub fn dimension(&self) -> usize {
        self.size
    }

    /// Number of non-blank tiles outside their goal cell.
    pub fn hamming(&self) -> usize {
        self.hamming
    }

    /// Sum of the grid distances from each non-blank tile to its goal cell.
    pub fn manhattan(&self) -> usize {
        self.manhattan
    }

    pub fn is_goal(&self) -> bool {
        self.hamming == 0
    }

    /// `(row, col)` of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.tiles[row * self.size + col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.tiles.chunks(self.size)
    }

    /// The board with its first two non-blank tiles (row-major) exchanged.
    ///
    /// Exactly one of a board and its twin can reach the goal, which is what
    /// lets [`Solver`](crate::solver::Solver) prove unsolvability.
    pub fn twin(&self) -> Self {
        let mut non_blank = (0..self.tiles.len()).filter(|&i| i != self.blank);
        // At least three non-blank tiles exist on any board of size >= 2.
        let first = non_blank.next().unwrap_or(0);
        let second = non_blank.next().unwrap_or(1);
        self.swapped(first, second)
    }

    /// The board reached by moving the blank one cell, if that stays in bounds.
    pub fn slide(&self, movement: Move) -> Option<Self> {
        let (dr, dc) = movement.as_offset();
        let (row, col) = self.blank();

        let new_row = row.checked_add_signed(dr).filter(|&r| r < self.size)?;
        let new_col = col.checked_add_signed(dc).filter(|&c| c < self.size)?;

        Some(self.swapped(self.blank, new_row * self.size + new_col))
    }

    /// Boards one slide away, in the order left, right, up, down.
    pub fn neighbors(&self) -> impl Iterator<Item = Board> + '_ {
        Move::ALL.into_iter().filter_map(move |m| self.slide(m))
    }

    /// The slide that turns `self` into `other`, if they are adjacent.
    pub fn move_to(&self, other: &Board) -> Option<Move> {
        Move::ALL
            .into_iter()
            .find(|&m| self.slide(m).as_ref() == Some(other))
    }

    /// Inversion-parity solvability test.
    ///
    /// The solver never relies on this; it races the board against its twin
    /// instead. It is used to draw random solvable boards.
    pub fn has_solvable_parity(&self) -> bool {
        let inversions = Self::count_inversions(&self.tiles);

        if self.size % 2 == 1 {
            // Odd width: solvable iff the inversion count is even
            inversions % 2 == 0
        } else {
            // Even width: solvable iff inversions + blank row is odd
            (inversions + self.blank / self.size) % 2 == 1
        }
    }

    fn count_inversions(flattened: &[u32]) -> usize {
        flattened
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != 0)
            .map(|(i, &val)| {
                flattened[i + 1..]
                    .iter()
                    .filter(|&&next| next != 0 && next < val)
                    .count()
            })
            .sum()
    }
}

impl fmt::Display for Board {
    /// The dimension on its own line, then one line per row of padded tiles.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let largest = (self.size * self.size - 1).to_string().len();
        let width = largest.max(2);

        writeln!(f, "{}", self.size)?;
        for row in self.rows() {
            for &val in row {
                write!(f, "{:>width$} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn board(rows: &[&[u32]]) -> Board {
        Board::new(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_goal_board_scores() {
        let goal = Board::goal(3).unwrap();
        assert_eq!(goal, board(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 0]]));
        assert_eq!(goal.hamming(), 0);
        assert_eq!(goal.manhattan(), 0);
        assert!(goal.is_goal());
        assert_eq!(goal.blank(), (2, 2));
    }

    #[test]
    fn test_hamming_and_manhattan() {
        let b = board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]);
        assert_eq!(b.dimension(), 3);
        assert_eq!(b.hamming(), 5);
        assert_eq!(b.manhattan(), 10);
        assert!(!b.is_goal());
    }

    #[test]
    fn test_blank_is_not_scored() {
        // Only the blank and tile 8 are misplaced.
        let b = board(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]);
        assert_eq!(b.hamming(), 1);
        assert_eq!(b.manhattan(), 1);
    }

    #[test]
    fn test_new_rejects_bad_shapes() {
        assert_eq!(
            Board::new(vec![vec![0]]),
            Err(InvalidArrangement::TooSmall { size: 1 })
        );
        assert_eq!(
            Board::new(vec![vec![1, 2], vec![3]]),
            Err(InvalidArrangement::RaggedRow { row: 1, len: 1, size: 2 })
        );
        assert_eq!(
            Board::from_tiles(2, vec![1, 2, 3]),
            Err(InvalidArrangement::TileCount { expected: 4, found: 3 })
        );
    }

    #[test]
    fn test_new_rejects_bad_values() {
        assert_eq!(
            Board::new(vec![vec![1, 2], vec![3, 4]]),
            Err(InvalidArrangement::OutOfRange { value: 4, limit: 4 })
        );
        assert_eq!(
            Board::new(vec![vec![1, 1], vec![3, 0]]),
            Err(InvalidArrangement::Duplicate { value: 1 })
        );
    }

    #[test]
    fn test_neighbors_in_left_right_up_down_order() {
        let b = board(&[&[4, 1, 3], &[0, 2, 6], &[7, 5, 8]]);
        let neighbors: Vec<Board> = b.neighbors().collect();
        assert_eq!(
            neighbors,
            vec![
                board(&[&[4, 1, 3], &[2, 0, 6], &[7, 5, 8]]),
                board(&[&[0, 1, 3], &[4, 2, 6], &[7, 5, 8]]),
                board(&[&[4, 1, 3], &[7, 2, 6], &[0, 5, 8]]),
            ]
        );
    }

    #[test]
    fn test_neighbor_counts_by_blank_position() {
        let corner = Board::goal(3).unwrap();
        let edge = board(&[&[1, 2, 3], &[4, 5, 0], &[7, 8, 6]]);
        let interior = board(&[&[1, 2, 3], &[4, 0, 5], &[7, 8, 6]]);
        assert_eq!(corner.neighbors().count(), 2);
        assert_eq!(edge.neighbors().count(), 3);
        assert_eq!(interior.neighbors().count(), 4);
    }

    #[test]
    fn test_twin_swaps_first_two_non_blank_tiles() {
        let b = board(&[&[4, 1, 3], &[0, 2, 6], &[7, 5, 8]]);
        assert_eq!(b.twin(), board(&[&[1, 4, 3], &[0, 2, 6], &[7, 5, 8]]));

        let blank_first = board(&[&[0, 1, 3], &[4, 2, 6], &[7, 5, 8]]);
        assert_eq!(blank_first.twin(), board(&[&[0, 3, 1], &[4, 2, 6], &[7, 5, 8]]));
    }

    #[test]
    fn test_twin_flips_parity() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in 2..=4 {
            for _ in 0..20 {
                let b = Board::random(size, &mut rng).unwrap();
                assert!(b.has_solvable_parity());
                assert!(!b.twin().has_solvable_parity());
                assert_eq!(b.twin().twin(), b);
            }
        }
    }

    #[test]
    fn test_slide_and_move_to() {
        let goal = Board::goal(3).unwrap();
        assert_eq!(goal.slide(Move::Right), None);
        assert_eq!(goal.slide(Move::Down), None);

        let up = goal.slide(Move::Up).unwrap();
        assert_eq!(up, board(&[&[1, 2, 3], &[4, 5, 0], &[7, 8, 6]]));
        assert_eq!(goal.move_to(&up), Some(Move::Up));
        assert_eq!(up.move_to(&goal), Some(Move::Down));
        assert_eq!(goal.move_to(&goal), None);
    }

    #[test]
    fn test_display_format() {
        let b = board(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 0]]);
        assert_eq!(b.to_string(), "3\n 1  2  3 \n 4  5  6 \n 7  8  0 \n");

        let wide = Board::goal(4).unwrap();
        assert!(wide.to_string().ends_with("13 14 15  0 \n"));
    }
}

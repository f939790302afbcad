use std::fmt;
use std::hash::{Hash, Hasher};

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Result;

use super::board::{Board, Tile};
use super::side::Side;

/// Largest piece value; reaching it ends the game.
pub const MAX_PIECE: u32 = 2048;

/// The state of a game of 2048: board, score and best score.
///
/// Whether the game is over is always derived from the board. Two models are
/// equal exactly when their rendered text (see the `Display` impl) is equal.
#[derive(Clone)]
pub struct Model {
    board: Board,
    score: u32,
    max_score: u32,
}

impl Model {
    /// A new game on an empty `size`×`size` board with score 0.
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            score: 0,
            max_score: 0,
        }
    }

    /// A game whose board is given as rows listed top to bottom (`0` for an
    /// empty square).
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R], score: u32, max_score: u32) -> Result<Self> {
        Ok(Self {
            board: Board::from_rows(rows)?,
            score,
            max_score,
        })
    }

    /// The tile at `(col, row)`, with `(0, 0)` the lower-left corner. Squares
    /// off the board read as empty.
    pub fn tile(&self, col: usize, row: usize) -> Option<Tile> {
        self.board.tile(col, row)
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Best score so far. Only updated when [`Model::game_over`] observes the
    /// end of a game.
    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    /// True if a `MAX_PIECE` tile is on the board or no tilt can change it.
    pub fn is_over(&self) -> bool {
        self.board.max_tile_exists(MAX_PIECE) || !self.board.at_least_one_move_exists()
    }

    /// Like [`Model::is_over`], but records the score as the best score when
    /// the game has ended.
    pub fn game_over(&mut self) -> bool {
        let over = self.is_over();
        if over {
            self.max_score = self.max_score.max(self.score);
        }
        over
    }

    /// Empties the board and resets the score. The best score is kept.
    pub fn clear(&mut self) {
        self.score = 0;
        self.board.clear();
    }

    /// Places a tile of `value` on the empty square `(col, row)`.
    pub fn add_tile(&mut self, col: usize, row: usize, value: u32) -> Result<()> {
        self.board.add_tile(col, row, Tile::new(value)?)
    }

    /// Drops a 2 (90%) or a 4 (10%) on a random empty square.
    ///
    /// Returns the square used, or `None` when the board is full.
    pub fn add_random_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(usize, usize)> {
        let (col, row) = *self.board.empty_squares().choose(rng)?;
        let value = if rng.gen_range(0..10) < 9 { 2 } else { 4 };
        self.board.add_tile(col, row, Tile::new(value).ok()?).ok()?;
        Some((col, row))
    }

    /// Tilts the board toward `side`, returning whether anything moved.
    ///
    /// Tiles slide as far as they can. Two equal tiles that meet merge into
    /// one of twice the value, which is added to the score (saturating at
    /// `u32::MAX`). Tiles of `2^31` are too large to merge. A tile created by
    /// a merge does not merge again during the same tilt, so of three equal
    /// tiles in a line only the leading two merge.
    pub fn tilt(&mut self, side: Side) -> bool {
        let size = self.board.size();
        let mut gained = 0u32;
        let mut changed = false;

        self.board.set_viewing_perspective(side);

        for col in 0..size {
            // Squares that already received a merge this tilt.
            let mut merged = vec![false; size];

            for row in (0..size).rev() {
                let Some(tile) = self.board.tile(col, row) else {
                    continue;
                };

                let mut target = row;
                while target + 1 < size {
                    match self.board.tile(col, target + 1) {
                        None => target += 1,
                        Some(next) if next.merges_with(tile) && !merged[target + 1] => {
                            target += 1;
                            merged[target] = true;
                            break;
                        }
                        Some(_) => break,
                    }
                }

                if target != row {
                    changed = true;
                    if self.board.move_tile(col, target, (col, row)) {
                        if let Some(t) = self.board.tile(col, target) {
                            gained = gained.saturating_add(t.value());
                        }
                    }
                }
            }
        }

        self.board.set_viewing_perspective(Side::North);
        self.score = self.score.saturating_add(gained);

        trace!("tilt {:?}: changed={} score +{}", side, changed, gained);
        changed
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        write!(f, "\n[\n")?;
        for row in (0..size).rev() {
            for col in 0..size {
                match self.tile(col, row) {
                    None => write!(f, "|    ")?,
                    Some(t) => write!(f, "|{:4}", t.value())?,
                }
            }
            writeln!(f, "|")?;
        }
        let over = self.is_over();
        let max = if over {
            self.max_score.max(self.score)
        } else {
            self.max_score
        };
        let status = if over { "over" } else { "not over" };
        writeln!(f, "] {} (max: {}) (game is {}) ", self.score, max, status)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Model {}

impl Hash for Model {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

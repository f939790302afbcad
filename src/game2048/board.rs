use crate::error::{Error, Result};

use super::side::Side;

/// A numbered tile. Values are powers of two, starting at 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(u32);

impl Tile {
    pub fn new(value: u32) -> Result<Self> {
        if value < 2 || !value.is_power_of_two() {
            return Err(Error::InvalidArgument(format!(
                "tile value must be a power of two >= 2, got {value}"
            )));
        }
        Ok(Tile(value))
    }

    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    /// The tile produced by merging this tile with an equal one, or `None`
    /// when the doubled value does not fit in a `u32`.
    #[inline]
    pub fn doubled(self) -> Option<Tile> {
        self.0.checked_mul(2).map(Tile)
    }

    /// True if this tile and `other` merge: equal values whose double fits.
    #[inline]
    pub fn merges_with(self, other: Tile) -> bool {
        self == other && self.doubled().is_some()
    }
}

/// A square grid of optional tiles.
///
/// Column 0 is the left edge and row 0 the bottom edge of the canonical
/// orientation. All addressing goes through the current viewing perspective.
#[derive(Debug, Clone)]
pub struct Board {
    /// `values[col][row]` in canonical orientation.
    values: Vec<Vec<Option<Tile>>>,
    perspective: Side,
}

impl Board {
    /// An empty `size`×`size` board viewed from the north.
    pub fn new(size: usize) -> Self {
        Self {
            values: vec![vec![None; size]; size],
            perspective: Side::North,
        }
    }

    /// Builds a board from rows listed top to bottom, `0` meaning empty.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        let mut board = Board::new(size);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(Error::InvalidArgument(format!(
                    "board must be square: row {i} has {} cells, expected {size}",
                    row.len()
                )));
            }
            for (col, &value) in row.iter().enumerate() {
                if value != 0 {
                    board.values[col][size - 1 - i] = Some(Tile::new(value)?);
                }
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn set_viewing_perspective(&mut self, side: Side) {
        self.perspective = side;
    }

    #[inline]
    fn canonical(&self, col: usize, row: usize) -> (usize, usize) {
        let n = self.size();
        debug_assert!(col < n && row < n);
        (
            self.perspective.col(col, row, n),
            self.perspective.row(col, row, n),
        )
    }

    /// The tile at `(col, row)` under the current perspective, or `None` if
    /// the square is empty or off the board.
    pub fn tile(&self, col: usize, row: usize) -> Option<Tile> {
        let n = self.size();
        if col >= n || row >= n {
            return None;
        }
        let (c, r) = self.canonical(col, row);
        self.values[c][r]
    }

    /// Places `tile` on an empty square.
    pub fn add_tile(&mut self, col: usize, row: usize, tile: Tile) -> Result<()> {
        let n = self.size();
        if col >= n || row >= n {
            return Err(Error::InvalidArgument(format!(
                "square ({col}, {row}) is outside a {n}x{n} board"
            )));
        }
        let (c, r) = self.canonical(col, row);
        if self.values[c][r].is_some() {
            return Err(Error::InvalidArgument(format!(
                "square ({col}, {row}) is already occupied"
            )));
        }
        self.values[c][r] = Some(tile);
        Ok(())
    }

    /// Moves the tile at `from` to `(col, row)`, merging with the tile there.
    ///
    /// Returns `true` if the move was a merge. The destination must be empty or
    /// hold a tile that [`Tile::merges_with`] the moving one; otherwise nothing
    /// moves.
    pub fn move_tile(&mut self, col: usize, row: usize, from: (usize, usize)) -> bool {
        let (fc, fr) = self.canonical(from.0, from.1);
        let (c, r) = self.canonical(col, row);
        if (fc, fr) == (c, r) {
            return false;
        }
        let Some(tile) = self.values[fc][fr].take() else {
            return false;
        };
        match self.values[c][r] {
            None => {
                self.values[c][r] = Some(tile);
                false
            }
            Some(existing) => match tile.doubled() {
                Some(merged) if existing == tile => {
                    self.values[c][r] = Some(merged);
                    true
                }
                _ => {
                    self.values[fc][fr] = Some(tile);
                    false
                }
            },
        }
    }

    /// Removes every tile.
    pub fn clear(&mut self) {
        for column in &mut self.values {
            column.fill(None);
        }
    }

    fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.values.iter().flatten().filter_map(|t| *t)
    }

    pub fn empty_space_exists(&self) -> bool {
        self.values.iter().flatten().any(Option::is_none)
    }

    pub fn max_tile_exists(&self, max_piece: u32) -> bool {
        self.tiles().any(|t| t.value() == max_piece)
    }

    /// True if some tilt could change the board: an empty square, or two
    /// horizontally or vertically adjacent tiles that merge.
    pub fn at_least_one_move_exists(&self) -> bool {
        if self.empty_space_exists() {
            return true;
        }
        let n = self.size();
        for c in 0..n {
            for r in 0..n {
                let Some(here) = self.values[c][r] else {
                    continue;
                };
                let merges = |other: Option<Tile>| other.is_some_and(|t| here.merges_with(t));
                if c + 1 < n && merges(self.values[c + 1][r]) {
                    return true;
                }
                if r + 1 < n && merges(self.values[c][r + 1]) {
                    return true;
                }
            }
        }
        false
    }

    /// Empty squares in canonical coordinates.
    pub fn empty_squares(&self) -> Vec<(usize, usize)> {
        let n = self.size();
        (0..n)
            .flat_map(|c| (0..n).map(move |r| (c, r)))
            .filter(|&(c, r)| self.values[c][r].is_none())
            .collect()
    }
}

/// One edge of the board, and the viewing perspective that treats it as north.
///
/// Seen from side `S`, coordinates `(col, row)` name the square that the
/// canonical (north-up) board calls `(S.col(col, row, n), S.row(col, row, n))`.
/// Every tilt can then be written as a tilt toward the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

    /// `(col0, row0, dcol, drow)`: the canonical corner that becomes the
    /// viewer's lower-left, and the direction of the viewer's "up".
    #[inline]
    fn params(self) -> (usize, usize, isize, isize) {
        match self {
            Side::North => (0, 0, 0, 1),
            Side::East => (0, 1, 1, 0),
            Side::South => (1, 1, 0, -1),
            Side::West => (1, 0, -1, 0),
        }
    }

    /// Canonical column of the square at `(col, row)` as seen from this side.
    pub fn col(self, col: usize, row: usize, size: usize) -> usize {
        let (col0, _, dcol, drow) = self.params();
        let last = size as isize - 1;
        (col0 as isize * last + col as isize * drow + row as isize * dcol) as usize
    }

    /// Canonical row of the square at `(col, row)` as seen from this side.
    pub fn row(self, col: usize, row: usize, size: usize) -> usize {
        let (_, row0, dcol, drow) = self.params();
        let last = size as isize - 1;
        (row0 as isize * last - col as isize * dcol + row as isize * drow) as usize
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::East => Side::West,
            Side::South => Side::North,
            Side::West => Side::East,
        }
    }
}

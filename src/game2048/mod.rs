//! The 2048 sliding-tile game: board, tilt/merge rules and game-over
//! detection.
//!
//! ## Example
//!
//! ```rust
//! use ds_labs::game2048::{Model, Side};
//!
//! let mut game = Model::from_rows(&[
//!     [2, 2, 2, 2],
//!     [0, 0, 0, 0],
//!     [0, 0, 0, 0],
//!     [0, 0, 0, 0],
//! ], 0, 0).unwrap();
//!
//! assert!(game.tilt(Side::East));
//! assert_eq!(game.score(), 8);
//! assert_eq!(game.tile(3, 3).map(|t| t.value()), Some(4));
//! assert_eq!(game.tile(2, 3).map(|t| t.value()), Some(4));
//! assert_eq!(game.tile(1, 3), None);
//! ```

mod board;
mod model;
mod side;

pub use board::{Board, Tile};
pub use model::{Model, MAX_PIECE};
pub use side::Side;

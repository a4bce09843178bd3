//! # Board widget types for chessview
//!
//! This is an auxiliary crate for `chessview`. It describes the board as a widget sees it: squares named
//! `a1` ... `h8`, pieces with a role, a color and a promoted flag, and the calls that mutate the board.
//!
//! It doesn't know anything about chess rules, so widget implementations can depend on it alone.

pub mod pieces;
pub mod types;
pub mod widget;

pub use pieces::{Changes, Pieces, PlacementParseError};
pub use types::{Color, File, Key, LastMove, Piece, Rank, Role};
pub use widget::{BoardState, BoardWidget, Dests, MemoryBoard, Shape, WidgetCall};

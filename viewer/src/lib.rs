//! # Navigable chess games
//!
//! `chessview` turns a starting position and a list of SAN moves into a game which can be
//! navigated move by move, forward and backward, with optional timed auto-play. It drives a
//! board widget through [`BoardWidget`](chessview_board::BoardWidget) and never renders
//! anything by itself.
//!
//! Single steps are sent to the widget as square-level diffs, jumps as full snapshots. Chess
//! rules come from [`shakmaty`], including variants with piece drops.
//!
//! # Example
//!
//! ```
//! use chessview::{BlockOptions, Game, ManualScheduler, ViewerConfig};
//! use chessview_board::MemoryBoard;
//!
//! let options = BlockOptions::parse("moves: 1. e4 e5 2. Nf3");
//! let config = ViewerConfig::default();
//! let mut session = Game::from_options(&options).into_session(
//!     MemoryBoard::new(),
//!     ManualScheduler::new(),
//!     &config,
//! );
//! session.go_to_last();
//! assert_eq!(session.current_move(), 3);
//! assert!(session.step_backward());
//! assert_eq!(
//!     session.current_fen(),
//!     "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
//! );
//! ```

pub mod adapt;
pub mod config;
pub mod delta;
pub mod diff;
pub mod game;
pub mod navigate;
pub mod options;
pub mod pgn;
pub mod play;
pub mod session;
pub mod setup;
pub mod timer;

pub use config::{BoardTheme, PieceSet, ViewerConfig};
pub use delta::BoardDelta;
pub use diff::{Motion, MoveShape};
pub use game::Game;
pub use navigate::Navigator;
pub use options::BlockOptions;
pub use pgn::{read_games, PgnError, PgnGame};
pub use play::StaticPosition;
pub use session::{Controls, GameSession};
pub use setup::{FenError, Rules, StartPosition, VariantError};
pub use timer::{ManualScheduler, Scheduler, TimerId};

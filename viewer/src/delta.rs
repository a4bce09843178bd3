use crate::diff::Motion;

use chessview_board::{BoardState, BoardWidget, Color, LastMove};
use std::fmt;

/// Board update produced by a single cursor transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardDelta {
    /// Replaces the whole position, used on resets and jumps
    FullSnapshot {
        fen: String,
        turn: Color,
        check: bool,
        last_move: Option<LastMove>,
    },
    /// Changes only the squares touched by one move
    PieceDiff {
        motion: Motion,
        turn: Color,
        check: bool,
        last_move: Option<LastMove>,
    },
}

impl BoardDelta {
    pub fn turn(&self) -> Color {
        match self {
            BoardDelta::FullSnapshot { turn, .. } | BoardDelta::PieceDiff { turn, .. } => *turn,
        }
    }

    pub fn check(&self) -> bool {
        match self {
            BoardDelta::FullSnapshot { check, .. } | BoardDelta::PieceDiff { check, .. } => *check,
        }
    }

    pub fn last_move(&self) -> Option<LastMove> {
        match self {
            BoardDelta::FullSnapshot { last_move, .. }
            | BoardDelta::PieceDiff { last_move, .. } => *last_move,
        }
    }

    pub fn is_snapshot(&self) -> bool {
        matches!(self, BoardDelta::FullSnapshot { .. })
    }

    /// Sends the delta to the widget
    ///
    /// Pieces are mutated first, then turn, check and highlight are set in one call.
    pub fn apply<W: BoardWidget + ?Sized>(self, board: &mut W) {
        let (fen, turn, check, last_move) = match self {
            BoardDelta::FullSnapshot {
                fen,
                turn,
                check,
                last_move,
            } => (Some(fen), turn, check, last_move),
            BoardDelta::PieceDiff {
                motion,
                turn,
                check,
                last_move,
            } => {
                match motion {
                    Motion::Move { from, to } => board.move_piece(from, to),
                    Motion::Drop { piece, to } => board.new_piece(piece, to),
                    Motion::Pieces(changes) => board.set_pieces(&changes),
                }
                (None, turn, check, last_move)
            }
        };
        board.set(BoardState {
            fen,
            turn: Some(turn),
            check: Some(check),
            last_move: Some(last_move),
            ..BoardState::default()
        });
    }
}

impl fmt::Display for BoardDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            BoardDelta::FullSnapshot { fen, .. } => write!(f, "snapshot {}", fen)?,
            BoardDelta::PieceDiff { motion, .. } => write!(f, "diff {}", motion)?,
        }
        write!(f, ", {} to move", self.turn())?;
        if self.check() {
            write!(f, ", check")?;
        }
        if let Some(last_move) = self.last_move() {
            write!(f, ", last move {}", last_move)?;
        }
        Ok(())
    }
}

//! Static positions the user can play on
//!
//! A block without moves shows a single position. When it is movable, pieces may only be dragged
//! to legal destinations, and every accepted move updates the position, the highlight and the
//! destinations of the side to move.

use crate::adapt;
use crate::delta::BoardDelta;
use crate::diff::{self, MoveShape};
use crate::options::BlockOptions;
use crate::session::write_shapes;
use crate::setup::StartPosition;

use chessview_board::{BoardState, BoardWidget, Dests, Key, LastMove, Role, Shape};
use shakmaty::variant::VariantPosition;
use shakmaty::{Move, Position};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::debug;

/// Role a pawn promotes to when it is dragged to the last rank
pub const DEFAULT_PROMOTION: Role = Role::Queen;

fn push_dest(map: &mut BTreeMap<Key, Vec<Key>>, orig: Key, dest: Key) {
    let dests = map.entry(orig).or_default();
    if !dests.contains(&dest) {
        dests.push(dest);
    }
}

/// Legal destinations of the side to move
///
/// Drops have no origin square and are left out. A castling king may be dragged either to its
/// target square or onto its rook.
pub fn dests<P: Position>(pos: &P) -> Dests {
    let mut map = BTreeMap::new();
    for m in pos.legal_moves() {
        match MoveShape::of(&m) {
            MoveShape::Drop { .. } => {}
            MoveShape::Regular { from, to }
            | MoveShape::Promotion { from, to, .. }
            | MoveShape::EnPassant { from, to, .. } => push_dest(&mut map, from, to),
            MoveShape::Castle {
                king,
                rook,
                king_to,
                ..
            } => {
                if king_to != king {
                    push_dest(&mut map, king, king_to);
                }
                push_dest(&mut map, king, rook);
            }
        }
    }
    map.into_iter()
        .map(|(orig, mut dests)| {
            dests.sort();
            (orig, dests)
        })
        .collect()
}

fn find_move<P: Position>(pos: &P, from: Key, to: Key) -> Option<Move> {
    pos.legal_moves()
        .into_iter()
        .find(|m| match MoveShape::of(m) {
            MoveShape::Regular { from: f, to: t } | MoveShape::EnPassant { from: f, to: t, .. } => {
                (f, t) == (from, to)
            }
            MoveShape::Promotion { from: f, to: t, role } => {
                (f, t) == (from, to) && role == DEFAULT_PROMOTION
            }
            MoveShape::Castle {
                king,
                rook,
                king_to,
                ..
            } => king == from && (to == rook || to == king_to),
            MoveShape::Drop { .. } => false,
        })
}

/// Position of a block without moves
#[derive(Debug, Clone)]
pub struct StaticPosition {
    position: VariantPosition,
    user_move: Option<LastMove>,
    movable: bool,
    drawable: bool,
}

impl StaticPosition {
    pub fn new(start: &StartPosition, movable: bool, drawable: bool) -> Self {
        StaticPosition {
            position: start.position().clone(),
            user_move: None,
            movable,
            drawable,
        }
    }

    pub fn from_options(options: &BlockOptions) -> Self {
        Self::new(
            &options.start_position(),
            options.is_movable(),
            options.is_drawable(),
        )
    }

    pub fn position(&self) -> &VariantPosition {
        &self.position
    }

    pub fn fen(&self) -> String {
        adapt::fen(&self.position)
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    /// Last move played by the user, as dragged
    pub fn user_move(&self) -> Option<LastMove> {
        self.user_move
    }

    /// Destinations the user may drag to; empty if the position is not movable
    pub fn dests(&self) -> Dests {
        if self.movable {
            dests(&self.position)
        } else {
            Dests::new()
        }
    }

    /// Turn, check and destinations to send after the position has changed
    pub fn movable_state(&self) -> BoardState {
        BoardState {
            turn: Some(adapt::turn(&self.position)),
            check: Some(self.position.is_check()),
            movable_dests: Some(self.dests()),
            ..BoardState::default()
        }
    }

    /// Plays the move the user dragged from `from` to `to`
    ///
    /// Only legal moves are accepted, and a pawn reaching the last rank becomes a
    /// [`DEFAULT_PROMOTION`]. The dragged squares become the highlight. Returns `None` and keeps
    /// the position if the move is rejected.
    ///
    /// The widget may already show the dragged piece on `to`. Applying the returned delta to such
    /// a board gives the same placement.
    pub fn play_user_move(&mut self, from: Key, to: Key) -> Option<BoardDelta> {
        if !self.movable {
            debug!(%from, %to, "position is not movable");
            return None;
        }
        let Some(m) = find_move(&self.position, from, to) else {
            debug!(%from, %to, "rejecting illegal move");
            return None;
        };
        let before = self.position.clone();
        let motion = diff::forward(&before, &m);
        self.position.play_unchecked(&m);
        let last_move = Some(LastMove(from, to));
        self.user_move = last_move;
        let turn = adapt::turn(&self.position);
        let check = self.position.is_check();
        if !diff::is_exact(&before, &motion, &self.position) {
            return Some(BoardDelta::FullSnapshot {
                fen: self.fen(),
                turn,
                check,
                last_move,
            });
        }
        Some(BoardDelta::PieceDiff {
            motion,
            turn,
            check,
            last_move,
        })
    }

    /// Plays a user move and updates the widget; returns `true` if the move was accepted
    pub fn on_user_move<W: BoardWidget + ?Sized>(
        &mut self,
        board: &mut W,
        from: Key,
        to: Key,
    ) -> bool {
        let Some(delta) = self.play_user_move(from, to) else {
            return false;
        };
        delta.apply(board);
        board.set(self.movable_state());
        true
    }

    /// Text for the position info panel
    ///
    /// Movable positions show their FEN and the last move of the user. Drawable ones list the
    /// shapes the user has drawn.
    pub fn info_text(&self, user_shapes: &[Shape]) -> String {
        let mut res = String::new();
        if self.movable {
            let _ = writeln!(res, "fen: {}", self.fen());
            if let Some(LastMove(from, to)) = self.user_move {
                let _ = writeln!(res, "lastMove: {} {}", from, to);
            }
        }
        if self.drawable {
            write_shapes(&mut res, user_shapes);
        }
        res.trim_end().to_string()
    }
}

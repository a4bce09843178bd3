//! Square-level diffs between consecutive positions
//!
//! Both directions are computed from the position before the move. Everything the reverse diff
//! restores is read from that position, so undoing never has to guess what a move captured.

use crate::adapt;

use chessview_board::{Changes, File, Key, Piece, Pieces, Role};
use shakmaty::{Move, Position};
use std::fmt;

/// Shape of a move, as far as the board widget is concerned
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveShape {
    Drop {
        role: Role,
        to: Key,
    },
    Regular {
        from: Key,
        to: Key,
    },
    Promotion {
        from: Key,
        to: Key,
        role: Role,
    },
    EnPassant {
        from: Key,
        to: Key,
        captured: Key,
    },
    Castle {
        king: Key,
        rook: Key,
        king_to: Key,
        rook_to: Key,
    },
}

impl MoveShape {
    pub fn of(m: &Move) -> MoveShape {
        match *m {
            Move::Put { role, to } => MoveShape::Drop {
                role: adapt::role(role),
                to: adapt::key(to),
            },
            Move::Normal {
                from,
                to,
                promotion: Some(promotion),
                ..
            } => MoveShape::Promotion {
                from: adapt::key(from),
                to: adapt::key(to),
                role: adapt::role(promotion),
            },
            Move::Normal {
                from,
                to,
                promotion: None,
                ..
            } => MoveShape::Regular {
                from: adapt::key(from),
                to: adapt::key(to),
            },
            Move::EnPassant { from, to } => {
                let (from, to) = (adapt::key(from), adapt::key(to));
                MoveShape::EnPassant {
                    from,
                    to,
                    captured: Key::from_parts(to.file(), from.rank()),
                }
            }
            Move::Castle { king, rook } => {
                let (king, rook) = (adapt::key(king), adapt::key(rook));
                let (king_file, rook_file) = if rook.file() < king.file() {
                    (File::C, File::D)
                } else {
                    (File::G, File::F)
                };
                MoveShape::Castle {
                    king,
                    rook,
                    king_to: Key::from_parts(king_file, king.rank()),
                    rook_to: Key::from_parts(rook_file, king.rank()),
                }
            }
        }
    }
}

/// Widget mutation for a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Motion {
    /// Animated move, capturing whatever stands on `to`
    Move { from: Key, to: Key },
    /// New piece appears on `to`
    Drop { piece: Piece, to: Key },
    /// Independent square assignments
    Pieces(Changes),
}

impl Motion {
    /// Applies the motion to a placement the same way a widget does
    pub fn apply_to(&self, pieces: &mut Pieces) {
        match self {
            Motion::Move { from, to } => pieces.relocate(*from, *to),
            Motion::Drop { piece, to } => pieces.put(*to, Some(*piece)),
            Motion::Pieces(changes) => pieces.apply(changes),
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Motion::Move { from, to } => write!(f, "{}-{}", from, to),
            Motion::Drop { piece, to } => write!(f, "{}@{}", piece, to),
            Motion::Pieces(changes) => write!(f, "{{{}}}", changes),
        }
    }
}

fn occupant<P: Position>(pos: &P, key: Key) -> Option<Piece> {
    adapt::piece_at(pos, adapt::square(key))
}

/// Computes the widget motion which plays `m` from `pos`
pub fn forward<P: Position>(pos: &P, m: &Move) -> Motion {
    let color = adapt::turn(pos);
    match MoveShape::of(m) {
        MoveShape::Drop { role, to } => Motion::Drop {
            piece: Piece::new(color, role),
            to,
        },
        MoveShape::Regular { from, to } => Motion::Move { from, to },
        MoveShape::Promotion { from, to, role } => Motion::Pieces(
            Changes::new()
                .with(from, None)
                .with(to, Some(Piece::promoted(color, role))),
        ),
        MoveShape::EnPassant { from, to, captured } => Motion::Pieces(
            Changes::new()
                .with(from, None)
                .with(to, Some(Piece::new(color, Role::Pawn)))
                .with(captured, None),
        ),
        MoveShape::Castle {
            king,
            rook,
            king_to,
            rook_to,
        } => Motion::Pieces(
            Changes::new()
                .with(king, None)
                .with(rook, None)
                .with(king_to, occupant(pos, king))
                .with(rook_to, occupant(pos, rook)),
        ),
    }
}

/// Computes the changes which take the board back from the position after `m` to `pos`
pub fn reverse<P: Position>(pos: &P, m: &Move) -> Changes {
    let color = adapt::turn(pos);
    match MoveShape::of(m) {
        MoveShape::Drop { to, .. } => Changes::new().with(to, None),
        MoveShape::Regular { from, to } => Changes::new()
            .with(from, occupant(pos, from))
            .with(to, occupant(pos, to)),
        MoveShape::Promotion { from, to, .. } => Changes::new()
            .with(from, Some(Piece::new(color, Role::Pawn)))
            .with(to, occupant(pos, to)),
        MoveShape::EnPassant { from, to, captured } => Changes::new()
            .with(to, None)
            .with(from, Some(Piece::new(color, Role::Pawn)))
            .with(captured, Some(Piece::new(color.inv(), Role::Pawn))),
        MoveShape::Castle {
            king,
            rook,
            king_to,
            rook_to,
        } => Changes::new()
            .with(king_to, None)
            .with(rook_to, None)
            .with(king, occupant(pos, king))
            .with(rook, occupant(pos, rook)),
    }
}

/// Checks whether `motion` alone turns the placement of `before` into the one of `after`
///
/// It doesn't hold for side effects outside the move shape, like explosions in atomic chess.
pub fn is_exact<P: Position>(before: &P, motion: &Motion, after: &P) -> bool {
    let mut pieces = adapt::pieces(before);
    motion.apply_to(&mut pieces);
    pieces.same_placement(&adapt::pieces(after))
}

/// Same as [`is_exact()`] for the reverse changes
pub fn is_exact_reverse<P: Position>(before: &P, changes: &Changes, after: &P) -> bool {
    let mut pieces = adapt::pieces(after);
    pieces.apply(changes);
    pieces.same_placement(&adapt::pieces(before))
}

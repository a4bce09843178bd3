//! Conversions between the rules engine and the board widget

use chessview_board::{Color, Key, LastMove, Piece, Pieces, Role};
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{EnPassantMode, File, Move, Position, Square};

pub fn key(sq: Square) -> Key {
    Key::from_index(usize::from(sq))
}

pub fn square(key: Key) -> Square {
    Square::new(key.index() as u32)
}

pub fn color(c: shakmaty::Color) -> Color {
    match c {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

pub fn role(r: shakmaty::Role) -> Role {
    match r {
        shakmaty::Role::Pawn => Role::Pawn,
        shakmaty::Role::Knight => Role::Knight,
        shakmaty::Role::Bishop => Role::Bishop,
        shakmaty::Role::Rook => Role::Rook,
        shakmaty::Role::Queen => Role::Queen,
        shakmaty::Role::King => Role::King,
    }
}

pub fn piece(p: shakmaty::Piece, promoted: bool) -> Piece {
    Piece {
        role: role(p.role),
        color: color(p.color),
        promoted,
    }
}

/// Returns the piece on `sq`, including the promoted flag tracked by the position
pub fn piece_at<P: Position>(pos: &P, sq: Square) -> Option<Piece> {
    pos.board()
        .piece_at(sq)
        .map(|p| piece(p, pos.promoted().contains(sq)))
}

/// Returns the full placement of `pos`, as the widget would show it
pub fn pieces<P: Position>(pos: &P) -> Pieces {
    let mut res = Pieces::EMPTY;
    for sq in pos.board().occupied() {
        res.put(key(sq), piece_at(pos, sq));
    }
    res
}

pub fn turn<P: Position>(pos: &P) -> Color {
    color(pos.turn())
}

pub fn fen<P: Position + Clone>(pos: &P) -> String {
    Fen::from_position(pos.clone(), EnPassantMode::Legal).to_string()
}

/// Squares to highlight after `m` was played
///
/// Castling highlights the king's path, drops highlight the target square twice.
pub fn last_move(m: &Move) -> LastMove {
    match *m {
        Move::Normal { from, to, .. } | Move::EnPassant { from, to } => LastMove(key(from), key(to)),
        Move::Castle { king, rook } => {
            let file = if rook.file() < king.file() {
                File::C
            } else {
                File::G
            };
            LastMove(key(king), key(Square::from_coords(file, king.rank())))
        }
        Move::Put { to, .. } => LastMove(key(to), key(to)),
    }
}

/// Parses `san` in the context of `pos`
///
/// Returns `None` both for malformed text and for moves that are not legal in `pos`.
pub fn parse_san<P: Position>(pos: &P, san: &str) -> Option<Move> {
    let san_plus = SanPlus::from_ascii(san.as_bytes()).ok()?;
    san_plus.san.to_move(pos).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Chess;
    use std::str::FromStr;

    fn k(s: &str) -> Key {
        Key::from_str(s).unwrap()
    }

    #[test]
    fn test_squares() {
        for sq in Square::ALL {
            assert_eq!(square(key(sq)), sq);
            assert_eq!(key(sq).to_string(), sq.to_string());
        }
        assert_eq!(key(Square::A1).index(), 0);
        assert_eq!(key(Square::H8).index(), 63);
    }

    #[test]
    fn test_pieces() {
        let pos = Chess::default();
        assert_eq!(
            piece_at(&pos, Square::G1),
            Some(Piece::new(Color::White, Role::Knight))
        );
        assert_eq!(
            piece_at(&pos, Square::E8),
            Some(Piece::new(Color::Black, Role::King))
        );
        assert_eq!(piece_at(&pos, Square::E4), None);
        assert_eq!(turn(&pos), Color::White);
        assert_eq!(pieces(&pos).count(), 32);
        assert_eq!(
            pieces(&pos).as_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        assert_eq!(
            fen(&pos),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn test_last_move() {
        let pos = Chess::default();
        let m = parse_san(&pos, "Nf3").unwrap();
        assert_eq!(last_move(&m), LastMove(k("g1"), k("f3")));

        let pos: Chess = Fen::from_ascii(b"r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .unwrap()
            .into_position(shakmaty::CastlingMode::Standard)
            .unwrap();
        let m = parse_san(&pos, "O-O").unwrap();
        assert_eq!(last_move(&m), LastMove(k("e1"), k("g1")));
        let m = parse_san(&pos, "O-O-O").unwrap();
        assert_eq!(last_move(&m), LastMove(k("e1"), k("c1")));
    }

    #[test]
    fn test_parse_san() {
        let pos = Chess::default();
        assert!(parse_san(&pos, "e4").is_some());
        assert!(parse_san(&pos, "Nf3+").is_some());
        assert!(parse_san(&pos, "e5").is_none());
        assert!(parse_san(&pos, "Zz9").is_none());
        assert!(parse_san(&pos, "").is_none());
    }
}

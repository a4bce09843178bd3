//! Move cursor over a fixed mainline
//!
//! [`Navigator`] owns the starting position, the SAN moves and a cursor. Its live position is
//! always the starting position with the first [`Navigator::pos()`] moves applied, and every
//! cursor transition returns the [`BoardDelta`] which brings the widget to the new position.

use crate::adapt;
use crate::delta::BoardDelta;
use crate::diff::{self, Motion};
use crate::setup::StartPosition;

use chessview_board::LastMove;
use shakmaty::variant::VariantPosition;
use shakmaty::{Move, Position};
use tracing::debug;

struct Replay {
    position: VariantPosition,
    last_move: Option<LastMove>,
    applied: usize,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    start: StartPosition,
    moves: Vec<String>,
    pos: usize,
    live: VariantPosition,
    last_move: Option<LastMove>,
    reachable: usize,
}

impl Navigator {
    pub fn new(start: StartPosition, moves: Vec<String>) -> Self {
        let mut nav = Navigator {
            live: start.position().clone(),
            last_move: start.last_move(),
            start,
            moves,
            pos: 0,
            reachable: 0,
        };
        nav.reachable = nav.replay(nav.moves.len()).applied;
        nav
    }

    /// Total number of moves, including the ones after a bad SAN
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Number of moves which can be played from the starting position
    pub fn reachable_len(&self) -> usize {
        self.reachable
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn start(&self) -> &StartPosition {
        &self.start
    }

    pub fn position(&self) -> &VariantPosition {
        &self.live
    }

    pub fn fen(&self) -> String {
        adapt::fen(&self.live)
    }

    /// Highlight shown for the current position
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn can_step_forward(&self) -> bool {
        self.pos < self.reachable
    }

    pub fn can_step_backward(&self) -> bool {
        self.pos > 0
    }

    pub fn snapshot(&self) -> BoardDelta {
        BoardDelta::FullSnapshot {
            fen: adapt::fen(&self.live),
            turn: adapt::turn(&self.live),
            check: self.live.is_check(),
            last_move: self.last_move,
        }
    }

    fn parse(&self, pos: &VariantPosition, idx: usize) -> Option<Move> {
        let san = &self.moves[idx];
        let m = adapt::parse_san(pos, san);
        if m.is_none() {
            debug!(san = san.as_str(), idx, "cannot play move, stopping here");
        }
        m
    }

    fn replay(&self, upto: usize) -> Replay {
        let mut res = Replay {
            position: self.start.position().clone(),
            last_move: self.start.last_move(),
            applied: 0,
        };
        while res.applied < upto {
            let Some(m) = self.parse(&res.position, res.applied) else {
                break;
            };
            res.position.play_unchecked(&m);
            res.last_move = Some(adapt::last_move(&m));
            res.applied += 1;
        }
        res
    }

    fn reset_to(&mut self, replay: Replay) {
        self.live = replay.position;
        self.last_move = replay.last_move;
        self.pos = replay.applied;
    }

    /// Goes back to the starting position
    pub fn first(&mut self) -> BoardDelta {
        debug!(from = self.pos, "going to the start");
        self.live = self.start.position().clone();
        self.last_move = self.start.last_move();
        self.pos = 0;
        self.snapshot()
    }

    /// Plays the remaining moves in place, stopping before the first one which cannot be played
    ///
    /// If no move is played, the highlight stays as it was.
    pub fn last(&mut self) -> BoardDelta {
        debug!(from = self.pos, "going to the end");
        while self.pos < self.reachable {
            let Some(m) = self.parse(&self.live, self.pos) else {
                self.reachable = self.pos;
                break;
            };
            self.live.play_unchecked(&m);
            self.last_move = Some(adapt::last_move(&m));
            self.pos += 1;
        }
        self.snapshot()
    }

    /// Jumps to move `idx`, clamped to the reachable moves, replaying from the start
    pub fn jump(&mut self, idx: usize) -> BoardDelta {
        let idx = idx.min(self.reachable);
        debug!(from = self.pos, to = idx, "jumping");
        let replay = self.replay(idx);
        if replay.applied < idx {
            self.reachable = replay.applied;
        }
        self.reset_to(replay);
        self.snapshot()
    }

    /// Plays the next move
    ///
    /// Returns `None` at the end of the reachable moves.
    pub fn next(&mut self) -> Option<BoardDelta> {
        if self.pos >= self.reachable {
            return None;
        }
        let Some(m) = self.parse(&self.live, self.pos) else {
            self.reachable = self.pos;
            return None;
        };
        let before = self.live.clone();
        let motion = diff::forward(&before, &m);
        self.live.play_unchecked(&m);
        self.last_move = Some(adapt::last_move(&m));
        self.pos += 1;
        if !diff::is_exact(&before, &motion, &self.live) {
            return Some(self.snapshot());
        }
        Some(BoardDelta::PieceDiff {
            motion,
            turn: adapt::turn(&self.live),
            check: self.live.is_check(),
            last_move: self.last_move,
        })
    }

    /// Takes back the last played move
    ///
    /// The position before that move is rebuilt by replaying from the start, and the changes
    /// are computed from it. Returns `None` at the starting position.
    pub fn prev(&mut self) -> Option<BoardDelta> {
        if self.pos == 0 {
            return None;
        }
        let replay = self.replay(self.pos - 1);
        let m = if replay.applied == self.pos - 1 {
            self.parse(&replay.position, self.pos - 1)
        } else {
            None
        };
        let Some(m) = m else {
            // The cursor was not reachable from the start, so settle where the replay stopped
            self.reachable = replay.applied;
            self.reset_to(replay);
            return Some(self.snapshot());
        };
        let changes = diff::reverse(&replay.position, &m);
        let exact = diff::is_exact_reverse(&replay.position, &changes, &self.live);
        self.reset_to(replay);
        if !exact {
            return Some(self.snapshot());
        }
        Some(BoardDelta::PieceDiff {
            motion: Motion::Pieces(changes),
            turn: adapt::turn(&self.live),
            check: self.live.is_check(),
            last_move: self.last_move,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::Rules;
    use chessview_board::{Color, Key, MemoryBoard};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use shakmaty::san::San;
    use std::str::FromStr;

    fn k(s: &str) -> Key {
        Key::from_str(s).unwrap()
    }

    fn nav(fen: &str, moves: &str) -> Navigator {
        let start = StartPosition::from_options(Rules::STANDARD, Some(fen), None);
        Navigator::new(start, moves.split_whitespace().map(String::from).collect())
    }

    fn nav_initial(moves: &str) -> Navigator {
        Navigator::new(
            StartPosition::default(),
            moves.split_whitespace().map(String::from).collect(),
        )
    }

    fn board_for(nav: &Navigator) -> MemoryBoard {
        let mut board = MemoryBoard::new();
        nav.snapshot().apply(&mut board);
        board
    }

    #[test]
    fn test_open_game() {
        let mut nav = nav_initial("e4 e5 Nf3");
        let mut board = board_for(&nav);
        for _ in 0..3 {
            nav.next().unwrap().apply(&mut board);
        }
        assert!(nav.next().is_none());
        assert_eq!(
            board.pieces().as_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R"
        );
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.last_move(), Some(LastMove(k("g1"), k("f3"))));

        nav.prev().unwrap().apply(&mut board);
        assert_eq!(board.last_move(), Some(LastMove(k("e7"), k("e5"))));
        assert_eq!(board.turn(), Color::White);
        assert_eq!(
            board.pieces().as_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR"
        );
        assert_eq!(nav.pos(), 2);
        assert_eq!(
            nav.fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2"
        );
    }

    #[test]
    fn test_special_moves() {
        const TESTS: [(&str, &str, &str); 4] = [
            (
                "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
                "exf6 Nxf6",
                "rnbqkb1r/ppp1p1pp/5n2/3p4/8/8/PPPP1PPP/RNBQKBNR",
            ),
            (
                "rnbqkbnr/ppp1pppp/8/8/2Pp4/8/PP1PPPPP/RNBQKBNR b KQkq c3 0 2",
                "dxc3 dxc3",
                "rnbqkbnr/ppp1pppp/8/8/8/2P5/PP2PPPP/RNBQKBNR",
            ),
            (
                "1r5k/P7/8/8/8/8/8/4K3 w - - 0 1",
                "axb8=Q+ Kh7 Qb1+",
                "8/7k/8/8/8/8/8/1Q~2K3",
            ),
            (
                "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1",
                "O-O O-O-O",
                "2kr3r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1",
            ),
        ];

        for (fen, moves, expected) in TESTS {
            let mut nav = nav(fen, moves);
            let mut board = board_for(&nav);
            while let Some(delta) = nav.next() {
                assert!(!delta.is_snapshot());
                delta.apply(&mut board);
            }
            assert_eq!(board.pieces().as_fen(), expected, "{} from {}", moves, fen);
            while let Some(delta) = nav.prev() {
                delta.apply(&mut board);
            }
            assert_eq!(
                board.pieces().as_fen(),
                fen.split(' ').next().unwrap(),
                "{} from {}",
                moves,
                fen
            );
            assert_eq!(nav.fen(), fen);
        }
    }

    #[test]
    fn test_en_passant_vacates() {
        let mut nav = nav(
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
            "exd6",
        );
        let mut board = board_for(&nav);
        nav.next().unwrap().apply(&mut board);
        assert_eq!(board.pieces().get(k("d5")), None);
        assert!(board.pieces().get(k("d6")).is_some());
    }

    #[test]
    fn test_promotion_restores() {
        let mut nav = nav("1r5k/P7/8/8/8/8/8/4K3 w - - 0 1", "axb8=Q+");
        let mut board = board_for(&nav);
        nav.next().unwrap().apply(&mut board);
        assert_eq!(board.pieces().get(k("a7")), None);
        assert!(board.pieces().get(k("b8")).unwrap().promoted);
        assert!(board.check());
        nav.prev().unwrap().apply(&mut board);
        assert_eq!(board.pieces().get(k("a7")).unwrap().to_string(), "P");
        assert_eq!(board.pieces().get(k("b8")).unwrap().to_string(), "r");
        assert!(!board.check());
    }

    #[test]
    fn test_boundaries() {
        let mut nav = nav_initial("e4 e5");
        assert!(nav.prev().is_none());
        assert_eq!(nav.pos(), 0);
        nav.last();
        assert_eq!(nav.pos(), 2);
        assert!(nav.next().is_none());
        assert_eq!(nav.pos(), 2);

        let mut nav = nav_initial("");
        assert!(nav.is_empty());
        assert!(nav.next().is_none());
        assert!(nav.prev().is_none());
        assert!(nav.last().is_snapshot());
        assert_eq!(nav.pos(), 0);
    }

    #[test]
    fn test_bad_san() {
        let mut nav = nav_initial("e4 e5 Ke3 Nf3");
        assert_eq!(nav.len(), 4);
        assert_eq!(nav.reachable_len(), 2);
        let delta = nav.last();
        assert_eq!(nav.pos(), 2);
        assert_eq!(delta.last_move(), Some(LastMove(k("e7"), k("e5"))));
        assert!(!nav.can_step_forward());
        assert!(nav.next().is_none());
        assert_eq!(nav.pos(), 2);
        assert_eq!(nav.jump(10).last_move(), Some(LastMove(k("e7"), k("e5"))));
        assert_eq!(nav.pos(), 2);

        let mut nav = nav_initial("Ke2 e4");
        assert_eq!(nav.reachable_len(), 0);
        assert!(nav.next().is_none());
    }

    #[test]
    fn test_initial_last_move() {
        let start = StartPosition::from_options(
            Rules::STANDARD,
            Some("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"),
            Some("e2 e4"),
        );
        let initial = Some(LastMove(k("e2"), k("e4")));
        let mut nav = Navigator::new(start, vec!["c5".to_string()]);
        assert_eq!(nav.snapshot().last_move(), initial);
        nav.next();
        assert_eq!(nav.last_move(), Some(LastMove(k("c7"), k("c5"))));
        assert_eq!(nav.prev().unwrap().last_move(), initial);
        assert_eq!(nav.last().last_move(), Some(LastMove(k("c7"), k("c5"))));
        assert_eq!(nav.first().last_move(), initial);
        assert_eq!(nav.jump(0).last_move(), initial);
    }

    #[test]
    fn test_jump() {
        let mut nav = nav_initial("d4 d5 c4 e6 Nc3 Nf6");
        let delta = nav.jump(4);
        assert_eq!(nav.pos(), 4);
        assert_eq!(delta.last_move(), Some(LastMove(k("e7"), k("e6"))));
        nav.jump(1);
        assert_eq!(
            nav.fen(),
            "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq - 0 1"
        );
        nav.next();
        nav.next();
        assert_eq!(nav.pos(), 3);
    }

    #[test]
    fn test_crazyhouse() {
        let start = StartPosition::initial(Rules::from_name("crazyhouse").unwrap());
        let moves = "e4 d5 exd5 Qxd5 Nc3 Qe6+ Qe2 Qxe2+ Bxe2 Q@e4 P@d5";
        let mut nav = Navigator::new(start, moves.split(' ').map(String::from).collect());
        assert_eq!(nav.reachable_len(), 11);
        let mut board = board_for(&nav);
        while let Some(delta) = nav.next() {
            assert!(!delta.is_snapshot());
            delta.apply(&mut board);
            assert!(board.pieces().same_placement(&adapt::pieces(nav.position())));
        }
        while let Some(delta) = nav.prev() {
            delta.apply(&mut board);
            assert!(board.pieces().same_placement(&adapt::pieces(nav.position())));
        }
    }

    #[test]
    fn test_atomic_snapshot() {
        let start = StartPosition::initial(Rules::from_name("atomic").unwrap());
        let moves = ["e4", "d5", "exd5"].map(String::from).to_vec();
        let mut nav = Navigator::new(start, moves);
        let mut board = board_for(&nav);
        nav.next().unwrap().apply(&mut board);
        nav.next().unwrap().apply(&mut board);
        let delta = nav.next().unwrap();
        assert!(delta.is_snapshot());
        delta.apply(&mut board);
        assert!(board.pieces().same_placement(&adapt::pieces(nav.position())));
        nav.prev().unwrap().apply(&mut board);
        assert!(board.pieces().same_placement(&adapt::pieces(nav.position())));
    }

    fn random_game(rng: &mut StdRng, plies: usize) -> Vec<String> {
        let mut pos = shakmaty::Chess::default();
        let mut res = Vec::new();
        for _ in 0..plies {
            let legal = pos.legal_moves();
            let Some(m) = legal.choose(rng) else {
                break;
            };
            res.push(San::from_move(&pos, m).to_string());
            pos.play_unchecked(m);
        }
        res
    }

    #[test]
    fn test_random_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let moves = random_game(&mut rng, 80);
            let total = moves.len();
            let mut nav = Navigator::new(StartPosition::default(), moves);
            assert_eq!(nav.reachable_len(), total);
            let start_fen = nav.fen();
            let mut board = board_for(&nav);
            let mut fens = vec![nav.fen()];
            while let Some(delta) = nav.next() {
                delta.apply(&mut board);
                assert!(board.pieces().same_placement(&adapt::pieces(nav.position())));
                fens.push(nav.fen());
            }
            assert_eq!(nav.pos(), total);

            for idx in (0..total).rev() {
                nav.prev().unwrap().apply(&mut board);
                assert_eq!(nav.pos(), idx);
                assert_eq!(nav.fen(), fens[idx]);
                assert!(board.pieces().same_placement(&adapt::pieces(nav.position())));
            }
            assert_eq!(nav.fen(), start_fen);

            for (idx, fen) in fens.iter().enumerate() {
                nav.jump(idx);
                assert_eq!(&nav.fen(), fen);
            }
        }
    }
}

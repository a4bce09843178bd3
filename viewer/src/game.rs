use crate::config::ViewerConfig;
use crate::navigate::Navigator;
use crate::options::BlockOptions;
use crate::pgn::PgnGame;
use crate::session::GameSession;
use crate::setup::{parse_last_move, StartPosition};
use crate::timer::Scheduler;

use chessview_board::{BoardWidget, Color, Shape};

/// Game ready to be shown: start position, mainline and board decorations
#[derive(Debug, Clone)]
pub struct Game {
    pub start: StartPosition,
    pub moves: Vec<String>,
    pub initial_move: usize,
    pub orientation: Color,
    pub shapes: Vec<Shape>,
    pub view_only: bool,
    /// Board width in pixels
    pub size: Option<u32>,
}

impl Game {
    pub fn from_options(options: &BlockOptions) -> Game {
        Game {
            start: options.start_position(),
            moves: options.moves.clone().unwrap_or_default(),
            initial_move: options.initial_move.unwrap_or(0),
            orientation: options.orientation.unwrap_or(Color::White),
            shapes: options.shapes(),
            view_only: options.is_view_only(),
            size: options.size,
        }
    }

    /// Builds a game from PGN, with the options of the block it came from
    ///
    /// Orientation from options wins over the one derived from the main player name. The
    /// `lastMove` option highlights a move before the first one, for games opened mid-way.
    pub fn from_pgn(game: &PgnGame, options: &BlockOptions, config: &ViewerConfig) -> Game {
        Game {
            start: game
                .start()
                .clone()
                .with_last_move(options.last_move.as_deref().and_then(parse_last_move)),
            moves: game.moves().to_vec(),
            initial_move: options.initial_move.unwrap_or(0),
            orientation: options
                .orientation
                .unwrap_or_else(|| game.orientation(config)),
            shapes: options.shapes(),
            view_only: options.is_view_only(),
            size: options.size,
        }
    }

    pub fn into_session<W: BoardWidget, S: Scheduler>(
        self,
        board: W,
        scheduler: S,
        config: &ViewerConfig,
    ) -> GameSession<W, S> {
        let nav = Navigator::new(self.start, self.moves);
        let mut session = GameSession::new(nav, board, scheduler);
        session.set_playback(config.playback());
        session.set_orientation(self.orientation);
        session.set_view_only(self.view_only);
        session.set_shapes(self.shapes);
        if let Some(size) = self.size {
            session.set_width(size);
        }
        if self.initial_move > 0 {
            session.go_to(self.initial_move);
        }
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pgn::read_games;
    use crate::timer::ManualScheduler;
    use chessview_board::{Key, LastMove, MemoryBoard};
    use std::str::FromStr;
    use std::time::Duration;

    fn k(s: &str) -> Key {
        Key::from_str(s).unwrap()
    }

    #[test]
    fn test_from_options() {
        let options = BlockOptions::parse(
            "orientation: black\n\
             moves: 1. e4 e5 2. Nf3 Nc6\n\
             initialMove: 3\n\
             arrows: f3 e5",
        );
        let game = Game::from_options(&options);
        assert_eq!(game.moves.len(), 4);
        let s = game.into_session(
            MemoryBoard::new(),
            ManualScheduler::new(),
            &ViewerConfig::default(),
        );
        assert_eq!(s.current_move(), 3);
        assert_eq!(s.last_move(), Some(LastMove(k("g1"), k("f3"))));
        let board = s.board();
        assert_eq!(board.orientation(), Color::Black);
        assert_eq!(board.shapes().len(), 1);
        assert!(!board.is_view_only());
        assert_eq!(board.last_move(), Some(LastMove(k("g1"), k("f3"))));
    }

    #[test]
    fn test_initial_move_clamped() {
        let options = BlockOptions::parse("moves: e4 e5\ninitialMove: 10");
        let s = Game::from_options(&options).into_session(
            MemoryBoard::new(),
            ManualScheduler::new(),
            &ViewerConfig::default(),
        );
        assert_eq!(s.current_move(), 2);
    }

    #[test]
    fn test_from_pgn() {
        let games = read_games("[White \"A\"]\n[Black \"B\"]\n\n1. d4 Nf6 2. c4 e6 *");
        let pgn = games[0].as_ref().unwrap();
        let config = ViewerConfig {
            main_player_name: Some("B".to_string()),
            playback_speed: 1000,
            ..ViewerConfig::default()
        };
        let game = Game::from_pgn(pgn, &BlockOptions::default(), &config);
        assert_eq!(game.orientation, Color::Black);

        let mut s = game.into_session(MemoryBoard::new(), ManualScheduler::new(), &config);
        assert_eq!(s.current_move(), 0);
        s.toggle_autoplay();
        assert_eq!(s.scheduler_mut().advance(Duration::from_millis(1199)), vec![]);
        assert_eq!(s.scheduler_mut().advance(Duration::from_millis(1)).len(), 1);

        let options = BlockOptions::parse("orientation: white");
        assert_eq!(
            Game::from_pgn(pgn, &options, &config).orientation,
            Color::White
        );
    }

    #[test]
    fn test_pgn_mid_game() {
        let games = read_games(
            "[FEN \"r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3\"]\n\n3. Bb5 a6 *",
        );
        let pgn = games[0].as_ref().unwrap();
        assert_eq!(pgn.start().last_move(), None);

        let options = BlockOptions::parse("lastMove: b8 c6\nsize: 360px");
        let config = ViewerConfig::default();
        let game = Game::from_pgn(pgn, &options, &config);
        assert_eq!(game.size, Some(360));
        let mut s = game.into_session(MemoryBoard::new(), ManualScheduler::new(), &config);
        assert_eq!(s.board().last_move(), Some(LastMove(k("b8"), k("c6"))));
        assert_eq!(s.board().width(), Some(360));
        assert!(s.step_forward(None, true));
        assert!(s.step_backward());
        assert_eq!(s.board().last_move(), Some(LastMove(k("b8"), k("c6"))));

        let game = Game::from_pgn(pgn, &BlockOptions::default(), &config);
        assert_eq!(game.start.last_move(), None);
        assert_eq!(game.size, None);
    }
}

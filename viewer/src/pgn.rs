//! PGN loading
//!
//! Only the mainline of each game is kept. A game which cannot be shown yields an error of its
//! own and doesn't affect the other games of the same file.

use crate::config::ViewerConfig;
use crate::setup::{FenError, Rules, StartPosition, VariantError};

use chessview_board::Color;
use pgn_reader::{BufferedReader, RawHeader, SanPlus, Skip, Visitor};
use std::io;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum PgnError {
    #[error("cannot read PGN: {0}")]
    Io(#[from] io::Error),
    #[error("bad FEN header: {0}")]
    Fen(#[from] FenError),
    #[error("bad Variant header: {0}")]
    Variant(#[from] VariantError),
    #[error("empty game")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct PgnGame {
    headers: Vec<(String, String)>,
    start: StartPosition,
    moves: Vec<String>,
}

impl PgnGame {
    /// Headers, in the order they appear in the game
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn start(&self) -> &StartPosition {
        &self.start
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    fn header_or_unknown(&self, key: &str) -> &str {
        self.header(key).unwrap_or("?")
    }

    /// Renders the players as `White - Black`
    pub fn title(&self) -> String {
        format!(
            "{} - {}",
            self.header_or_unknown("White"),
            self.header_or_unknown("Black")
        )
    }

    pub fn summary(&self) -> String {
        ["Event", "Date", "Round", "Result"]
            .iter()
            .map(|key| format!("{}: {}", key, self.header_or_unknown(key)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn orientation(&self, config: &ViewerConfig) -> Color {
        config.orientation_for(self.header("Black"))
    }
}

#[derive(Default)]
struct GameCollector {
    headers: Vec<(String, String)>,
    moves: Vec<String>,
}

impl GameCollector {
    fn finish(&mut self) -> Result<PgnGame, PgnError> {
        let headers = std::mem::take(&mut self.headers);
        let moves = std::mem::take(&mut self.moves);
        if headers.is_empty() && moves.is_empty() {
            return Err(PgnError::Empty);
        }
        let find = |key: &str| {
            headers
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        let rules = match find("Variant") {
            Some(name) => Rules::from_name(name)?,
            None => Rules::STANDARD,
        };
        let position = match find("FEN") {
            Some(fen) => rules.position_from_fen(fen)?,
            None => rules.default_position(),
        };
        // PGN has no highlight of its own, the block options may add one
        Ok(PgnGame {
            start: StartPosition::new(position, None),
            headers,
            moves,
        })
    }
}

impl Visitor for GameCollector {
    type Result = Result<PgnGame, PgnError>;

    fn begin_game(&mut self) {
        self.headers.clear();
        self.moves.clear();
    }

    fn header(&mut self, key: &[u8], value: RawHeader<'_>) {
        self.headers.push((
            String::from_utf8_lossy(key).into_owned(),
            value.decode_utf8_lossy().into_owned(),
        ));
    }

    fn san(&mut self, san_plus: SanPlus) {
        self.moves.push(san_plus.to_string());
    }

    fn begin_variation(&mut self) -> Skip {
        Skip(true)
    }

    fn end_game(&mut self) -> Self::Result {
        self.finish()
    }
}

/// Reads all games from `text`
pub fn read_games(text: &str) -> Vec<Result<PgnGame, PgnError>> {
    let mut reader = BufferedReader::new_cursor(text.as_bytes());
    let mut collector = GameCollector::default();
    let mut res = Vec::new();
    loop {
        match reader.read_game(&mut collector) {
            Ok(Some(game)) => {
                if let Err(e) = &game {
                    warn!(error = %e, idx = res.len(), "cannot load game");
                }
                res.push(game);
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "cannot read PGN");
                res.push(Err(e.into()));
                break;
            }
        }
    }
    res
}

//! Starting positions
//!
//! A game starts either from the default position of its variant or from a FEN. Block options
//! are forgiving: a bad FEN or an unknown variant falls back to a default and only logs a
//! warning. PGN headers use the strict constructors and report errors instead.

use crate::adapt;

use chessview_board::{Key, LastMove};
use shakmaty::fen::{Fen, ParseFenError};
use shakmaty::variant::{Variant, VariantPosition};
use shakmaty::CastlingMode;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum FenError {
    #[error("cannot parse FEN: {0}")]
    Parse(#[from] ParseFenError),
    #[error("illegal position: {0}")]
    Position(String),
}

#[derive(Debug, Clone, Error, Eq, PartialEq)]
#[error("unknown variant {0:?}")]
pub struct VariantError(pub String);

/// Rules a game is played by
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rules {
    pub variant: Variant,
    pub castling: CastlingMode,
}

impl Rules {
    pub const STANDARD: Rules = Rules {
        variant: Variant::Chess,
        castling: CastlingMode::Standard,
    };

    /// Parses a variant name, as written in block options or in the PGN `Variant` header
    ///
    /// Names are case-insensitive, and spaces, dashes and underscores are ignored, so
    /// `King of the Hill` and `kingofthehill` mean the same.
    pub fn from_name(name: &str) -> Result<Rules, VariantError> {
        let norm: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let variant = match norm.as_str() {
            "" | "standard" | "chess" | "fromposition" => Variant::Chess,
            "chess960" | "fischerandom" | "fischerrandom" => {
                return Ok(Rules {
                    variant: Variant::Chess,
                    castling: CastlingMode::Chess960,
                })
            }
            "crazyhouse" | "zh" => Variant::Crazyhouse,
            "atomic" => Variant::Atomic,
            "antichess" | "giveaway" => Variant::Antichess,
            "kingofthehill" | "koth" => Variant::KingOfTheHill,
            "threecheck" | "3check" => Variant::ThreeCheck,
            "racingkings" => Variant::RacingKings,
            "horde" => Variant::Horde,
            _ => return Err(VariantError(name.to_string())),
        };
        Ok(Rules {
            variant,
            castling: CastlingMode::Standard,
        })
    }

    /// Same as [`Rules::from_name()`], but falls back to standard chess
    pub fn from_name_or_standard(name: Option<&str>) -> Rules {
        match name.map(Rules::from_name) {
            None => Rules::STANDARD,
            Some(Ok(rules)) => rules,
            Some(Err(e)) => {
                warn!(error = %e, "falling back to standard chess");
                Rules::STANDARD
            }
        }
    }

    pub fn default_position(&self) -> VariantPosition {
        VariantPosition::new(self.variant)
    }

    pub fn position_from_fen(&self, fen: &str) -> Result<VariantPosition, FenError> {
        let setup = Fen::from_ascii(fen.trim().as_bytes())?.into_setup();
        VariantPosition::from_setup(self.variant, setup, self.castling)
            .map_err(|e| FenError::Position(e.to_string()))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules::STANDARD
    }
}

/// Position the game starts from
#[derive(Debug, Clone)]
pub struct StartPosition {
    position: VariantPosition,
    last_move: Option<LastMove>,
}

impl StartPosition {
    pub fn new(position: VariantPosition, last_move: Option<LastMove>) -> Self {
        StartPosition {
            position,
            last_move,
        }
    }

    pub fn initial(rules: Rules) -> Self {
        Self::new(rules.default_position(), None)
    }

    /// Builds the start position from block options
    ///
    /// A FEN which cannot be used is replaced with the default position of the variant.
    /// `last_move` may be any text, the first two squares found in it are highlighted.
    pub fn from_options(rules: Rules, fen: Option<&str>, last_move: Option<&str>) -> Self {
        let position = match fen {
            Some(fen) => rules.position_from_fen(fen).unwrap_or_else(|e| {
                warn!(error = %e, fen, "falling back to the default position");
                rules.default_position()
            }),
            None => rules.default_position(),
        };
        Self::new(position, last_move.and_then(parse_last_move))
    }

    /// Replaces the highlight shown before the first move
    pub fn with_last_move(self, last_move: Option<LastMove>) -> Self {
        StartPosition { last_move, ..self }
    }

    pub fn position(&self) -> &VariantPosition {
        &self.position
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn fen(&self) -> String {
        adapt::fen(&self.position)
    }
}

impl Default for StartPosition {
    fn default() -> Self {
        Self::initial(Rules::STANDARD)
    }
}

/// Collects squares from free text: every file letter followed later by a rank digit
///
/// Characters between them are skipped, so `e2-e4`, `e2 e4` and `E2E4` give the same squares.
pub fn parse_squares(line: &str) -> Vec<Key> {
    let mut res = Vec::new();
    let mut file = None;
    for c in line.chars() {
        match file {
            None => file = chessview_board::File::from_char(c.to_ascii_lowercase()),
            Some(f) => {
                if let Some(rank) = chessview_board::Rank::from_char(c) {
                    res.push(Key::from_parts(f, rank));
                    file = None;
                }
            }
        }
    }
    res
}

pub fn parse_last_move(line: &str) -> Option<LastMove> {
    match parse_squares(line)[..] {
        [from, to, ..] => Some(LastMove(from, to)),
        _ => None,
    }
}

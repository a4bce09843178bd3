//! Options of a chess block
//!
//! A block is a list of `key: value` lines. Keys are case-insensitive, lines without a colon are
//! ignored, and a line starting with `1.` or `[` ends the options, as PGN text follows.
//!
//! ```text
//! fen: r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3
//! orientation: black
//! arrows: f3-e5 c6-e5
//! moves: 3. Bb5 a6 4. Ba4
//! ```

use crate::adapt;
use crate::play;
use crate::setup::{parse_squares, Rules, StartPosition};

use chessview_board::{BoardState, Color, Shape};
use shakmaty::Position;
use std::str::FromStr;

/// Brush used for arrows and squares given in options
pub const OPTIONS_BRUSH: &str = "green";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockOptions {
    /// Board width in pixels
    pub size: Option<u32>,
    pub orientation: Option<Color>,
    pub fen: Option<String>,
    pub last_move: Option<String>,
    pub arrows: Option<String>,
    pub squares: Option<String>,
    pub movable: Option<bool>,
    pub drawable: Option<bool>,
    pub moves: Option<Vec<String>>,
    pub initial_move: Option<usize>,
    pub variant: Option<String>,
}

pub fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_size(value: &str) -> Option<u32> {
    let digits: &str = match value.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &value[..end],
        None => value,
    };
    digits.parse().ok()
}

fn is_result(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "½-½" | "*")
}

fn strip_move_number(token: &str) -> &str {
    let rest = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < token.len() && rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}

/// Splits move text into SAN tokens, dropping move numbers and game results
pub fn parse_moves(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|token| !is_result(token))
        .map(strip_move_number)
        .filter(|san| !san.is_empty())
        .map(String::from)
        .collect()
}

impl BlockOptions {
    pub fn parse(text: &str) -> BlockOptions {
        let mut res = BlockOptions::default();
        for line in text.lines() {
            if line.starts_with("1.") || line.starts_with('[') {
                break;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim().to_ascii_lowercase().as_str() {
                "size" => res.size = parse_size(value).or(res.size),
                "orientation" => {
                    if let Ok(color) = Color::from_str(value) {
                        res.orientation = Some(color);
                    }
                }
                "fen" => res.fen = Some(value.to_string()),
                "lastmove" => res.last_move = Some(value.to_string()),
                "arrows" => res.arrows = Some(value.to_string()),
                "squares" => res.squares = Some(value.to_string()),
                "movable" => res.movable = parse_bool(value),
                "drawable" => res.drawable = parse_bool(value),
                "moves" => res.moves = Some(parse_moves(value)),
                "initialmove" => {
                    if let Ok(idx) = value.parse() {
                        res.initial_move = Some(idx);
                    }
                }
                "variant" => res.variant = Some(value.to_string()),
                _ => {}
            }
        }
        res
    }

    pub fn has_moves(&self) -> bool {
        self.moves.as_ref().is_some_and(|m| !m.is_empty())
    }

    /// Arrows from consecutive square pairs, then highlighted squares
    pub fn shapes(&self) -> Vec<Shape> {
        let mut res = Vec::new();
        if let Some(arrows) = &self.arrows {
            for pair in parse_squares(arrows).chunks_exact(2) {
                res.push(Shape {
                    orig: pair[0],
                    dest: Some(pair[1]),
                    brush: OPTIONS_BRUSH,
                });
            }
        }
        if let Some(squares) = &self.squares {
            res.extend(parse_squares(squares).into_iter().map(|orig| Shape {
                orig,
                dest: None,
                brush: OPTIONS_BRUSH,
            }));
        }
        res
    }

    /// Movable if requested, otherwise only when no position is given
    pub fn is_movable(&self) -> bool {
        self.movable == Some(true) || (self.fen.is_none() && self.movable != Some(false))
    }

    /// Drawable if requested, otherwise only when nothing is drawn already
    pub fn is_drawable(&self) -> bool {
        self.drawable == Some(true) || (self.shapes().is_empty() && self.drawable != Some(false))
    }

    pub fn is_view_only(&self) -> bool {
        !self.is_movable() && !self.is_drawable()
    }

    pub fn rules(&self) -> Rules {
        Rules::from_name_or_standard(self.variant.as_deref())
    }

    pub fn start_position(&self) -> StartPosition {
        StartPosition::from_options(self.rules(), self.fen.as_deref(), self.last_move.as_deref())
    }

    /// Initial widget state for a static position
    ///
    /// A movable position gets the legal destinations of the side to move, any other gets none.
    pub fn initial_state(&self) -> BoardState {
        let start = self.start_position();
        let pos = start.position();
        let movable_dests = if self.is_movable() {
            play::dests(pos)
        } else {
            Vec::new()
        };
        BoardState {
            fen: Some(start.fen()),
            orientation: Some(self.orientation.unwrap_or(Color::White)),
            turn: Some(adapt::turn(pos)),
            check: Some(pos.is_check()),
            last_move: Some(start.last_move()),
            shapes: Some(self.shapes()),
            view_only: Some(self.is_view_only()),
            movable_dests: Some(movable_dests),
            width: self.size,
        }
    }
}

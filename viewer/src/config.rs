use chessview_board::Color;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default delay between auto-play moves, in milliseconds
pub const DEFAULT_PLAYBACK_SPEED: u64 = 450;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown board theme {0:?}")]
    UnknownBoardTheme(String),
    #[error("unknown piece set {0:?}")]
    UnknownPieceSet(String),
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum BoardTheme {
    #[default]
    Brown,
    Blue,
    Green,
    Ic,
    Purple,
}

impl BoardTheme {
    pub const ALL: [BoardTheme; 5] = [
        BoardTheme::Brown,
        BoardTheme::Blue,
        BoardTheme::Green,
        BoardTheme::Ic,
        BoardTheme::Purple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardTheme::Brown => "brown",
            BoardTheme::Blue => "blue",
            BoardTheme::Green => "green",
            BoardTheme::Ic => "ic",
            BoardTheme::Purple => "purple",
        }
    }
}

impl fmt::Display for BoardTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BoardTheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardTheme::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownBoardTheme(s.to_string()))
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum PieceSet {
    #[default]
    Cburnett,
    Alpha,
    Merida,
}

impl PieceSet {
    pub const ALL: [PieceSet; 3] = [PieceSet::Cburnett, PieceSet::Alpha, PieceSet::Merida];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceSet::Cburnett => "cburnett",
            PieceSet::Alpha => "alpha",
            PieceSet::Merida => "merida",
        }
    }
}

impl fmt::Display for PieceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PieceSet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceSet::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownPieceSet(s.to_string()))
    }
}

/// Settings of the viewer, as read from the host
///
/// Values are kept as the host provided them. Use [`ViewerConfig::sanitized()`] to replace the
/// invalid ones with defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub board_theme: String,
    pub piece_set: String,
    /// Delay between auto-play moves, in milliseconds
    pub playback_speed: u64,
    /// Games where this player has Black are shown from Black's side
    pub main_player_name: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            board_theme: BoardTheme::default().to_string(),
            piece_set: PieceSet::default().to_string(),
            playback_speed: DEFAULT_PLAYBACK_SPEED,
            main_player_name: None,
        }
    }
}

impl ViewerConfig {
    pub fn board_theme(&self) -> BoardTheme {
        self.board_theme.parse().unwrap_or_default()
    }

    pub fn piece_set(&self) -> PieceSet {
        self.piece_set.parse().unwrap_or_default()
    }

    pub fn playback(&self) -> Duration {
        match self.playback_speed {
            0 => Duration::from_millis(DEFAULT_PLAYBACK_SPEED),
            ms => Duration::from_millis(ms),
        }
    }

    pub fn sanitized(&self) -> ViewerConfig {
        let main_player_name = self
            .main_player_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from);
        ViewerConfig {
            board_theme: self.board_theme().to_string(),
            piece_set: self.piece_set().to_string(),
            playback_speed: self.playback().as_millis() as u64,
            main_player_name,
        }
    }

    /// Board orientation for a game where `black` has the black pieces
    pub fn orientation_for(&self, black: Option<&str>) -> Color {
        match (self.main_player_name.as_deref(), black) {
            (Some(main), Some(black)) if !main.trim().is_empty() && main.trim() == black.trim() => {
                Color::Black
            }
            _ => Color::White,
        }
    }
}

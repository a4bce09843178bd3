//! Board widget contract
//!
//! The viewer never renders anything itself. It drives a widget through the imperative calls of
//! [`BoardWidget`], the same small surface a web board exposes: a partial state update, an
//! animated move, a new piece, and a batch of square assignments.
//!
//! [`MemoryBoard`] implements the contract headlessly. It keeps the resulting placement and a
//! log of the calls it received.

use crate::pieces::{Changes, Pieces};
use crate::types::{Color, Key, LastMove, Piece};

use std::time::Duration;

/// Default duration of a piece animation
pub const DEFAULT_ANIMATION: Duration = Duration::from_millis(200);

/// Drawing on top of the board: an arrow if `dest` is set, a highlighted square otherwise
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    pub orig: Key,
    pub dest: Option<Key>,
    pub brush: &'static str,
}

/// Legal destinations of the pieces the user may move, grouped by origin square
pub type Dests = Vec<(Key, Vec<Key>)>;

/// Partial widget state
///
/// Fields set to `None` are left untouched by [`BoardWidget::set()`]. `last_move` is doubly
/// optional, as `Some(None)` clears the highlight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    pub fen: Option<String>,
    pub orientation: Option<Color>,
    pub turn: Option<Color>,
    pub check: Option<bool>,
    pub last_move: Option<Option<LastMove>>,
    pub shapes: Option<Vec<Shape>>,
    pub view_only: Option<bool>,
    /// Squares the user may drag pieces to; an empty list makes the board unmovable
    pub movable_dests: Option<Dests>,
    /// Board width in pixels
    pub width: Option<u32>,
}

pub trait BoardWidget {
    /// Applies the fields present in `state`; a FEN replaces the whole placement
    fn set(&mut self, state: BoardState);

    /// Moves a piece with animation, capturing whatever stands on `to`
    fn move_piece(&mut self, from: Key, to: Key);

    /// Puts a new piece on `key`
    fn new_piece(&mut self, piece: Piece, key: Key);

    /// Applies independent square assignments
    fn set_pieces(&mut self, changes: &Changes);

    /// Duration of the animations the widget plays
    fn animation_duration(&self) -> Duration;

    /// Stops any animation in flight, leaving pieces at their final squares
    fn cancel_active_animation(&mut self);
}

/// Call received by a [`MemoryBoard`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetCall {
    Set(BoardState),
    Move(Key, Key),
    NewPiece(Piece, Key),
    SetPieces(Changes),
    CancelAnimation,
}

/// Headless widget keeping the board state in memory
#[derive(Debug, Clone)]
pub struct MemoryBoard {
    pieces: Pieces,
    orientation: Color,
    turn: Color,
    check: bool,
    last_move: Option<LastMove>,
    shapes: Vec<Shape>,
    view_only: bool,
    dests: Dests,
    width: Option<u32>,
    animation: Duration,
    animating: bool,
    log: Vec<WidgetCall>,
}

impl MemoryBoard {
    pub fn new() -> Self {
        Self::with_animation(DEFAULT_ANIMATION)
    }

    pub fn with_animation(animation: Duration) -> Self {
        MemoryBoard {
            pieces: Pieces::EMPTY,
            orientation: Color::White,
            turn: Color::White,
            check: false,
            last_move: None,
            shapes: Vec::new(),
            view_only: false,
            dests: Dests::new(),
            width: None,
            animation,
            animating: false,
            log: Vec::new(),
        }
    }

    pub fn pieces(&self) -> &Pieces {
        &self.pieces
    }

    pub fn orientation(&self) -> Color {
        self.orientation
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn check(&self) -> bool {
        self.check
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_view_only(&self) -> bool {
        self.view_only
    }

    pub fn dests(&self) -> &[(Key, Vec<Key>)] {
        &self.dests
    }

    /// Squares the piece on `orig` may be dragged to
    pub fn dests_from(&self, orig: Key) -> &[Key] {
        self.dests
            .iter()
            .find(|(k, _)| *k == orig)
            .map(|(_, dests)| dests.as_slice())
            .unwrap_or(&[])
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn log(&self) -> &[WidgetCall] {
        &self.log
    }

    pub fn take_log(&mut self) -> Vec<WidgetCall> {
        std::mem::take(&mut self.log)
    }

    pub fn pretty(&self) -> String {
        self.pieces.pretty(self.orientation)
    }

    fn start_animation(&mut self) {
        self.animating = !self.animation.is_zero();
    }
}

impl Default for MemoryBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardWidget for MemoryBoard {
    fn set(&mut self, state: BoardState) {
        if let Some(fen) = &state.fen {
            // Bad placements are ignored
            if let Ok(pieces) = Pieces::from_fen(fen) {
                self.pieces = pieces;
            }
        }
        if let Some(orientation) = state.orientation {
            self.orientation = orientation;
        }
        if let Some(turn) = state.turn {
            self.turn = turn;
        }
        if let Some(check) = state.check {
            self.check = check;
        }
        if let Some(last_move) = state.last_move {
            self.last_move = last_move;
        }
        if let Some(shapes) = &state.shapes {
            self.shapes = shapes.clone();
        }
        if let Some(view_only) = state.view_only {
            self.view_only = view_only;
        }
        if let Some(dests) = &state.movable_dests {
            self.dests = dests.clone();
        }
        if state.width.is_some() {
            self.width = state.width;
        }
        self.log.push(WidgetCall::Set(state));
    }

    fn move_piece(&mut self, from: Key, to: Key) {
        self.pieces.relocate(from, to);
        self.start_animation();
        self.log.push(WidgetCall::Move(from, to));
    }

    fn new_piece(&mut self, piece: Piece, key: Key) {
        self.pieces.put(key, Some(piece));
        self.log.push(WidgetCall::NewPiece(piece, key));
    }

    fn set_pieces(&mut self, changes: &Changes) {
        self.pieces.apply(changes);
        self.start_animation();
        self.log.push(WidgetCall::SetPieces(changes.clone()));
    }

    fn animation_duration(&self) -> Duration {
        self.animation
    }

    fn cancel_active_animation(&mut self) {
        self.animating = false;
        self.log.push(WidgetCall::CancelAnimation);
    }
}

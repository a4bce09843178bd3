//! Game session driving a board widget
//!
//! A [`GameSession`] ties a [`Navigator`] to a widget and to a [`Scheduler`] for auto-play.
//! Every navigation entry point cancels a pending auto-play timer before moving the cursor,
//! and timer ids other than the pending one are ignored, so a timer never steps from a
//! position it was not scheduled for.

use crate::delta::BoardDelta;
use crate::navigate::Navigator;
use crate::timer::{Scheduler, TimerId};

use chessview_board::{BoardState, BoardWidget, Color, LastMove, Shape};
use std::fmt::Write as _;
use std::time::Duration;
use tracing::{debug, trace};

/// Default delay between two auto-play steps, on top of the animation
pub const DEFAULT_PLAYBACK: Duration = Duration::from_millis(450);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Autoplay {
    id: TimerId,
    delay: Duration,
}

/// Enabled state of the navigation buttons
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    pub first: bool,
    pub prev: bool,
    pub play: bool,
    pub next: bool,
    pub last: bool,
    pub playing: bool,
}

pub struct GameSession<W: BoardWidget, S: Scheduler> {
    nav: Navigator,
    board: W,
    scheduler: S,
    autoplay: Option<Autoplay>,
    playback: Duration,
    shapes: Vec<Shape>,
}

/// Appends the `arrows:` and `squares:` lines of the info text
pub(crate) fn write_shapes(res: &mut String, shapes: &[Shape]) {
    let arrows: Vec<String> = shapes
        .iter()
        .filter_map(|s| s.dest.map(|dest| format!("{}->{}", s.orig, dest)))
        .collect();
    let squares: Vec<String> = shapes
        .iter()
        .filter(|s| s.dest.is_none())
        .map(|s| s.orig.to_string())
        .collect();
    if !arrows.is_empty() {
        let _ = writeln!(res, "arrows: {}", arrows.join(" "));
    }
    if !squares.is_empty() {
        let _ = writeln!(res, "squares: {}", squares.join(" "));
    }
}

impl<W: BoardWidget, S: Scheduler> GameSession<W, S> {
    /// Creates a session and shows the position of `nav` on the board
    pub fn new(nav: Navigator, board: W, scheduler: S) -> Self {
        let mut session = GameSession {
            nav,
            board,
            scheduler,
            autoplay: None,
            playback: DEFAULT_PLAYBACK,
            shapes: Vec::new(),
        };
        let delta = session.nav.snapshot();
        session.emit(delta);
        session
    }

    pub fn set_playback(&mut self, playback: Duration) {
        self.playback = playback;
    }

    pub fn set_orientation(&mut self, orientation: Color) {
        self.board.set(BoardState {
            orientation: Some(orientation),
            ..BoardState::default()
        });
    }

    pub fn set_view_only(&mut self, view_only: bool) {
        self.board.set(BoardState {
            view_only: Some(view_only),
            ..BoardState::default()
        });
    }

    pub fn set_width(&mut self, width: u32) {
        self.board.set(BoardState {
            width: Some(width),
            ..BoardState::default()
        });
    }

    pub fn set_shapes(&mut self, shapes: Vec<Shape>) {
        self.board.set(BoardState {
            shapes: Some(shapes.clone()),
            ..BoardState::default()
        });
        self.shapes = shapes;
    }

    fn emit(&mut self, delta: BoardDelta) {
        trace!(%delta, pos = self.nav.pos(), "emitting delta");
        delta.apply(&mut self.board);
    }

    pub fn go_to_first(&mut self) {
        self.cancel_autoplay();
        let delta = self.nav.first();
        self.emit(delta);
    }

    pub fn go_to_last(&mut self) {
        self.cancel_autoplay();
        let delta = self.nav.last();
        self.emit(delta);
    }

    /// Jumps to move `idx`, clamped to the moves which can be played
    pub fn go_to(&mut self, idx: usize) {
        self.cancel_autoplay();
        let delta = self.nav.jump(idx);
        self.emit(delta);
    }

    /// Plays the next move
    ///
    /// With `autoplay_delay` set, another step is scheduled after the animation and the delay,
    /// as long as there are moves left. A user-initiated step while auto-play is running only
    /// pauses it. Returns `true` if a move was played.
    pub fn step_forward(&mut self, autoplay_delay: Option<Duration>, user_initiated: bool) -> bool {
        if user_initiated && self.autoplay.is_some() {
            debug!("pausing auto-play");
            self.cancel_autoplay();
            return false;
        }
        if let Some(stale) = self.autoplay.take() {
            self.scheduler.cancel(stale.id);
        }
        let Some(delta) = self.nav.next() else {
            return false;
        };
        self.emit(delta);
        if let Some(delay) = autoplay_delay {
            if self.nav.can_step_forward() {
                let id = self
                    .scheduler
                    .schedule(self.board.animation_duration() + delay);
                debug!(%id, "scheduled auto-play step");
                self.autoplay = Some(Autoplay { id, delay });
            }
        }
        true
    }

    /// Takes back the last played move; returns `true` if a move was taken back
    pub fn step_backward(&mut self) -> bool {
        self.cancel_autoplay();
        let Some(delta) = self.nav.prev() else {
            return false;
        };
        self.emit(delta);
        true
    }

    /// Stops auto-play and any animation in flight
    pub fn cancel_autoplay(&mut self) {
        if let Some(autoplay) = self.autoplay.take() {
            debug!(id = %autoplay.id, "cancelling auto-play");
            self.scheduler.cancel(autoplay.id);
        }
        self.board.cancel_active_animation();
    }

    /// Steps forward once, stopping auto-play first
    pub fn next(&mut self) -> bool {
        self.cancel_autoplay();
        self.step_forward(None, true)
    }

    /// Starts auto-play, or pauses it if it is running
    pub fn toggle_autoplay(&mut self) -> bool {
        self.step_forward(Some(self.playback), true)
    }

    /// Handles a fired timer; returns `true` if it advanced the game
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        match self.autoplay {
            Some(autoplay) if autoplay.id == id => {
                self.autoplay = None;
                self.step_forward(Some(autoplay.delay), false)
            }
            _ => {
                debug!(%id, "ignoring stale timer");
                false
            }
        }
    }

    pub fn controls(&self) -> Controls {
        let back = self.nav.can_step_backward();
        let forward = self.nav.can_step_forward();
        Controls {
            first: back,
            prev: back,
            play: forward || self.autoplay.is_some(),
            next: forward,
            last: forward,
            playing: self.autoplay.is_some(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.autoplay.map(|a| a.id)
    }

    pub fn current_move(&self) -> usize {
        self.nav.pos()
    }

    pub fn len(&self) -> usize {
        self.nav.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nav.is_empty()
    }

    pub fn reachable_len(&self) -> usize {
        self.nav.reachable_len()
    }

    pub fn current_fen(&self) -> String {
        self.nav.fen()
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.nav.last_move()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn board(&self) -> &W {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut W {
        &mut self.board
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Text for the position info panel
    pub fn info_text(&self) -> String {
        let mut res = String::new();
        let _ = writeln!(res, "fen: {}", self.nav.fen());
        if let Some(LastMove(from, to)) = self.nav.last_move() {
            let _ = writeln!(res, "lastMove: {} {}", from, to);
        }
        write_shapes(&mut res, &self.shapes);
        res.trim_end().to_string()
    }
}

impl<W: BoardWidget, S: Scheduler> Drop for GameSession<W, S> {
    fn drop(&mut self) {
        if let Some(autoplay) = self.autoplay.take() {
            self.scheduler.cancel(autoplay.id);
        }
    }
}

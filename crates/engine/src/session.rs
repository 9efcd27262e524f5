//! Session module - the time-bounded distractor loop
//!
//! [`Session`] is the state machine: given a timestamp and the input events of one
//! iteration it spawns, moves, applies gravity, lands pieces, clears lines and
//! handles blocked spawns. [`run_session`] is the driver that owns the clock,
//! backends and frame pacing, and stops the moment the deadline passes.
//!
//! A blocked spawn is a *loss*, not a game over: the board is blanked, a fresh pair
//! of pieces is dealt, and play continues. Lines and losses accumulate across
//! resets for the whole session.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::backend::{BackgroundAudio, Frame, InputBatch, InputEvent, InputSource, RenderTarget};
use crate::clock::{Clock, FrameLimiter};
use crate::config::SessionConfig;
use crate::core::{level_for_lines, Board, Piece, RandomSource};
use crate::error::{ConfigError, SessionError, SessionResult};
use crate::types::DistractorAction;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Playing,
    /// Deadline reached
    Finished,
    /// Quit requested
    Aborted,
}

/// What the host gets back from a completed session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionOutcome {
    pub lines_cleared: u32,
    /// Number of board resets caused by a blocked spawn
    pub losses: u32,
}

/// Held-direction flags and their repeat timers
#[derive(Debug, Clone, Copy)]
struct HeldInput {
    left: bool,
    right: bool,
    down: bool,
    last_sideways: Duration,
    last_down: Duration,
}

impl HeldInput {
    fn released(now: Duration) -> Self {
        Self {
            left: false,
            right: false,
            down: false,
            last_sideways: now,
            last_down: now,
        }
    }
}

/// State of one distractor session
#[derive(Debug, Clone)]
pub struct Session<R> {
    config: SessionConfig,
    rng: R,
    board: Board,
    falling: Option<Piece>,
    next: Piece,
    held: HeldInput,
    last_fall: Duration,
    deadline: Duration,
    lines_cleared: u32,
    losses: u32,
    phase: SessionPhase,
}

impl<R: RandomSource> Session<R> {
    /// Validate `config` and deal the first falling and next pieces.
    ///
    /// `now` is the clock reading at which the session starts; the deadline is
    /// `now + config.duration`.
    pub fn new(config: &SessionConfig, mut rng: R, now: Duration) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.columns, config.rows)?;
        let falling = Piece::random(&mut rng, config.columns);
        let next = Piece::random(&mut rng, config.columns);

        Ok(Self {
            config: *config,
            rng,
            board,
            falling: Some(falling),
            next,
            held: HeldInput::released(now),
            last_fall: now,
            deadline: now.saturating_add(config.duration),
            lines_cleared: 0,
            losses: 0,
            phase: SessionPhase::Playing,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn falling(&self) -> Option<&Piece> {
        self.falling.as_ref()
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn level(&self) -> u32 {
        level_for_lines(self.lines_cleared)
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Current gravity interval, derived from the level
    pub fn gravity_interval(&self) -> Duration {
        self.config.timing.gravity_interval(self.level())
    }

    pub fn outcome(&self) -> SessionOutcome {
        SessionOutcome {
            lines_cleared: self.lines_cleared,
            losses: self.losses,
        }
    }

    /// Borrowed view for rendering
    pub fn frame(&self, now: Duration) -> Frame<'_> {
        Frame {
            board: &self.board,
            falling: self.falling.as_ref(),
            next: &self.next,
            level: self.level(),
            lines_cleared: self.lines_cleared,
            losses: self.losses,
            remaining: self.deadline.saturating_sub(now),
        }
    }

    /// Run one iteration of the loop at time `now`.
    ///
    /// Once the phase leaves `Playing` further calls do nothing.
    pub fn step(&mut self, now: Duration, events: &[InputEvent]) -> SessionPhase {
        if self.phase != SessionPhase::Playing {
            return self.phase;
        }
        if now >= self.deadline {
            self.phase = SessionPhase::Finished;
            return self.phase;
        }

        self.spawn_if_needed(now);

        for &event in events {
            if event == InputEvent::Quit {
                self.phase = SessionPhase::Aborted;
                return self.phase;
            }
            self.apply_event(event, now);
        }

        self.apply_held_repeats(now);
        self.apply_gravity(now);
        self.phase
    }

    /// Promote `next` to falling. A promoted piece that does not fit is a loss.
    fn spawn_if_needed(&mut self, now: Duration) {
        if self.falling.is_some() {
            return;
        }

        let columns = self.board.columns();
        let fresh = Piece::random(&mut self.rng, columns);
        let promoted = std::mem::replace(&mut self.next, fresh);
        self.last_fall = now;

        if promoted.is_valid_position(&self.board, 0, 0) {
            self.falling = Some(promoted);
            return;
        }

        self.losses += 1;
        self.board.reset();
        self.held = HeldInput::released(now);
        self.last_fall = now;
        self.falling = Some(Piece::random(&mut self.rng, columns));
        self.next = Piece::random(&mut self.rng, columns);
        info!(
            losses = self.losses,
            lines_cleared = self.lines_cleared,
            "spawn blocked, board reset"
        );
    }

    fn apply_event(&mut self, event: InputEvent, now: Duration) {
        let board = &self.board;
        let held = &mut self.held;
        let Some(piece) = self.falling.as_mut() else {
            return;
        };

        match event {
            InputEvent::Quit => {}
            InputEvent::Released(action) => match action {
                DistractorAction::MoveLeft => held.left = false,
                DistractorAction::MoveRight => held.right = false,
                DistractorAction::SoftDrop => held.down = false,
                _ => {}
            },
            InputEvent::Pressed(action) => match action {
                DistractorAction::MoveLeft => {
                    if piece.legal_left(board) {
                        piece.move_left();
                        held.left = true;
                        held.right = false;
                        held.last_sideways = now;
                    }
                }
                DistractorAction::MoveRight => {
                    if piece.legal_right(board) {
                        piece.move_right();
                        held.right = true;
                        held.left = false;
                        held.last_sideways = now;
                    }
                }
                DistractorAction::RotateCw => {
                    piece.rotate_clockwise(board);
                }
                DistractorAction::RotateCcw => {
                    piece.rotate_counterclockwise(board);
                }
                DistractorAction::SoftDrop => {
                    if piece.legal_down(board) {
                        piece.move_down();
                        held.down = true;
                        held.last_down = now;
                    }
                }
                DistractorAction::HardDrop => {
                    // Landing is left to the next gravity tick.
                    held.left = false;
                    held.right = false;
                    held.down = false;
                    piece.move_to_bottom(board);
                }
            },
        }
    }

    fn apply_held_repeats(&mut self, now: Duration) {
        let board = &self.board;
        let held = &mut self.held;
        let timing = &self.config.timing;
        let Some(piece) = self.falling.as_mut() else {
            return;
        };

        if (held.left || held.right)
            && now.saturating_sub(held.last_sideways) > timing.sideways_repeat
        {
            if held.left && piece.legal_left(board) {
                piece.move_left();
            }
            if held.right && piece.legal_right(board) {
                piece.move_right();
            }
            held.last_sideways = now;
        }

        if held.down
            && now.saturating_sub(held.last_down) > timing.soft_drop_repeat
            && piece.legal_down(board)
        {
            piece.move_down();
            held.last_down = now;
        }
    }

    fn apply_gravity(&mut self, now: Duration) {
        if now.saturating_sub(self.last_fall) <= self.gravity_interval() {
            return;
        }
        let Some(mut piece) = self.falling else {
            return;
        };

        if piece.legal_down(&self.board) {
            piece.move_down();
            self.falling = Some(piece);
            self.last_fall = now;
            return;
        }

        piece.add_to_board(&mut self.board);
        let removed = self.board.remove_complete_lines() as u32;
        self.falling = None;
        if removed > 0 {
            self.lines_cleared += removed;
            debug!(
                removed,
                lines_cleared = self.lines_cleared,
                level = self.level(),
                "lines cleared"
            );
        }
    }
}

/// Everything a host lends to [`run_session`]
pub struct SessionHost<'a, C, I, T> {
    pub clock: &'a mut C,
    pub input: &'a mut I,
    pub render: &'a mut T,
    pub audio: Option<&'a mut dyn BackgroundAudio>,
}

/// Play one distractor session until its deadline.
///
/// Configuration errors are reported before anything starts. A zero duration
/// returns an empty outcome without entering the loop. A quit request returns
/// [`SessionError::Aborted`], after which the host is expected to release its
/// resources and terminate. Audio is stopped on every exit path.
pub fn run_session<G, C, I, T>(
    config: &SessionConfig,
    rng: G,
    host: SessionHost<'_, C, I, T>,
) -> SessionResult<SessionOutcome>
where
    G: RandomSource,
    C: Clock,
    I: InputSource,
    T: RenderTarget,
{
    config.validate()?;
    if config.duration.is_zero() {
        return Ok(SessionOutcome::default());
    }

    let SessionHost {
        clock,
        input,
        render,
        mut audio,
    } = host;

    let mut session = Session::new(config, rng, clock.now())?;
    info!(
        duration_ms = config.duration.as_millis() as u64,
        columns = config.columns,
        rows = config.rows,
        frame_rate = config.frame_rate,
        "distractor session started"
    );

    if let Some(audio) = audio.as_deref_mut() {
        audio.play_looped().map_err(SessionError::Backend)?;
    }

    let result = drive(&mut session, config, clock, input, render);

    if let Some(audio) = audio.as_deref_mut() {
        audio.stop();
    }

    match &result {
        Ok(outcome) => info!(
            lines_cleared = outcome.lines_cleared,
            losses = outcome.losses,
            "distractor session finished"
        ),
        Err(SessionError::Aborted) => warn!("distractor session aborted by quit request"),
        Err(err) => warn!(error = %err, "distractor session failed"),
    }
    result
}

fn drive<G, C, I, T>(
    session: &mut Session<G>,
    config: &SessionConfig,
    clock: &mut C,
    input: &mut I,
    render: &mut T,
) -> SessionResult<SessionOutcome>
where
    G: RandomSource,
    C: Clock,
    I: InputSource,
    T: RenderTarget,
{
    let mut limiter = FrameLimiter::new(config.frame_rate);
    let mut events = InputBatch::new();

    loop {
        let now = clock.now();
        if now >= session.deadline() {
            session.step(now, &[]);
            return Ok(session.outcome());
        }

        events.clear();
        input.poll(now, &mut events).map_err(SessionError::Backend)?;

        match session.step(now, &events) {
            SessionPhase::Playing => {}
            SessionPhase::Finished => return Ok(session.outcome()),
            SessionPhase::Aborted => return Err(SessionError::Aborted),
        }

        render
            .present(&session.frame(now))
            .map_err(SessionError::Backend)?;
        limiter.wait(clock, session.deadline());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SimpleRng;
    use crate::types::{ColorIndex, ShapeKind};

    const MS: Duration = Duration::from_millis(1);

    fn session() -> Session<SimpleRng> {
        let config = SessionConfig::new(Duration::from_secs(60));
        Session::new(&config, SimpleRng::new(7), Duration::ZERO).unwrap()
    }

    fn with_falling(mut s: Session<SimpleRng>, piece: Piece) -> Session<SimpleRng> {
        s.falling = Some(piece);
        s
    }

    fn o_piece() -> Piece {
        Piece::new(ShapeKind::O, 0, ColorIndex::Blue, 10)
    }

    #[test]
    fn blocked_spawn_counts_one_loss_and_blanks_board() {
        let mut s = session();
        for row in 0..20 {
            for col in 0..9 {
                s.board.set(col, row, Some(ColorIndex::Red));
            }
        }
        s.falling = None;

        s.step(MS, &[]);

        assert_eq!(s.losses(), 1);
        assert_eq!(s.board().filled_count(), 0);
        assert!(s.falling().is_some());
        assert_eq!(s.lines_cleared(), 0);
    }

    #[test]
    fn each_blocked_spawn_is_one_more_loss() {
        let mut s = session();
        for attempt in 1..=3 {
            for row in 0..20 {
                for col in 0..9 {
                    s.board.set(col, row, Some(ColorIndex::Green));
                }
            }
            s.falling = None;
            s.step(MS * attempt, &[]);
            assert_eq!(s.losses(), attempt);
            assert_eq!(s.board().filled_count(), 0);
        }
    }

    #[test]
    fn loss_releases_held_directions() {
        let mut s = with_falling(session(), o_piece().at(3, 5));
        s.step(MS, &[InputEvent::Pressed(DistractorAction::MoveLeft)]);
        assert!(s.held.left);

        for row in 0..20 {
            for col in 0..9 {
                s.board.set(col, row, Some(ColorIndex::Blue));
            }
        }
        s.falling = None;
        s.step(MS * 2, &[]);

        assert_eq!(s.losses(), 1);
        assert!(!s.held.left && !s.held.right && !s.held.down);
    }

    #[test]
    fn move_left_then_repeat_after_interval() {
        let mut s = with_falling(session(), o_piece().at(3, 5));
        s.step(Duration::ZERO, &[InputEvent::Pressed(DistractorAction::MoveLeft)]);
        assert_eq!(s.falling().unwrap().x, 2);

        // Not strictly past the repeat interval yet.
        s.step(MS * 150, &[]);
        assert_eq!(s.falling().unwrap().x, 2);

        s.step(MS * 151, &[]);
        assert_eq!(s.falling().unwrap().x, 1);

        s.step(MS * 160, &[InputEvent::Released(DistractorAction::MoveLeft)]);
        s.step(MS * 400, &[]);
        assert_eq!(s.falling().unwrap().x, 1);
    }

    #[test]
    fn pressing_right_cancels_held_left() {
        let mut s = with_falling(session(), o_piece().at(3, 5));
        s.step(Duration::ZERO, &[InputEvent::Pressed(DistractorAction::MoveLeft)]);
        s.step(MS, &[InputEvent::Pressed(DistractorAction::MoveRight)]);
        assert!(s.held.right);
        assert!(!s.held.left);
        assert_eq!(s.falling().unwrap().x, 3);
    }

    #[test]
    fn soft_drop_repeats_while_held() {
        let mut s = with_falling(session(), o_piece().at(3, 0));
        s.step(Duration::ZERO, &[InputEvent::Pressed(DistractorAction::SoftDrop)]);
        assert_eq!(s.falling().unwrap().y, 1);

        s.step(MS * 101, &[]);
        assert_eq!(s.falling().unwrap().y, 2);

        s.step(MS * 150, &[InputEvent::Released(DistractorAction::SoftDrop)]);
        s.step(MS * 300, &[]);
        assert_eq!(s.falling().unwrap().y, 2);
    }

    #[test]
    fn hard_drop_lands_on_next_gravity_tick() {
        let mut s = with_falling(session(), o_piece());
        s.step(MS, &[InputEvent::Pressed(DistractorAction::HardDrop)]);

        let dropped = *s.falling().unwrap();
        assert!(!dropped.legal_down(s.board()));
        assert_eq!(s.board().filled_count(), 0);

        // Gravity interval at level 1 is 340ms; the tick must be strictly later.
        s.step(MS * 341, &[]);
        assert!(s.falling().is_none());
        assert_eq!(s.board().filled_count(), 4);

        s.step(MS * 342, &[]);
        assert!(s.falling().is_some());
        assert_eq!(s.losses(), 0);
    }

    #[test]
    fn gravity_moves_piece_down_once_per_interval() {
        let mut s = with_falling(session(), o_piece());
        s.step(MS * 340, &[]);
        assert_eq!(s.falling().unwrap().y, -2);
        s.step(MS * 341, &[]);
        assert_eq!(s.falling().unwrap().y, -1);
        s.step(MS * 600, &[]);
        assert_eq!(s.falling().unwrap().y, -1);
        s.step(MS * 682, &[]);
        assert_eq!(s.falling().unwrap().y, 0);
    }

    #[test]
    fn landing_clears_lines_and_raises_level() {
        let mut s = session();
        // Bottom two rows full except columns 4 and 5, where an O fits.
        for row in 18..20 {
            for col in 0..10 {
                if col != 4 && col != 5 {
                    s.board.set(col, row, Some(ColorIndex::Yellow));
                }
            }
        }
        s.lines_cleared = 8;
        // O template occupies columns 1..=2 and rows 2..=3 of its grid.
        s.falling = Some(o_piece().at(3, 16));
        assert!(!s.falling().unwrap().legal_down(s.board()));

        s.step(MS * 341, &[]);

        assert_eq!(s.lines_cleared(), 10);
        assert_eq!(s.level(), 2);
        assert_eq!(s.gravity_interval(), MS * 330);
        assert_eq!(s.board().filled_count(), 0);
    }

    #[test]
    fn rotation_is_attempted_and_reverted() {
        let t = Piece::new(ShapeKind::T, 0, ColorIndex::Red, 10).at(3, 5);
        let mut s = with_falling(session(), t);
        s.step(MS, &[InputEvent::Pressed(DistractorAction::RotateCw)]);
        assert_eq!(s.falling().unwrap().orientation(), 1);
        s.step(MS * 2, &[InputEvent::Pressed(DistractorAction::RotateCcw)]);
        assert_eq!(s.falling().unwrap().orientation(), 0);
    }

    #[test]
    fn quit_aborts_and_sticks() {
        let mut s = session();
        let events = [InputEvent::Quit, InputEvent::Pressed(DistractorAction::MoveLeft)];
        let phase = s.step(MS, &events);
        assert_eq!(phase, SessionPhase::Aborted);
        assert_eq!(s.step(MS * 2, &[]), SessionPhase::Aborted);
    }

    #[test]
    fn deadline_finishes_even_mid_piece() {
        let mut s = with_falling(session(), o_piece().at(3, 5));
        assert_eq!(s.step(Duration::from_secs(60), &[]), SessionPhase::Finished);
        assert_eq!(s.falling().unwrap().y, 5);
        assert_eq!(s.outcome(), SessionOutcome::default());
    }

    #[test]
    fn frame_reports_remaining_time() {
        let s = session();
        let frame = s.frame(Duration::from_secs(45));
        assert_eq!(frame.remaining, Duration::from_secs(15));
        assert_eq!(frame.level, 1);
        assert!(frame.falling.is_some());
    }
}

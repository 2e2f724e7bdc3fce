//! Play session: the game plus hint state as one tagged state machine.
//!
//! A hint can only exist while the game is being played, and a pending
//! hint is tied to the board it was requested for. Any move or restart
//! bumps the session generation, so replies for older tickets are dropped.

use derive_more::Display;
use neon_advisor::{HintOutcome, HintRequest};
use neon_tictactoe::{Board, Game, Mark, MoveError, Phase, WinResult};
use tracing::{debug, info, instrument, warn};

/// Proof that a hint request was issued against a given session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintTicket {
    generation: u64,
    request: HintRequest,
}

impl HintTicket {
    /// The session generation the ticket was issued in.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The request to send to the advisor.
    pub fn request(&self) -> &HintRequest {
        &self.request
    }
}

/// Hint state while the game is being played.
#[derive(Debug, Clone)]
pub enum HintSlot {
    /// No hint shown or requested.
    Idle,
    /// A request is in flight; further hint requests are refused.
    Pending(HintTicket),
    /// A hint is shown until the next move or request.
    Ready(HintOutcome),
}

/// Session phase. Terminal phases carry no hint state.
#[derive(Debug, Clone)]
pub enum SessionPhase {
    /// Game in progress.
    Playing {
        /// Current hint state.
        hint: HintSlot,
    },
    /// Game won.
    Won(WinResult),
    /// Game drawn.
    Drawn,
}

impl SessionPhase {
    fn after(phase: Phase) -> Self {
        match phase {
            Phase::InProgress => SessionPhase::Playing {
                hint: HintSlot::Idle,
            },
            Phase::Won(win) => SessionPhase::Won(win),
            Phase::Drawn => SessionPhase::Drawn,
        }
    }
}

/// Why a hint request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum HintRefused {
    /// The game is over.
    #[display("The game is over, no hints available")]
    GameOver,
    /// A hint request is already in flight.
    #[display("A hint is already on its way")]
    AlreadyPending,
}

impl std::error::Error for HintRefused {}

/// A game being played, with its hint state.
#[derive(Debug, Clone)]
pub struct Session {
    game: Game,
    phase: SessionPhase,
    generation: u64,
}

impl Session {
    /// Creates a session at the start of a new game.
    #[instrument]
    pub fn new() -> Self {
        Self {
            game: Game::new(),
            phase: SessionPhase::Playing {
                hint: HintSlot::Idle,
            },
            generation: 0,
        }
    }

    /// The underlying game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        self.game.board()
    }

    /// The mark to move.
    pub fn to_move(&self) -> Mark {
        self.game.to_move()
    }

    /// The current phase.
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// Incremented on every move and restart.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while a hint request is in flight.
    pub fn is_awaiting_hint(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Playing {
                hint: HintSlot::Pending(_)
            }
        )
    }

    /// The hint currently shown, if any.
    pub fn hint(&self) -> Option<&HintOutcome> {
        match &self.phase {
            SessionPhase::Playing {
                hint: HintSlot::Ready(outcome),
            } => Some(outcome),
            _ => None,
        }
    }

    /// Plays the current mark at `index`.
    ///
    /// Allowed while a hint is pending; the pending hint becomes stale.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn play(&mut self, index: usize) -> Result<Phase, MoveError> {
        let phase = self.game.play(index)?;
        if self.is_awaiting_hint() {
            debug!("Move made while hint pending, reply will be discarded");
        }
        self.generation += 1;
        self.phase = SessionPhase::after(phase);
        Ok(phase)
    }

    /// Starts a hint request, returning the ticket to complete it with.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn begin_hint(&mut self) -> Result<HintTicket, HintRefused> {
        let SessionPhase::Playing { hint } = &mut self.phase else {
            return Err(HintRefused::GameOver);
        };
        if matches!(hint, HintSlot::Pending(_)) {
            return Err(HintRefused::AlreadyPending);
        }

        let ticket = HintTicket {
            generation: self.generation,
            request: HintRequest::new(*self.game.board(), self.game.to_move()),
        };
        *hint = HintSlot::Pending(ticket.clone());
        debug!("Hint requested");
        Ok(ticket)
    }

    /// Delivers a hint reply. Returns false when the reply is stale.
    #[instrument(skip(self, ticket, outcome), fields(generation = self.generation, ticket = ticket.generation))]
    pub fn complete_hint(&mut self, ticket: &HintTicket, outcome: HintOutcome) -> bool {
        let current = ticket.generation == self.generation
            && ticket.request.board() == self.game.board()
            && matches!(
                &self.phase,
                SessionPhase::Playing { hint: HintSlot::Pending(pending) } if pending == ticket
            );
        if !current {
            warn!("Discarding stale hint reply");
            return false;
        }

        if let SessionPhase::Playing { hint } = &mut self.phase {
            info!(fallback = outcome.is_fallback(), "Hint delivered");
            *hint = HintSlot::Ready(outcome);
        }
        true
    }

    /// Starts a new game in place. Any pending hint becomes stale.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.game.reset();
        self.generation += 1;
        self.phase = SessionPhase::Playing {
            hint: HintSlot::Idle,
        };
        info!(generation = self.generation, "Session restarted");
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

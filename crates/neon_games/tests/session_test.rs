//! Session state machine tests: hint gating and stale reply handling.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use neon_advisor::{
    Advisor, AdvisorError, FALLBACK_REASONING, HintAdvisor, HintOutcome, HintRequest,
    HintSuggestion,
};
use neon_games::{HintRefused, HintSlot, Session, SessionPhase};
use neon_tictactoe::{Mark, MoveError, Phase, Position};

fn advised(position: Position) -> HintOutcome {
    HintOutcome::Advised(HintSuggestion::new(position, "Center control"))
}

/// Always suggests the center.
struct CenterAdvisor;

#[async_trait]
impl Advisor for CenterAdvisor {
    fn name(&self) -> &str {
        "center"
    }

    async fn advise(&self, _request: &HintRequest) -> Result<String, AdvisorError> {
        Ok(r#"{"suggestedIndex": 4, "reasoning": "Center control"}"#.to_string())
    }
}

#[test]
fn test_new_session_is_idle() {
    let session = Session::new();
    assert_eq!(session.to_move(), Mark::X);
    assert_eq!(session.generation(), 0);
    assert!(!session.is_awaiting_hint());
    assert!(session.hint().is_none());
}

#[test]
fn test_hint_delivered_for_current_ticket() {
    let mut session = Session::new();
    let ticket = session.begin_hint().expect("hint allowed");
    assert!(session.is_awaiting_hint());
    assert_eq!(ticket.request().mark(), Mark::X);

    assert!(session.complete_hint(&ticket, advised(Position::Center)));
    let hint = session.hint().expect("hint shown");
    assert_eq!(*hint.suggestion().suggested_index(), 4);
    assert!(!session.is_awaiting_hint());
}

#[test]
fn test_second_request_refused_while_pending() {
    let mut session = Session::new();
    let _ticket = session.begin_hint().expect("hint allowed");
    assert_eq!(session.begin_hint(), Err(HintRefused::AlreadyPending));
}

#[test]
fn test_reply_after_move_is_discarded() {
    let mut session = Session::new();
    let ticket = session.begin_hint().expect("hint allowed");
    session.play(0).expect("legal move");

    assert!(!session.complete_hint(&ticket, advised(Position::Center)));
    assert!(session.hint().is_none());
    assert_eq!(session.to_move(), Mark::O);
}

#[test]
fn test_reply_after_restart_is_discarded() {
    let mut session = Session::new();
    let ticket = session.begin_hint().expect("hint allowed");
    session.restart();

    // Same empty board, but a different generation
    assert_eq!(ticket.request().board(), session.board());
    assert!(!session.complete_hint(&ticket, advised(Position::Center)));
    assert!(session.hint().is_none());
}

#[test]
fn test_old_ticket_discarded_after_new_request() {
    let mut session = Session::new();
    let first = session.begin_hint().expect("hint allowed");
    session.play(4).expect("legal move");
    let second = session.begin_hint().expect("hint allowed after move");

    assert!(!session.complete_hint(&first, advised(Position::Center)));
    assert!(session.is_awaiting_hint());
    assert!(session.complete_hint(&second, advised(Position::TopLeft)));
}

#[test]
fn test_move_clears_shown_hint() {
    let mut session = Session::new();
    let ticket = session.begin_hint().expect("hint allowed");
    session.complete_hint(&ticket, advised(Position::Center));
    assert!(session.hint().is_some());

    session.play(4).expect("legal move");
    assert!(session.hint().is_none());
    assert!(matches!(
        session.phase(),
        SessionPhase::Playing {
            hint: HintSlot::Idle
        }
    ));
}

#[test]
fn test_new_request_replaces_shown_hint() {
    let mut session = Session::new();
    let ticket = session.begin_hint().expect("hint allowed");
    session.complete_hint(&ticket, advised(Position::Center));

    let again = session.begin_hint().expect("hint allowed");
    assert!(session.hint().is_none());
    assert!(session.complete_hint(&again, advised(Position::TopLeft)));
    assert_eq!(*session.hint().expect("shown").suggestion().suggested_index(), 0);
}

#[test]
fn test_hint_refused_after_win() {
    let mut session = Session::new();
    for index in [0, 3, 1, 4] {
        session.play(index).expect("legal move");
    }
    let ticket = session.begin_hint().expect("hint allowed");
    let phase = session.play(2).expect("winning move");

    assert!(matches!(phase, Phase::Won(win) if win.mark() == Mark::X));
    assert_eq!(session.begin_hint(), Err(HintRefused::GameOver));
    assert!(!session.complete_hint(&ticket, advised(Position::TopRight)));
    assert!(matches!(session.phase(), SessionPhase::Won(_)));
}

#[test]
fn test_illegal_move_keeps_generation() {
    let mut session = Session::new();
    session.play(4).expect("legal move");
    let generation = session.generation();

    assert_eq!(session.play(4), Err(MoveError::CellOccupied(Position::Center)));
    assert_eq!(session.play(9), Err(MoveError::OutOfRange(9)));
    assert_eq!(session.generation(), generation);
    assert_eq!(session.to_move(), Mark::O);
}

#[test]
fn test_draw_refuses_hints() {
    let mut session = Session::new();
    // X O X / X O O / O X X
    for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        session.play(index).expect("legal move");
    }
    assert!(matches!(session.phase(), SessionPhase::Drawn));
    assert_eq!(session.begin_hint(), Err(HintRefused::GameOver));
}

#[tokio::test]
async fn test_round_trip_through_hint_advisor() {
    let advisor = HintAdvisor::new(Arc::new(CenterAdvisor), Duration::from_secs(5));
    let mut session = Session::new();
    let ticket = session.begin_hint().expect("hint allowed");

    let request = ticket.request();
    let outcome = advisor.request_hint(request.board(), request.mark()).await;
    assert!(session.complete_hint(&ticket, outcome));

    let shown = session.hint().expect("hint shown");
    assert!(!shown.is_fallback());
    assert_eq!(shown.suggestion().position(), Some(Position::Center));
    assert_eq!(shown.suggestion().reasoning(), "Center control");
}

#[tokio::test]
async fn test_offline_hint_is_fallback() {
    let advisor = HintAdvisor::offline();
    let mut session = Session::new();
    let ticket = session.begin_hint().expect("hint allowed");

    let outcome = advisor
        .request_hint(ticket.request().board(), ticket.request().mark())
        .await;
    assert!(session.complete_hint(&ticket, outcome));

    let shown = session.hint().expect("fallback shown");
    assert!(shown.is_fallback());
    assert_eq!(shown.suggestion().position(), None);
    assert_eq!(shown.suggestion().reasoning(), FALLBACK_REASONING);
}

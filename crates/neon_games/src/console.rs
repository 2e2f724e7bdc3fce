//! Line-based terminal front end.
//!
//! Moves stay available while a hint is in flight: hint requests run on a
//! spawned task and report back over a channel, and the session drops any
//! reply that arrives after the board changed.

use crate::session::{HintSlot, HintTicket, Session, SessionPhase};
use anyhow::Result;
use neon_advisor::{HintAdvisor, HintOutcome};
use neon_tictactoe::{Cell, Position};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// A command typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Play the current mark at a cell index.
    Move(usize),
    /// Ask the advisor for a hint.
    Hint,
    /// Start a new game.
    Restart,
    /// Redraw the board.
    Board,
    /// Show the command list.
    Help,
    /// Leave.
    Quit,
}

impl ConsoleCommand {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let word = line.trim().to_lowercase();
        if let Ok(index) = word.parse::<usize>() {
            return Ok(ConsoleCommand::Move(index));
        }
        match word.as_str() {
            "h" | "hint" => Ok(ConsoleCommand::Hint),
            "r" | "restart" => Ok(ConsoleCommand::Restart),
            "b" | "board" | "" => Ok(ConsoleCommand::Board),
            "?" | "help" => Ok(ConsoleCommand::Help),
            "q" | "quit" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
        }
    }
}

const HELP: &str = "Commands: 0-8 (play that cell), hint, restart, board, help, quit";

/// Renders the board with the status line below it.
pub fn render(session: &Session) -> String {
    let board = session.board();
    let winning_line = match session.phase() {
        SessionPhase::Won(win) => Some(win.line()),
        _ => None,
    };
    let suggested = session
        .hint()
        .and_then(|h| h.suggestion().position())
        .map(Position::to_index);

    let mut out = String::new();
    for (index, cell) in board.cells().iter().enumerate() {
        let on_winning_line = winning_line
            .zip(Position::from_index(index))
            .is_some_and(|(line, position)| line.contains(position));
        let token = match cell {
            Cell::Occupied(mark) if on_winning_line => format!("[{}]", mark),
            Cell::Occupied(mark) => format!(" {} ", mark),
            Cell::Empty if suggested == Some(index) => format!("<{}>", index),
            Cell::Empty => format!(" {} ", index),
        };
        out.push_str(&token);
        match index % 3 {
            2 if index < 8 => out.push_str("\n---+---+---\n"),
            2 => out.push('\n'),
            _ => out.push('|'),
        }
    }
    out.push_str(&status_line(session));
    out
}

/// One-line description of the session state.
pub fn status_line(session: &Session) -> String {
    match session.phase() {
        SessionPhase::Won(win) => format!("Winner: {}", win),
        SessionPhase::Drawn => "Draw! Type 'restart' for a rematch.".to_string(),
        SessionPhase::Playing { hint } => {
            let turn = format!("{} to move", session.to_move());
            match hint {
                HintSlot::Idle => turn,
                HintSlot::Pending(_) => format!("{} (consulting advisor...)", turn),
                HintSlot::Ready(outcome) => format!("{}. {}", turn, describe_hint(outcome)),
            }
        }
    }
}

fn describe_hint(outcome: &HintOutcome) -> String {
    if outcome.is_fallback() {
        format!("Hint unavailable: {}", outcome.suggestion().reasoning())
    } else {
        format!("Hint: {}", outcome.suggestion())
    }
}

/// Lists the cells still open, for after a rejected move.
pub fn open_cells_hint(session: &Session) -> String {
    let open: Vec<String> = session
        .game()
        .open_positions()
        .iter()
        .map(|position| position.to_index().to_string())
        .collect();
    if open.is_empty() {
        "Type 'restart' for a new game.".to_string()
    } else {
        format!("Open cells: {}", open.join(", "))
    }
}

/// Applies a command to the session. Returns the hint ticket to dispatch,
/// if any, and whether to keep going.
#[instrument(skip(session))]
pub fn apply_command(session: &mut Session, command: ConsoleCommand) -> (Option<HintTicket>, bool) {
    match command {
        ConsoleCommand::Move(index) => {
            match session.play(index) {
                Ok(_) => println!("{}", render(session)),
                Err(e) => println!("{} {}", e, open_cells_hint(session)),
            }
            (None, true)
        }
        ConsoleCommand::Hint => match session.begin_hint() {
            Ok(ticket) => {
                println!("{}", status_line(session));
                (Some(ticket), true)
            }
            Err(refused) => {
                println!("{}", refused);
                (None, true)
            }
        },
        ConsoleCommand::Restart => {
            session.restart();
            println!("{}", render(session));
            (None, true)
        }
        ConsoleCommand::Board => {
            println!("{}", render(session));
            (None, true)
        }
        ConsoleCommand::Help => {
            println!("{}", HELP);
            (None, true)
        }
        ConsoleCommand::Quit => (None, false),
    }
}

/// Runs the interactive session on stdin/stdout until `quit` or EOF.
#[instrument(skip(advisor), fields(advisor = %advisor.name()))]
pub async fn run_console(advisor: HintAdvisor) -> Result<()> {
    info!("Starting console session");
    let (hint_tx, mut hint_rx) = mpsc::unbounded_channel::<(HintTicket, HintOutcome)>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = Session::new();

    println!("{}", HELP);
    println!("{}", render(&session));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                let command = match ConsoleCommand::parse(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message);
                        continue;
                    }
                };
                let (ticket, keep_going) = apply_command(&mut session, command);
                if let Some(ticket) = ticket {
                    let advisor = advisor.clone();
                    let tx = hint_tx.clone();
                    tokio::spawn(async move {
                        let request = ticket.request();
                        let outcome = advisor.request_hint(request.board(), request.mark()).await;
                        // Receiver gone means the console already exited.
                        let _ = tx.send((ticket, outcome));
                    });
                }
                if !keep_going {
                    break;
                }
            }
            Some((ticket, outcome)) = hint_rx.recv() => {
                if session.complete_hint(&ticket, outcome) {
                    println!("{}", render(&session));
                }
            }
        }
    }

    info!("Console session ended");
    Ok(())
}

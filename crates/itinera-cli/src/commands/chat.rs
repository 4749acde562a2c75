use super::require_user;
use crate::render;
use anyhow::Result;
use colored::Colorize;
use itinera_application::AppContext;
use itinera_core::ItineraError;
use itinera_core::chat::ChatMessage;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow::{self, Borrowed, Owned};

const SLASH_COMMANDS: [&str; 3] = ["/history", "/itinerary", "/quit"];

/// Completes, hints and highlights the chat's slash commands.
struct ChatHelper;

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }
        let candidates = SLASH_COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ChatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        SLASH_COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].bright_black().to_string())
    }
}

impl Validator for ChatHelper {}

/// Chats about a saved itinerary: one message with `message`, otherwise an
/// interactive session.
pub async fn run(app: &AppContext, id: &str, message: Option<String>) -> Result<()> {
    require_user(app)?;
    let record = app
        .planner
        .find(id)
        .ok_or_else(|| ItineraError::itinerary_not_found(id))?;

    if let Some(message) = message {
        let output = app.planner.chat(id, &message).await?;
        render::print_chat_message(&ChatMessage::model(output.response));
        return Ok(());
    }

    println!(
        "{}",
        format!("=== Chat: {} ===", record.destination).bright_magenta().bold()
    );
    println!(
        "{}",
        "Ask anything about this itinerary. /history, /itinerary, /quit".bright_black()
    );
    for previous in app.planner.chat_history(id)? {
        render::print_chat_message(&previous);
    }
    println!();

    let mut rl: Editor<ChatHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ChatHelper));

    loop {
        match rl.readline("you> ") {
            Ok(line) => {
                let trimmed = line.trim();
                match trimmed {
                    "" => continue,
                    "/quit" | "/exit" | "quit" | "exit" => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    "/history" => {
                        for previous in app.planner.chat_history(id)? {
                            render::print_chat_message(&previous);
                        }
                        continue;
                    }
                    "/itinerary" => {
                        render::print_itinerary(&record.content);
                        continue;
                    }
                    _ => {}
                }

                let _ = rl.add_history_entry(trimmed);
                match app.planner.chat(id, trimmed).await {
                    Ok(output) => {
                        render::print_chat_message(&ChatMessage::model(output.response))
                    }
                    Err(e) => eprintln!("{}", format!("Error: {e}").red()),
                }
                println!();
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}

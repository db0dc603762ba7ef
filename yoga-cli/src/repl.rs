//! Interactive chat loop.

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use yoga_assistant::{Conversation, YogaAssistant};

use crate::app::{print_files, print_fragment, print_report, rebuild};

const HELP: &str = "\
Commands:
  /rebuild   reload the library and rebuild the knowledge base
  /files     list the documents in the library
  /clear     forget the conversation so far
  /help      show this help
  /quit      leave (also Ctrl-D)";

/// A line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Input<'a> {
    Empty,
    Rebuild,
    Files,
    Clear,
    Help,
    Quit,
    Unknown(&'a str),
    Query(&'a str),
}

pub(crate) fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    match line {
        "" => Input::Empty,
        "/rebuild" => Input::Rebuild,
        "/files" => Input::Files,
        "/clear" => Input::Clear,
        "/help" | "/?" => Input::Help,
        "/quit" | "/exit" | "/q" => Input::Quit,
        _ if line.starts_with('/') => Input::Unknown(line),
        _ => Input::Query(line),
    }
}

/// Read questions until the user quits.
pub async fn run(assistant: &YogaAssistant) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut conversation = Conversation::new();

    println!("🧘 Ask me anything about yoga. Type /help for commands.");

    loop {
        let line = match editor.readline("yoga> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        match parse_input(&line) {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Help => println!("{HELP}"),
            Input::Clear => {
                conversation.clear();
                println!("Conversation cleared.");
            }
            Input::Files => {
                if let Err(e) = print_files(assistant) {
                    eprintln!("Error: {e:#}");
                }
            }
            Input::Rebuild => match rebuild(assistant).await {
                Ok(report) => print_report(&report),
                Err(e) => eprintln!("Error: {e:#}"),
            },
            Input::Unknown(command) => eprintln!("Unknown command {command}. Type /help."),
            Input::Query(query) => {
                let _ = editor.add_history_entry(query);
                println!();
                match assistant.ask(&mut conversation, query, print_fragment).await {
                    Ok(_) => println!("\n"),
                    Err(e) => eprintln!("\nError: {e}"),
                }
            }
        }
    }

    Ok(())
}

//! UI utilities for the CLI

use colored::*;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use std::io::{self, IsTerminal, Write};

use itbot_core::{IndexingResult, Result};

const PROMPT: &str = "itbot>";

/// Display startup banner
pub fn display_banner(chunks_indexed: usize) {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(67, terminal_width.saturating_sub(4)).max(40);

    let top_border = format!("┌{}┐", "─".repeat(banner_width - 2));
    let bottom_border = format!("└{}┘", "─".repeat(banner_width - 2));
    let empty_line = format!("│{}│", " ".repeat(banner_width - 2));

    println!();
    println!("{}", top_border.blue());
    println!("{}", empty_line.blue());

    let indexed = format!("{} chunks indexed", chunks_indexed);
    let lines = [
        "itbot - IT support chatbot",
        "",
        "Ask about help desk, networking, security or cloud topics.",
        indexed.as_str(),
    ];

    for line in lines {
        if line.is_empty() {
            println!("{}", empty_line.blue());
            continue;
        }
        let width = line.chars().count();
        let padding = banner_width.saturating_sub(width + 4);
        let text = if line.starts_with("itbot") {
            line.bold().to_string()
        } else {
            line.to_string()
        };
        println!("{}  {}{}{}", "│".blue(), text, " ".repeat(padding), "│".blue());
    }

    println!("{}", empty_line.blue());
    println!("{}", bottom_border.blue());
    println!();
    println!("{}", "💡 Type a question, or 'help' for commands".dimmed());
    println!();
}

/// Display help message
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - Ask an IT support question", "<question>".green());
    println!("  {} - Show indexing statistics", "stats".green());
    println!("  {} - Show this help message", "help".green());
    println!("  {} - Exit the application", "exit/quit".green());
    println!();
    println!("{}", "Examples:".bold());
    println!("  How do I reset my password?");
    println!("  Why does my laptop have a 169.254 address?");
}

/// Display the ingestion summary
pub fn print_stats(stats: &IndexingResult) {
    println!("{}", "Index:".bold());
    println!("  chunks:     {}", stats.chunks_indexed);
    match stats.embedding_dimension {
        Some(dim) => println!("  dimension:  {}", dim),
        None => println!("  dimension:  -"),
    }
    println!("  batches:    {}", stats.batches);
}

/// Read one line of input, with ↑/↓ history when attached to a terminal.
///
/// Returns `None` at end of input (closed stdin or Ctrl-C/Ctrl-D).
pub fn read_input(history: &mut Vec<String>) -> Result<Option<String>> {
    if !io::stdin().is_terminal() {
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let input = input.trim().to_string();
        if !input.is_empty() {
            history.push(input.clone());
        }
        return Ok(Some(input));
    }

    enable_raw_mode()?;
    let result = read_raw_line(history);
    disable_raw_mode()?;
    println!();

    let input = result?;
    if let Some(line) = &input {
        if !line.is_empty() {
            history.push(line.clone());
        }
    }
    Ok(input)
}

fn redraw(input: &str) -> io::Result<()> {
    print!("\r{} {}\x1b[K", PROMPT.green().bold(), input);
    io::stdout().flush()
}

fn read_raw_line(history: &[String]) -> Result<Option<String>> {
    let mut input = String::new();
    let mut history_index: Option<usize> = None;

    redraw(&input)?;

    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };

        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Enter => return Ok(Some(input.trim().to_string())),
            KeyCode::Char('c') | KeyCode::Char('d') if ctrl => return Ok(None),
            KeyCode::Char(c) => {
                input.push(c);
                redraw(&input)?;
            }
            KeyCode::Backspace => {
                input.pop();
                redraw(&input)?;
            }
            KeyCode::Up if !history.is_empty() => {
                let new_index = match history_index {
                    None => history.len() - 1,
                    Some(idx) => idx.saturating_sub(1),
                };
                history_index = Some(new_index);
                input = history[new_index].clone();
                redraw(&input)?;
            }
            KeyCode::Down => {
                if let Some(idx) = history_index {
                    if idx + 1 < history.len() {
                        history_index = Some(idx + 1);
                        input = history[idx + 1].clone();
                    } else {
                        history_index = None;
                        input.clear();
                    }
                    redraw(&input)?;
                }
            }
            KeyCode::Esc => {
                input.clear();
                history_index = None;
                redraw(&input)?;
            }
            _ => {}
        }
    }
}

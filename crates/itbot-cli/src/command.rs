//! Interpretation of a line typed at the interactive prompt

/// What the user asked the REPL to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line, ignored
    Empty,
    Help,
    Stats,
    Exit,
    /// Anything else is a question for the chatbot
    Ask(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Command::Empty,
            "help" | "?" => Command::Help,
            "stats" => Command::Stats,
            "exit" | "quit" => Command::Exit,
            _ => Command::Ask(trimmed.to_string()),
        }
    }
}

use async_trait::async_trait;
use std::io::{self, BufRead, BufReader, Write};
use std::thread;
use tokio::sync::mpsc;

use crate::dispatch::Confirm;

/// Console commands understood by the booking and admin consoles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandType {
    Book,       // \book <slot> <plate> <mobile> <hours>
    Add,        // \add <slot> <price>
    Remove,     // \remove <slot>
    Release,    // \release <slot>
    Refresh,    // \refresh
    Help,       // \help
    Quit,       // \quit
    Unknown,
}

impl CommandType {
    /// Parse command type from prefix
    pub fn from_prefix(prefix: &str) -> Self {
        match prefix.to_lowercase().as_str() {
            "\\book" | "/book" => CommandType::Book,
            "\\add" | "/add" => CommandType::Add,
            "\\remove" | "/remove" | "\\rm" | "/rm" => CommandType::Remove,
            "\\release" | "/release" => CommandType::Release,
            "\\refresh" | "/refresh" | "\\r" | "/r" => CommandType::Refresh,
            "\\help" | "/help" | "\\h" | "/h" => CommandType::Help,
            "\\quit" | "/quit" | "\\q" | "/q" | "\\exit" | "/exit" => CommandType::Quit,
            _ => CommandType::Unknown,
        }
    }
}

/// Parsed console line
#[derive(Debug, Clone)]
pub struct ParsedCommand {
    pub command_type: CommandType,
    pub raw_text: String,
    pub arguments: Vec<String>,
}

impl ParsedCommand {
    /// Parse a console line into a command
    ///
    /// # Examples
    /// ```
    /// use parking_client::console::{CommandType, ParsedCommand};
    ///
    /// let cmd = ParsedCommand::parse("\\add C1 30");
    /// assert_eq!(cmd.command_type, CommandType::Add);
    /// assert_eq!(cmd.arguments, vec!["C1", "30"]);
    /// ```
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();

        if let Some((prefix, rest)) = Self::extract_prefix(trimmed) {
            ParsedCommand {
                command_type: CommandType::from_prefix(prefix),
                raw_text: trimmed.to_string(),
                arguments: rest.split_whitespace().map(str::to_string).collect(),
            }
        } else {
            ParsedCommand {
                command_type: CommandType::Unknown,
                raw_text: trimmed.to_string(),
                arguments: Vec::new(),
            }
        }
    }

    /// Extract prefix and rest of the line
    fn extract_prefix(text: &str) -> Option<(&str, &str)> {
        if !(text.starts_with('\\') || text.starts_with('/')) {
            return None;
        }
        match text.find(char::is_whitespace) {
            Some(space_pos) => Some((&text[..space_pos], &text[space_pos..])),
            None => Some((text, "")),
        }
    }

    /// Positional argument, empty when absent
    pub fn arg(&self, index: usize) -> &str {
        self.arguments.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn is_command(&self) -> bool {
        self.command_type != CommandType::Unknown
    }
}

/// Read `reader` line by line on a detached thread, off the runtime.
///
/// Runtime shutdown never waits on a pending read. The thread ends at end of
/// input, on a read error, or once the receiver is dropped.
pub fn spawn_line_reader<R>(reader: R) -> io::Result<mpsc::Receiver<io::Result<String>>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    thread::Builder::new()
        .name("console-input".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Line-oriented console: commands in, prompts out.
pub struct Console<W> {
    lines: mpsc::Receiver<io::Result<String>>,
    out: W,
}

impl Console<io::Stdout> {
    pub fn stdin() -> io::Result<Self> {
        let lines = spawn_line_reader(BufReader::new(io::stdin()))?;
        Ok(Self::new(lines, io::stdout()))
    }
}

impl<W: Write> Console<W> {
    pub fn new(lines: mpsc::Receiver<io::Result<String>>, out: W) -> Self {
        Self { lines, out }
    }

    /// Next line of input, `None` at end of input. Cancel-safe.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.lines.recv().await.transpose()
    }

    pub fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to console: {}", e);
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl<W: Write + Send> Confirm for Console<W> {
    async fn confirm(&mut self, prompt: &str) -> bool {
        if let Err(e) = write!(self.out, "{} [y/N] ", prompt).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to console: {}", e);
        }
        match self.next_line().await {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

//! The commit-msg side of git-ai: ask the author and tag the message.
//!
//! Git runs hooks with stdin detached from the terminal, so the prompt talks
//! to `/dev/tty` directly. Without a terminal the answer is "no", and nothing
//! here can make the commit fail.

use crate::domain::marker;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable that answers the prompt for scripted commits
pub const ANSWER_ENV: &str = "GIT_AI_ANSWER";

/// Asks the author a yes/no question
pub trait Prompt {
    /// `None` when no answer could be obtained
    fn ask(&mut self, question: &str) -> Option<bool>;
}

/// Prompt over any line-oriented reader/writer pair
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LinePrompt { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, question: &str) -> Option<bool> {
        write!(self.output, "{} (y/N): ", question).ok()?;
        self.output.flush().ok()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => parse_answer(&line),
        }
    }
}

/// Used when there is no terminal to ask
pub struct NonInteractive;

impl Prompt for NonInteractive {
    fn ask(&mut self, _question: &str) -> Option<bool> {
        None
    }
}

/// A fixed answer, taken from the environment
pub struct FixedAnswer(pub bool);

impl Prompt for FixedAnswer {
    fn ask(&mut self, _question: &str) -> Option<bool> {
        Some(self.0)
    }
}

/// What happened to the message file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Marker added
    Marked,
    /// Author said no, or gave no answer
    Unmarked,
    /// Already marked, or no subject line to mark; the author was not asked
    Unchanged,
    /// An internal error occurred; the message was left alone
    Skipped,
}

/// Interpret a typed answer. Empty input means no answer.
pub fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => None,
        "y" | "yes" => Some(true),
        _ => Some(false),
    }
}

fn parse_env_answer(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "1" | "true" => Some(true),
        "n" | "no" | "0" | "false" => Some(false),
        _ => None,
    }
}

/// The prompt to use inside a git hook.
///
/// `GIT_AI_ANSWER` wins, then the controlling terminal, then
/// [NonInteractive].
pub fn hook_prompt() -> Box<dyn Prompt> {
    if let Some(answer) = std::env::var(ANSWER_ENV)
        .ok()
        .as_deref()
        .and_then(parse_env_answer)
    {
        debug!(answer, "answer taken from {}", ANSWER_ENV);
        return Box::new(FixedAnswer(answer));
    }

    match open_terminal() {
        Ok(prompt) => Box::new(prompt),
        Err(e) => {
            debug!(error = %e, "no terminal available, defaulting to non-AI");
            Box::new(NonInteractive)
        }
    }
}

fn open_terminal() -> io::Result<LinePrompt<BufReader<fs::File>, fs::File>> {
    let tty = OpenOptions::new().read(true).write(true).open("/dev/tty")?;
    let input = BufReader::new(tty.try_clone()?);
    Ok(LinePrompt::new(input, tty))
}

/// Ask `question` and tag the pending commit message in place on "yes".
///
/// Never fails: any error leaves the file untouched and yields
/// [Outcome::Skipped].
pub fn intercept(message_file: &Path, prompt: &mut dyn Prompt, question: &str) -> Outcome {
    match try_intercept(message_file, prompt, question) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(
                file = %message_file.display(),
                error = %e,
                "could not update commit message; leaving it unmarked"
            );
            Outcome::Skipped
        }
    }
}

fn try_intercept(message_file: &Path, prompt: &mut dyn Prompt, question: &str) -> io::Result<Outcome> {
    let message = fs::read_to_string(message_file)?;

    let encoded = marker::encode(&message, true);
    if encoded == message {
        return Ok(Outcome::Unchanged);
    }

    if !prompt.ask(question).unwrap_or(false) {
        return Ok(Outcome::Unmarked);
    }

    fs::write(message_file, encoded)?;
    Ok(Outcome::Marked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn message_file(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("COMMIT_EDITMSG");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("y\n"), Some(true));
        assert_eq!(parse_answer("  YES "), Some(true));
        assert_eq!(parse_answer("n"), Some(false));
        assert_eq!(parse_answer("maybe"), Some(false));
        assert_eq!(parse_answer("\n"), None);
    }

    #[test]
    fn test_parse_env_answer() {
        assert_eq!(parse_env_answer("1"), Some(true));
        assert_eq!(parse_env_answer("false"), Some(false));
        assert_eq!(parse_env_answer("sometimes"), None);
    }

    #[test]
    fn test_line_prompt_writes_question() {
        let mut output = Vec::new();
        let answer = {
            let mut prompt = LinePrompt::new(Cursor::new("y\n"), &mut output);
            prompt.ask("Is this code written by AI?")
        };
        assert_eq!(answer, Some(true));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Is this code written by AI? (y/N): "
        );
    }

    #[test]
    fn test_line_prompt_eof_is_no_answer() {
        let mut prompt = LinePrompt::new(Cursor::new(""), Vec::new());
        assert_eq!(prompt.ask("?"), None);
    }

    #[test]
    fn test_yes_marks_message() {
        let dir = TempDir::new().unwrap();
        let path = message_file(&dir, "add parser\n\nbody\n");

        let outcome = intercept(&path, &mut FixedAnswer(true), "AI?");
        assert_eq!(outcome, Outcome::Marked);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[AI] add parser\n\nbody\n");
    }

    #[test]
    fn test_no_leaves_message() {
        let dir = TempDir::new().unwrap();
        let path = message_file(&dir, "add parser\n");

        let outcome = intercept(&path, &mut FixedAnswer(false), "AI?");
        assert_eq!(outcome, Outcome::Unmarked);
        assert_eq!(fs::read_to_string(&path).unwrap(), "add parser\n");
    }

    #[test]
    fn test_non_interactive_defaults_to_unmarked() {
        let dir = TempDir::new().unwrap();
        let path = message_file(&dir, "add parser\n");

        let outcome = intercept(&path, &mut NonInteractive, "AI?");
        assert_eq!(outcome, Outcome::Unmarked);
        assert_eq!(fs::read_to_string(&path).unwrap(), "add parser\n");
    }

    #[test]
    fn test_already_marked_is_not_asked() {
        struct Panicking;
        impl Prompt for Panicking {
            fn ask(&mut self, _question: &str) -> Option<bool> {
                panic!("prompt must not be shown");
            }
        }

        let dir = TempDir::new().unwrap();
        let path = message_file(&dir, "[AI] add parser\n");
        assert_eq!(intercept(&path, &mut Panicking, "AI?"), Outcome::Unchanged);
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist");
        assert_eq!(
            intercept(&path, &mut FixedAnswer(true), "AI?"),
            Outcome::Skipped
        );
        assert!(!path.exists());
    }
}

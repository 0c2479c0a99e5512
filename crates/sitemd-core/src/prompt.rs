//! Blocking operator prompts.
//!
//! Single-page mode asks the operator for a URL, a filename and how to
//! resolve an existing file. The questions go through [`Prompter`] so the
//! session can be driven from a terminal or from scripted answers.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Synchronous request/response channel to the operator.
pub trait Prompter {
    /// Shows `question` and blocks until an answer line is available.
    /// The answer is returned without its line terminator.
    fn ask(&mut self, question: &str) -> io::Result<String>;

    /// Shows an informational message.
    fn say(&mut self, message: &str);
}

/// Prompts on stdout and reads answers from stdin.
#[derive(Debug, Default)]
pub struct StdioPrompter;

impl Prompter for StdioPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(question.as_bytes())?;
        stdout.flush()?;
        drop(stdout);

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed while waiting for an answer",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Replays a fixed list of answers and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Questions and messages in the order they were shown.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.transcript.push(question.to_string());
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })
    }

    fn say(&mut self, message: &str) {
        self.transcript.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_prompter_replays_in_order() {
        let mut p = ScriptedPrompter::new(["first", "second"]);
        assert_eq!(p.ask("q1? ").unwrap(), "first");
        p.say("note");
        assert_eq!(p.ask("q2? ").unwrap(), "second");
        assert_eq!(p.transcript(), ["q1? ", "note", "q2? "]);
        assert_eq!(p.remaining(), 0);
    }

    #[test]
    fn scripted_prompter_errors_when_exhausted() {
        let mut p = ScriptedPrompter::new(Vec::<String>::new());
        let err = p.ask("anything? ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}

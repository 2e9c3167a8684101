// SPDX-License-Identifier: MPL-2.0
//! [`Interaction`] over a `console` terminal.
//!
//! Menus are numbered lists answered by typing the number. An empty answer
//! (or end of input) cancels the prompt. When stdin or stdout is not a
//! terminal, answers are read line by line from stdin.

use crate::error::Result;
use crate::ui::shell::{normalize_input, Interaction, PathFilter};
use console::{style, Term};
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use tracing::debug;

/// Where prompt answers come from.
enum Input {
    /// An attended terminal, read through `console`.
    Terminal,
    /// Piped or scripted answers, one per line.
    Lines(Box<dyn BufRead>),
}

/// Terminal-backed interaction writing to stdout.
pub struct TerminalInteraction {
    term: Term,
    input: Input,
    color: bool,
}

impl TerminalInteraction {
    /// Reads from the keyboard when both ends are a terminal, from stdin
    /// lines otherwise.
    #[must_use]
    pub fn new(color: bool) -> Self {
        let term = Term::stdout();
        let input = if term.is_term() && io::stdin().is_terminal() {
            Input::Terminal
        } else {
            Input::Lines(Box::new(io::stdin().lock()))
        };
        Self { term, input, color }
    }

    /// Takes answers from `input` instead of stdin.
    #[must_use]
    pub fn with_input<R: BufRead + 'static>(color: bool, input: R) -> Self {
        Self {
            term: Term::stdout(),
            input: Input::Lines(Box::new(input)),
            color,
        }
    }

    fn read_answer(&mut self) -> Result<Option<String>> {
        let line = match &mut self.input {
            Input::Terminal => self.term.read_line()?,
            Input::Lines(input) => {
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    debug!("end of input");
                    self.term.write_line("")?;
                    return Ok(None);
                }
                // Echo so redirected transcripts keep one answer per line.
                self.term.write_line(line.trim_end())?;
                line
            }
        };
        let line = line.trim();
        Ok((!line.is_empty()).then(|| line.to_string()))
    }

    fn prompt_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let marker = style("?").cyan().bold().force_styling(self.color);
        self.term.write_str(&format!("{marker} {prompt} "))?;
        self.term.flush()?;
        self.read_answer()
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        let message = style(message).red().force_styling(self.color);
        self.term.write_line(&message.to_string())?;
        Ok(())
    }
}

/// Parses a 1-based menu answer.
fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    answer
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=count).contains(n))
        .map(|n| n - 1)
}

impl Interaction for TerminalInteraction {
    fn clear(&mut self) -> Result<()> {
        if self.term.is_term() {
            self.term.clear_screen()?;
        }
        Ok(())
    }

    fn show(&mut self, text: &str) -> Result<()> {
        self.term.write_line(text)?;
        Ok(())
    }

    fn select(&mut self, prompt: &str, choices: &[&str]) -> Result<Option<usize>> {
        for (i, choice) in choices.iter().enumerate() {
            let number = style(format!("{:>2})", i + 1)).cyan().force_styling(self.color);
            self.term.write_line(&format!("{number} {choice}"))?;
        }
        loop {
            let Some(answer) = self.prompt_line(prompt)? else {
                return Ok(None);
            };
            match parse_choice(&answer, choices.len()) {
                Some(index) => return Ok(Some(index)),
                None => {
                    debug!(answer = %answer, "invalid menu answer");
                    self.warn(&format!("Please enter a number from 1 to {}.", choices.len()))?;
                }
            }
        }
    }

    fn pick_file(&mut self, prompt: &str, filter: &PathFilter) -> Result<Option<PathBuf>> {
        loop {
            let Some(answer) = self.prompt_line(prompt)? else {
                return Ok(None);
            };
            let path = normalize_input(&answer);
            match filter.check(&path) {
                Ok(()) => return Ok(Some(path)),
                Err(rejection) => self.warn(&rejection.to_string())?,
            }
        }
    }
}

//! Interactive stdin prompts for the dispatch confirm gates.
//!
//! Every prompt treats EOF as declining, so a closed stdin can never
//! push a dispatch through.

use crate::error::{DialplanError, Result};
use std::io::{self, BufRead, Write};

/// Operator decision for a pending scripted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StepChoice {
    Dispatch,
    Skip,
    Quit,
}

/// Operator decision for a failed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FailureChoice {
    Retry,
    Skip,
    Quit,
}

/// Ask a yes/no question. Empty input and EOF both count as no.
pub(super) fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    flush_stdout()?;

    match read_line()? {
        Some(line) => Ok(parse_confirmation(&line)),
        None => {
            println!();
            Ok(false)
        }
    }
}

/// Ask what to do with a pending scripted step. EOF quits.
pub(super) fn step_choice() -> Result<StepChoice> {
    loop {
        print!("[d]ispatch, [s]kip, [q]uit? ");
        flush_stdout()?;

        let Some(line) = read_line()? else {
            println!();
            return Ok(StepChoice::Quit);
        };
        match parse_step_choice(&line) {
            Some(choice) => return Ok(choice),
            None => println!("Please answer d, s, or q."),
        }
    }
}

/// Ask what to do with a step that just failed. EOF quits.
pub(super) fn failure_choice() -> Result<FailureChoice> {
    loop {
        print!("[r]etry, [s]kip, [q]uit? ");
        flush_stdout()?;

        let Some(line) = read_line()? else {
            println!();
            return Ok(FailureChoice::Quit);
        };
        match parse_failure_choice(&line) {
            Some(choice) => return Ok(choice),
            None => println!("Please answer r, s, or q."),
        }
    }
}

fn parse_confirmation(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

fn parse_step_choice(line: &str) -> Option<StepChoice> {
    match line.trim().to_lowercase().as_str() {
        "d" | "dispatch" => Some(StepChoice::Dispatch),
        "s" | "skip" => Some(StepChoice::Skip),
        "q" | "quit" => Some(StepChoice::Quit),
        _ => None,
    }
}

fn parse_failure_choice(line: &str) -> Option<FailureChoice> {
    match line.trim().to_lowercase().as_str() {
        "r" | "retry" => Some(FailureChoice::Retry),
        "s" | "skip" => Some(FailureChoice::Skip),
        "q" | "quit" => Some(FailureChoice::Quit),
        _ => None,
    }
}

/// One line from stdin, or `None` at EOF.
fn read_line() -> Result<Option<String>> {
    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| DialplanError::UserError(format!("failed to read from stdin: {}", e)))?;

    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

fn flush_stdout() -> Result<()> {
    io::stdout()
        .flush()
        .map_err(|e| DialplanError::UserError(format!("failed to flush stdout: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_accepts_yes_variants() {
        assert!(parse_confirmation("y"));
        assert!(parse_confirmation("Y\n"));
        assert!(parse_confirmation("  yes  "));
        assert!(parse_confirmation("YES"));
    }

    #[test]
    fn confirmation_defaults_to_no() {
        assert!(!parse_confirmation(""));
        assert!(!parse_confirmation("\n"));
        assert!(!parse_confirmation("n"));
        assert!(!parse_confirmation("no"));
        assert!(!parse_confirmation("yep"));
    }

    #[test]
    fn step_choice_parses_letters_and_words() {
        assert_eq!(parse_step_choice("d\n"), Some(StepChoice::Dispatch));
        assert_eq!(parse_step_choice("DISPATCH"), Some(StepChoice::Dispatch));
        assert_eq!(parse_step_choice(" s "), Some(StepChoice::Skip));
        assert_eq!(parse_step_choice("quit"), Some(StepChoice::Quit));
        assert_eq!(parse_step_choice("x"), None);
        assert_eq!(parse_step_choice(""), None);
    }

    #[test]
    fn failure_choice_parses_letters_and_words() {
        assert_eq!(parse_failure_choice("r"), Some(FailureChoice::Retry));
        assert_eq!(parse_failure_choice("Retry\n"), Some(FailureChoice::Retry));
        assert_eq!(parse_failure_choice("s"), Some(FailureChoice::Skip));
        assert_eq!(parse_failure_choice("q"), Some(FailureChoice::Quit));
        assert_eq!(parse_failure_choice("abort"), None);
    }
}

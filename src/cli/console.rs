//! Console input and output
//!
//! Menus talk to the user through the [`Console`] trait so the same session
//! code runs against the real terminal and against a scripted transcript.

use crate::types::BankError;
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

/// Line-oriented user interaction
pub trait Console {
    /// Show `prompt` and read one line, without its line terminator
    ///
    /// Returns `BankError::InputClosed` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<String, BankError>;

    /// Show `prompt` and read one line without echoing it
    fn read_password(&mut self, prompt: &str) -> Result<String, BankError>;

    /// Print one line of output
    fn say(&mut self, message: &str) -> Result<(), BankError>;
}

fn strip_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Standard input and output of the process
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        TerminalConsole
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String, BankError> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(BankError::InputClosed);
        }
        Ok(strip_terminator(line))
    }

    fn read_password(&mut self, prompt: &str) -> Result<String, BankError> {
        // Piped input has no terminal to disable echo on
        if !io::stdin().is_terminal() {
            return self.read_line(prompt);
        }
        rpassword::prompt_password(prompt).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => BankError::InputClosed,
            _ => e.into(),
        })
    }

    fn say(&mut self, message: &str) -> Result<(), BankError> {
        writeln!(io::stdout(), "{}", message)?;
        Ok(())
    }
}

/// Replays canned input and records everything shown
///
/// Prompts and output lines are appended to the transcript; typed input is
/// not, so passwords never appear in it.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    transcript: String,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: String::new(),
        }
    }

    /// Everything shown so far
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Inputs not yet consumed
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    fn next_input(&mut self, prompt: &str) -> Result<String, BankError> {
        self.transcript.push_str(prompt);
        let input = self.inputs.pop_front().ok_or(BankError::InputClosed)?;
        self.transcript.push('\n');
        Ok(input)
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String, BankError> {
        self.next_input(prompt)
    }

    fn read_password(&mut self, prompt: &str) -> Result<String, BankError> {
        self.next_input(prompt)
    }

    fn say(&mut self, message: &str) -> Result<(), BankError> {
        self.transcript.push_str(message);
        self.transcript.push('\n');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc\n", "abc")]
    #[case("abc\r\n", "abc")]
    #[case("abc", "abc")]
    #[case("  padded  \n", "  padded  ")]
    fn test_strip_terminator(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(strip_terminator(raw.to_string()), expected);
    }

    #[test]
    fn test_scripted_console_replays_inputs() {
        let mut console = ScriptedConsole::new(["first", "secret"]);

        assert_eq!(console.read_line("Name: ").unwrap(), "first");
        assert_eq!(console.read_password("Password: ").unwrap(), "secret");
        console.say("done").unwrap();

        assert_eq!(console.transcript(), "Name: \nPassword: \ndone\n");
        assert!(!console.transcript().contains("secret"));
        assert_eq!(console.remaining_inputs(), 0);
    }

    #[test]
    fn test_scripted_console_reports_closed_input() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        assert_eq!(console.read_line("Name: "), Err(BankError::InputClosed));
    }
}

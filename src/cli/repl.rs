//! Interactive prompt.
//!
//! Reads one command per line until `quit` or end of input. A bad command
//! prints a message and the prompt comes back; nothing ends the session
//! except the user.

use crate::cli::args::{ReplCommand, ReplLine};
use crate::cli::Dispatcher;
use crate::error::Result;
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const PROMPT: &str = "Command: ";

/// What the loop does after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Repl<R, W> {
    dispatcher: Dispatcher,
    input: R,
    output: W,
}

impl<R, W> Repl<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(dispatcher: Dispatcher, input: R, output: W) -> Self {
        Self {
            dispatcher,
            input,
            output,
        }
    }

    /// Prompt and respond until the user quits or input runs out
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Enter help for a list of commands")?;

        let mut line = String::new();
        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line).await? == 0 {
                // EOF (ctrl-d) behaves like quit
                writeln!(self.output)?;
                break;
            }

            if self.respond(&line).await? == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle one line of input
    ///
    /// Only failures writing to the terminal are returned; command errors are
    /// reported to the user.
    pub async fn respond(&mut self, line: &str) -> Result<Flow> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }

        match ReplLine::try_parse_from(tokens) {
            Ok(ReplLine {
                command: ReplCommand::Quit,
            }) => Ok(Flow::Quit),
            Ok(ReplLine {
                command: ReplCommand::Tracker(command),
            }) => {
                let command = command.with_titles_from(line);
                if let Err(e) = self.dispatcher.dispatch(command, &mut self.output).await {
                    writeln!(self.output, "{}", e.user_message())?;
                }
                Ok(Flow::Continue)
            }
            Err(e) => {
                // clap renders help, usage and parse errors alike
                write!(self.output, "{}", e.render())?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

//! Interactive editing session
//!
//! A line-oriented front end over the [`Workbench`]. Plain input lines
//! are appended to the script; lines starting with `:` are commands.
//! A failed command prints its error and the session carries on.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{Result, SidepyError};
use crate::render::Renderer;
use crate::syntax::StyledLine;
use crate::workbench::Workbench;

const HELP: &str = "\
Lines not starting with ':' are appended to the script.
  :list               show the script
  :set N TEXT         replace line N
  :insert N TEXT      insert TEXT before line N
  :delete N           delete line N
  :vars               show the variables
  :let NAME VALUE     set a variable
  :add                add the next variable
  :remove             remove the last variable
  :run                run the script
  :output             show the output log
  :clear              clear the output log
  :help               show this help
  :quit               leave the session
";

/// What the session does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Continue,
    Quit,
}

/// Print the highlighted script
pub fn print_script<W: Write>(bench: &mut Workbench, renderer: &Renderer, out: &mut W) -> Result<()> {
    let styled = bench.highlighted_lines();
    let pairs: Vec<(&str, &StyledLine)> = bench
        .lines()
        .iter()
        .map(String::as_str)
        .zip(styled.iter())
        .collect();
    renderer.render_document(out, &pairs)
}

/// Print every entry of the output log
pub fn print_output<W: Write>(bench: &Workbench, out: &mut W) -> Result<()> {
    for entry in bench.output() {
        write!(out, "{}", entry)?;
        if !entry.ends_with('\n') {
            writeln!(out)?;
        }
    }
    Ok(())
}

/// 1-based line number from user input
fn parse_line_number(arg: &str) -> Result<usize> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(SidepyError::Usage(format!("bad line number '{}'", arg))),
    }
}

/// Split `N TEXT` into the line index and the (possibly empty) text
fn split_numbered(args: &str) -> Result<(usize, &str)> {
    let (number, text) = args.split_once(' ').unwrap_or((args, ""));
    Ok((parse_line_number(number)?, text))
}

pub struct Session {
    bench: Workbench,
    renderer: Renderer,
}

impl Session {
    pub fn new(bench: Workbench, renderer: Renderer) -> Self {
        Self { bench, renderer }
    }

    #[cfg(test)]
    pub fn workbench(&self) -> &Workbench {
        &self.bench
    }

    /// Handle one input line
    pub fn handle<W: Write>(&mut self, input: &str, out: &mut W) -> Result<SessionStatus> {
        let Some(command) = input.strip_prefix(':') else {
            self.append_line(input);
            return Ok(SessionStatus::Continue);
        };

        let (name, args) = command.split_once(' ').unwrap_or((command, ""));
        debug!(command = name, "session command");
        match name {
            "list" | "l" => print_script(&mut self.bench, &self.renderer, out)?,
            "set" => {
                let (idx, text) = split_numbered(args)?;
                self.bench.edit_line(idx, text)?;
            }
            "insert" => {
                let (idx, text) = split_numbered(args)?;
                self.bench.insert_line(idx, text);
            }
            "delete" => {
                let idx = parse_line_number(args.trim())?;
                let removed = self.bench.remove_line(idx)?;
                writeln!(out, "deleted: {}", removed)?;
            }
            "vars" => {
                for var in self.bench.variables().iter() {
                    writeln!(out, "{} = {}", var.name, var.text)?;
                }
            }
            "let" => {
                let (var, value) = args.split_once(' ').unwrap_or((args, ""));
                let index = self
                    .bench
                    .variables()
                    .names()
                    .iter()
                    .position(|name| *name == var)
                    .ok_or_else(|| SidepyError::Usage(format!("no variable '{}'", var)))?;
                self.bench.variables_mut().set_text(index, value.trim())?;
            }
            "add" => {
                let added = self.bench.variables_mut().add()?;
                writeln!(out, "added {}", added.name)?;
            }
            "remove" => {
                let removed = self.bench.variables_mut().remove_last()?;
                writeln!(out, "removed {}", removed.name)?;
            }
            "run" | "r" => {
                // The failure is already in the output log
                if let Err(e) = self.bench.run() {
                    debug!(error = %e, "run failed");
                }
                print_output(&self.bench, out)?;
            }
            "output" => print_output(&self.bench, out)?,
            "clear" => self.bench.clear_output(),
            "help" | "h" => write!(out, "{}", HELP)?,
            "quit" | "q" => return Ok(SessionStatus::Quit),
            other => {
                return Err(SidepyError::Usage(format!(
                    "unknown command ':{}' (try :help)",
                    other
                )))
            }
        }
        Ok(SessionStatus::Continue)
    }

    /// Append to the script; a blank script is replaced instead
    fn append_line(&mut self, text: &str) {
        if self.bench.code().is_empty() {
            self.bench.set_code(text);
        } else {
            let end = self.bench.lines().len();
            self.bench.insert_line(end, text);
        }
    }

    /// Read commands until `:quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, prompt: bool) -> Result<()> {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        for line in input.lines() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            match self.handle(line, out) {
                Ok(SessionStatus::Quit) => return Ok(()),
                Ok(SessionStatus::Continue) => {}
                Err(SidepyError::Io(e)) => return Err(e.into()),
                Err(e) => writeln!(out, "error: {}", e)?,
            }
            if prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
        }
        Ok(())
    }
}

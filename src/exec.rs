//! Script execution
//!
//! Scripts run in an external Python interpreter. The bindings become
//! globals, stdout is captured, and an uncaught exception comes back
//! as its class name and message.

use std::io::{self, Write};
use std::process::{Command, Output, Stdio};

use tracing::{debug, warn};

use crate::error::{Result, SidepyError};
use crate::variables::Binding;

/// Default interpreter command
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Separates the driver's error report from anything else on stderr
const ERROR_MARKER: &str = "\x1esidepy-error\x1e";
const FIELD_SEPARATOR: char = '\x1f';

/// Reads the script from stdin, binds `name=value` arguments as
/// floats and runs the script with those globals and empty locals.
const DRIVER: &str = r#"import sys
_source = sys.stdin.read()
_globals = {}
for _arg in sys.argv[1:]:
    _name, _, _value = _arg.partition("=")
    _globals[_name] = float(_value)
try:
    exec(compile(_source, "<script>", "exec"), _globals, {})
except BaseException as _exc:
    sys.stdout.flush()
    sys.stderr.write("\n\x1esidepy-error\x1e" + type(_exc).__name__ + "\x1f" + str(_exc))
    sys.stderr.flush()
    sys.exit(1)
"#;

/// Something that can run a script against a set of bindings
pub trait Executor {
    /// Run `source` and return its captured stdout
    fn execute(&self, source: &str, bindings: &[Binding]) -> Result<String>;
}

/// Runs scripts with a Python interpreter subprocess
#[derive(Debug, Clone)]
pub struct PythonExecutor {
    interpreter: String,
}

impl PythonExecutor {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

impl Default for PythonExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER)
    }
}

impl Executor for PythonExecutor {
    fn execute(&self, source: &str, bindings: &[Binding]) -> Result<String> {
        debug!(
            interpreter = %self.interpreter,
            bindings = bindings.len(),
            bytes = source.len(),
            "running script"
        );

        let mut child = Command::new(&self.interpreter)
            .arg("-c")
            .arg(DRIVER)
            .args(bindings.iter().map(|b| format!("{}={}", b.name, b.value)))
            .env("PYTHONIOENCODING", "utf-8")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Dropping stdin after the write closes the pipe
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(source.as_bytes()),
            None => Ok(()),
        };

        // Reap the child even when the write failed
        let output = child.wait_with_output()?;
        finish(output, written)
    }
}

/// Turn a finished child into the script result
///
/// A failed exit wins over a failed stdin write: a child that died
/// early breaks the pipe, and its stderr says why.
fn finish(output: Output, written: io::Result<()>) -> Result<String> {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);

    if output.status.success() {
        if let Err(e) = written {
            warn!(error = %e, "interpreter exited before reading the script");
            return Err(e.into());
        }
        debug!(bytes = stdout.len(), "script finished");
        return Ok(stdout);
    }

    let err = parse_error_report(&stderr).unwrap_or_else(|| SidepyError::Execution {
        kind: "InterpreterError".to_string(),
        message: match output.status.code() {
            Some(code) if stderr.trim().is_empty() => format!("exited with status {}", code),
            _ => stderr.trim().to_string(),
        },
    });
    warn!(error = %err, "script failed");
    Err(err)
}

/// Extract the driver's exception report from stderr
fn parse_error_report(stderr: &str) -> Option<SidepyError> {
    let (_, report) = stderr.rsplit_once(ERROR_MARKER)?;
    let (kind, message) = report.split_once(FIELD_SEPARATOR)?;
    Some(SidepyError::Execution {
        kind: kind.to_string(),
        message: message.to_string(),
    })
}

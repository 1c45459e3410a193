//! The workbench: script, variables and output in one place
//!
//! This is the controller behind the front end. It owns the script
//! buffer and keeps its highlight cache in step with edits, holds the
//! input variables, and runs the script through an [`Executor`].

use tracing::{debug, info};

use crate::error::{Result, SidepyError};
use crate::exec::Executor;
use crate::syntax::{HighlightCache, Highlighter, StyledLine};
use crate::variables::VariableSet;

/// Shown when a run succeeds without printing anything
pub const NO_OUTPUT_MESSAGE: &str = "executed successfully (no output)";

/// Script loaded by [`Workbench::with_example`]
pub const EXAMPLE_SCRIPT: &str = r#"# Variables arrive as floats
# Arithmetic works as usual
result = x * 2 + y
print(f"result: {result}")

# Conditions
if result > 10:
    print("result is greater than 10")
else:
    print("result is at most 10")

# Loops
for i in range(3):
    print(f"iteration {i+1}: {result * (i+1)}")
"#;

pub struct Workbench {
    lines: Vec<String>,
    cache: HighlightCache,
    highlighter: Highlighter,
    variables: VariableSet,
    output: Vec<String>,
    executor: Box<dyn Executor>,
}

impl Workbench {
    pub fn new(highlighter: Highlighter, executor: Box<dyn Executor>) -> Self {
        Self {
            lines: vec![String::new()],
            cache: HighlightCache::new(),
            highlighter,
            variables: VariableSet::new(),
            output: Vec::new(),
            executor,
        }
    }

    /// A workbench preloaded with the example script and `x = 5`
    pub fn with_example(highlighter: Highlighter, executor: Box<dyn Executor>) -> Self {
        let mut bench = Self::new(highlighter, executor);
        bench.set_code(EXAMPLE_SCRIPT);
        bench.variables = VariableSet::with_values(&["5"]);
        bench
    }

    /// The script as one string
    pub fn code(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the whole script
    ///
    /// Lines whose text is unchanged keep their cached highlighting.
    pub fn set_code(&mut self, text: &str) {
        let new_lines: Vec<String> = text.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect();

        let mut changed = 0;
        for (idx, line) in new_lines.iter().enumerate() {
            if self.lines.get(idx) != Some(line) {
                self.cache.invalidate_line(idx);
                changed += 1;
            }
        }
        self.cache.truncate(new_lines.len());
        debug!(lines = new_lines.len(), changed, "script replaced");

        self.lines = new_lines;
    }

    /// Replace one line of the script
    pub fn edit_line(&mut self, idx: usize, text: &str) -> Result<()> {
        let line = self
            .lines
            .get_mut(idx)
            .ok_or_else(|| SidepyError::Usage(format!("no line {}", idx + 1)))?;
        *line = text.to_string();
        self.cache.invalidate_line(idx);
        Ok(())
    }

    /// Insert a new line before `idx` (or at the end)
    pub fn insert_line(&mut self, idx: usize, text: &str) {
        let idx = idx.min(self.lines.len());
        self.lines.insert(idx, text.to_string());
        self.cache.insert_lines(idx, 1);
    }

    /// Remove one line; the buffer always keeps at least one line
    pub fn remove_line(&mut self, idx: usize) -> Result<String> {
        if idx >= self.lines.len() {
            return Err(SidepyError::Usage(format!("no line {}", idx + 1)));
        }
        let removed = self.lines.remove(idx);
        self.cache.remove_lines(idx, 1);
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        Ok(removed)
    }

    /// Styled line `idx`, computed on demand
    pub fn highlighted_line(&mut self, idx: usize) -> Option<&StyledLine> {
        let text = self.lines.get(idx)?;
        Some(self.cache.highlight_line(&self.highlighter, idx, text))
    }

    /// Styled lines of the whole script
    pub fn highlighted_lines(&mut self) -> Vec<StyledLine> {
        (0..self.lines.len())
            .filter_map(|idx| self.highlighted_line(idx).cloned())
            .collect()
    }

    #[cfg(test)]
    pub fn cache(&self) -> &HighlightCache {
        &self.cache
    }

    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableSet {
        &mut self.variables
    }

    /// Output log, one entry per message
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Run the script against the current variables
    ///
    /// The outcome is also appended to the output log.
    pub fn run(&mut self) -> Result<String> {
        let code = self.code();
        if code.trim().is_empty() {
            self.output.push(format!("error: {}", SidepyError::EmptyScript));
            return Err(SidepyError::EmptyScript);
        }

        self.output.clear();

        let bindings = match self.variables.bindings() {
            Ok(bindings) => bindings,
            Err(e) => {
                self.output.push(format!("error: {}", e));
                return Err(e);
            }
        };

        info!(variables = bindings.len(), "running script");
        match self.executor.execute(&code, &bindings) {
            Ok(stdout) => {
                if stdout.is_empty() {
                    self.output.push(NO_OUTPUT_MESSAGE.to_string());
                } else {
                    self.output.push(stdout.clone());
                }
                Ok(stdout)
            }
            Err(e) => {
                self.output.push(format!("error: {}", e));
                Err(e)
            }
        }
    }
}

//! Input variables bound into scripts
//!
//! The fields are ordered and named `x`, `y`, `z`, then `a`, `b`,
//! `c` and so on. There is always at least one field.

use crate::error::{Result, SidepyError};

/// Largest number of fields with distinct names (x, y, z, a..=w)
pub const MAX_VARIABLES: usize = 26;

/// Name of the field at `index`
pub fn variable_name(index: usize) -> Option<char> {
    match index {
        0 => Some('x'),
        1 => Some('y'),
        2 => Some('z'),
        n if n < MAX_VARIABLES => char::from_u32('a' as u32 + (n - 3) as u32),
        _ => None,
    }
}

/// One input field: a name and the text typed into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub text: String,
}

/// A name bound to a parsed value
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub value: f64,
}

/// The ordered list of input fields
#[derive(Debug, Clone)]
pub struct VariableSet {
    vars: Vec<Variable>,
}

impl VariableSet {
    /// A set with the single field `x`
    pub fn new() -> Self {
        let mut set = Self { vars: Vec::new() };
        set.push_next();
        set
    }

    /// A set holding one field per value
    ///
    /// Values past the last distinct name are dropped.
    pub fn with_values<S: AsRef<str>>(values: &[S]) -> Self {
        let mut set = Self::new();
        for (index, value) in values.iter().take(MAX_VARIABLES).enumerate() {
            if index > 0 {
                set.push_next();
            }
            set.vars[index].text = value.as_ref().to_string();
        }
        set
    }

    fn push_next(&mut self) -> Option<&Variable> {
        let name = variable_name(self.vars.len())?;
        self.vars.push(Variable {
            name: name.to_string(),
            text: String::new(),
        });
        self.vars.last()
    }

    /// Append a field with the next name
    pub fn add(&mut self) -> Result<&Variable> {
        self.push_next().ok_or(SidepyError::TooManyVariables)
    }

    /// Remove the last field; the only field is never removed
    pub fn remove_last(&mut self) -> Result<Variable> {
        if self.vars.len() <= 1 {
            return Err(SidepyError::LastVariable);
        }
        self.vars.pop().ok_or(SidepyError::LastVariable)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter()
    }

    /// Names in order
    pub fn names(&self) -> Vec<&str> {
        self.vars.iter().map(|v| v.name.as_str()).collect()
    }

    /// Set the text of the field at `index`
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let len = self.vars.len();
        let var = self
            .vars
            .get_mut(index)
            .ok_or_else(|| SidepyError::Usage(format!("no variable #{} (have {})", index, len)))?;
        var.text = text.into();
        Ok(())
    }

    /// Fill fields from a list of values, adding fields as needed
    pub fn fill<S: AsRef<str>>(&mut self, values: &[S]) -> Result<()> {
        while self.vars.len() < values.len() {
            self.add()?;
        }
        for (index, value) in values.iter().enumerate() {
            self.set_text(index, value.as_ref())?;
        }
        Ok(())
    }

    /// Parse every field into a binding
    ///
    /// Blank fields bind 0.0. The first field that is not a number
    /// fails the whole parse, naming the variable.
    pub fn bindings(&self) -> Result<Vec<Binding>> {
        self.vars
            .iter()
            .map(|var| {
                let text = var.text.trim();
                let value = if text.is_empty() {
                    0.0
                } else {
                    parse_number(text).ok_or_else(|| SidepyError::InvalidBinding {
                        name: var.name.clone(),
                        value: text.to_string(),
                    })?
                };
                Ok(Binding {
                    name: var.name.clone(),
                    value,
                })
            })
            .collect()
    }
}

/// Parse a field the way Python's `float()` reads it
///
/// Single underscores between digits group them (`1_000`). Only
/// ASCII digits are accepted.
fn parse_number(text: &str) -> Option<f64> {
    if !text.contains('_') {
        return text.parse().ok();
    }

    let bytes = text.as_bytes();
    let grouped = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && matches!(bytes.get(i + 1), Some(next) if next.is_ascii_digit()))
    });
    if !grouped {
        return None;
    }
    text.replace('_', "").parse().ok()
}

impl Default for VariableSet {
    fn default() -> Self {
        Self::new()
    }
}

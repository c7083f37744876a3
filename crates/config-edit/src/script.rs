//! Edit scripts.
//!
//! A script is the ordered list of `path: value` edits a mod ships for one
//! config. Each line is split on its single `:`; the value loses its leading
//! spaces and keeps everything else, including the operator suffix.

use thiserror::Error;

use crate::diagnostics::{Channel, Diagnostic, DiagnosticSink, ATTEMPTS_TO_EDIT};
use crate::error::EditFault;
use crate::session::{EditOutcome, EditSpec, Session};
use crate::value::Value;

/// Separator between path and value in a script line.
pub const PATH_VALUE_SEPARATOR: char = ':';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("edit has invalid number of separators | line: {line} | {text}")]
    InvalidSeparators { line: usize, text: String },
}

/// One `path: value` edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditStep {
    /// 1-based line number in the script.
    pub line: usize,
    pub path: String,
    pub value: String,
}

impl EditStep {
    /// Parses one script line. Lines with an empty path yield `None`.
    ///
    /// ```
    /// use config_edit::script::EditStep;
    ///
    /// let step = EditStep::parse(1, "stats.hp:  12").unwrap().unwrap();
    /// assert_eq!(step.path, "stats.hp");
    /// assert_eq!(step.value, "12");
    /// assert!(EditStep::parse(2, "a: b: c").is_err());
    /// ```
    pub fn parse(line: usize, text: &str) -> Result<Option<Self>, ScriptError> {
        let mut parts = text.split(PATH_VALUE_SEPARATOR);
        let (Some(path), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ScriptError::InvalidSeparators {
                line,
                text: text.to_string(),
            });
        };
        if path.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            line,
            path: path.to_string(),
            value: value.trim_start_matches(' ').to_string(),
        }))
    }
}

/// Ordered edits for one config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    /// The script asks for the whole config to be removed, which is never
    /// allowed.
    pub removed: bool,
    pub steps: Vec<EditStep>,
}

impl EditScript {
    /// Parses script lines, collecting malformed lines as errors and
    /// skipping them.
    pub fn parse<I, S>(lines: I) -> (Self, Vec<ScriptError>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut script = Self::default();
        let mut errors = Vec::new();
        for (i, line) in lines.into_iter().enumerate() {
            match EditStep::parse(i + 1, line.as_ref()) {
                Ok(Some(step)) => script.steps.push(step),
                Ok(None) => {}
                Err(err) => errors.push(err),
            }
        }
        (script, errors)
    }

    /// Parses a newline-separated script, ignoring blank lines.
    pub fn parse_str(text: &str) -> (Self, Vec<ScriptError>) {
        let mut script = Self::default();
        let mut errors = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match EditStep::parse(i + 1, line) {
                Ok(Some(step)) => script.steps.push(step),
                Ok(None) => {}
                Err(err) => errors.push(err),
            }
        }
        (script, errors)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Result of applying a script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptReport {
    /// Set when the whole script was refused.
    pub rejected: Option<EditFault>,
    /// One outcome per step, in order.
    pub outcomes: Vec<EditOutcome>,
}

impl ScriptReport {
    pub fn faults(&self) -> impl Iterator<Item = &EditFault> {
        self.rejected
            .iter()
            .chain(self.outcomes.iter().filter_map(EditOutcome::fault))
    }

    pub fn fault_count(&self) -> usize {
        self.faults().count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EditOutcome::Skipped))
            .count()
    }

    pub fn mutated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.mutated()).count()
    }
}

impl<S: DiagnosticSink> Session<S> {
    /// Applies every step of `script` to `root` in order.
    ///
    /// `base` supplies the type, file key and mod identity; its path and
    /// value are replaced by each step's.
    pub fn apply_script(&mut self, script: &EditScript, base: &EditSpec, root: &mut Value) -> ScriptReport {
        if script.removed {
            let fault = EditFault::RemovedConfig {
                key: base.file_key.clone(),
                type_name: base.type_name.clone(),
            };
            self.report(Diagnostic::for_edit(
                Channel::Fault,
                base,
                ATTEMPTS_TO_EDIT,
                base.field_path.as_str(),
                fault.to_string(),
            ));
            return ScriptReport {
                rejected: Some(fault),
                outcomes: Vec::new(),
            };
        }

        let total = script.len();
        let mut outcomes = Vec::with_capacity(total);
        for (i, step) in script.steps.iter().enumerate() {
            log::debug!(
                "Mod {} ({}) applying edit {} of {} to config {} (line {})",
                base.mod_index,
                base.mod_id,
                i + 1,
                total,
                base.file_key,
                step.line
            );
            let spec = EditSpec {
                field_path: step.path.clone(),
                value_raw: step.value.clone(),
                ..base.clone()
            };
            outcomes.push(self.process_field_edit(&spec, root));
        }
        ScriptReport {
            rejected: None,
            outcomes,
        }
    }
}

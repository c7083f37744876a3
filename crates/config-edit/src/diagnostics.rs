//! Diagnostic records and sinks.
//!
//! Every edit reports through a [`DiagnosticSink`] on one of three channels:
//! faults, successful mutations, and context bookkeeping. The session only
//! emits on channels enabled in its [`Settings`](crate::settings::Settings).

use std::fmt;

use crate::session::EditSpec;

/// Verb of diagnostics reporting a mutation.
pub const EDITS: &str = "edits";

/// Verb of diagnostics reporting a fault, no-op or skipped edit.
pub const ATTEMPTS_TO_EDIT: &str = "attempts to edit";

/// Channel a diagnostic is reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Fault,
    Info,
    Context,
}

/// The path segment an edit was working on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInfo {
    pub segment: String,
    /// 1-based, counting segments contributed by a resolved context.
    pub position: usize,
    pub count: usize,
}

/// One structured report about an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub channel: Channel,
    pub mod_index: usize,
    pub mod_id: String,
    /// [`EDITS`] for mutations, [`ATTEMPTS_TO_EDIT`] for everything else.
    pub verb: &'static str,
    pub file_key: String,
    pub type_name: String,
    /// Field path with any context reference expanded.
    pub field_path: String,
    pub step: Option<StepInfo>,
    pub detail: String,
}

impl Diagnostic {
    pub(crate) fn for_edit(
        channel: Channel,
        spec: &EditSpec,
        verb: &'static str,
        field_path: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            channel,
            mod_index: spec.mod_index,
            mod_id: spec.mod_id.clone(),
            verb,
            file_key: spec.file_key.clone(),
            type_name: spec.type_name.clone(),
            field_path: field_path.into(),
            step: None,
            detail: detail.into(),
        }
    }

    pub(crate) fn with_step(mut self, step: Option<StepInfo>) -> Self {
        self.step = step;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mod {} ({}) {} config {} of type {}, field {} | {}",
            self.mod_index,
            self.mod_id,
            self.verb,
            self.file_key,
            self.type_name,
            self.field_path,
            self.detail
        )?;
        if let Some(step) = &self.step {
            write!(
                f,
                " | segment {} (step {} of {})",
                step.segment, step.position, step.count
            )?;
        }
        Ok(())
    }
}

/// Receiver for edit diagnostics.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: &Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// Forwards diagnostics to the `log` facade: faults at `warn`, mutations at
/// `info`, context bookkeeping at `trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.channel {
            Channel::Fault => log::warn!("{diagnostic}"),
            Channel::Info => log::info!("{diagnostic}"),
            Channel::Context => log::trace!("{diagnostic}"),
        }
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    diagnostics: Vec<Diagnostic>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn on(&self, channel: Channel) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.channel == channel)
    }

    pub fn faults(&self) -> Vec<&Diagnostic> {
        self.on(Channel::Fault).collect()
    }

    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}

//! Edit sessions.
//!
//! A [`Session`] owns everything that survives from one edit to the next:
//! the context stack, the key of the file being edited and the fault latch.
//! Edits of one file must be fed to the same session in script order.

use std::sync::Arc;

use crate::context::ContextStack;
use crate::diagnostics::{Channel, Diagnostic, DiagnosticSink, LogSink, ATTEMPTS_TO_EDIT};
use crate::error::EditFault;
use crate::schema::TagRegistry;
use crate::settings::Settings;
use crate::value::Value;
use crate::walk::{EditState, Editor};

/// One edit request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSpec {
    /// Name of the config type the root object belongs to.
    pub type_name: String,
    /// Identity of the config file being edited.
    pub file_key: String,
    pub field_path: String,
    /// Value text including any operator suffix.
    pub value_raw: String,
    pub mod_index: usize,
    pub mod_id: String,
}

impl EditSpec {
    pub fn new(
        type_name: impl Into<String>,
        file_key: impl Into<String>,
        field_path: impl Into<String>,
        value_raw: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            file_key: file_key.into(),
            field_path: field_path.into(),
            value_raw: value_raw.into(),
            ..Self::default()
        }
    }

    /// Sets the identity of the mod the edit comes from.
    pub fn from_mod(mut self, mod_index: usize, mod_id: impl Into<String>) -> Self {
        self.mod_index = mod_index;
        self.mod_id = mod_id.into();
        self
    }
}

/// What an edit did.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Empty path or value; nothing was attempted.
    Ignored,
    /// Suppressed because an earlier edit of the same file faulted.
    Skipped,
    /// The target slot was written.
    Applied,
    /// An entry was inserted and awaits a follow-up edit to fill it.
    Incomplete,
    /// An element or entry was removed.
    Removed,
    /// The request was already satisfied; nothing changed.
    NoOp,
    /// The target was remembered as a context.
    ContextSet,
    Faulted(EditFault),
}

impl EditOutcome {
    pub fn is_fault(&self) -> bool {
        matches!(self, EditOutcome::Faulted(_))
    }

    pub fn fault(&self) -> Option<&EditFault> {
        match self {
            EditOutcome::Faulted(fault) => Some(fault),
            _ => None,
        }
    }

    /// True if the object graph was changed.
    pub fn mutated(&self) -> bool {
        matches!(
            self,
            EditOutcome::Applied | EditOutcome::Incomplete | EditOutcome::Removed
        )
    }
}

/// Identity of the file an edit targets.
///
/// A blank file key falls back to the address of the root object, so edits
/// of different unnamed objects never share contexts or the fault latch.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FileIdentity {
    Key(String),
    Object(usize),
}

impl FileIdentity {
    fn of(spec: &EditSpec, root: &Value) -> Self {
        if spec.file_key.is_empty() {
            FileIdentity::Object(root as *const Value as usize)
        } else {
            FileIdentity::Key(spec.file_key.clone())
        }
    }
}

/// Caller-owned edit state shared by consecutive edits.
#[derive(Debug)]
pub struct Session<S = LogSink> {
    settings: Settings,
    tags: Arc<TagRegistry>,
    sink: S,
    contexts: ContextStack,
    last_file: Option<FileIdentity>,
    faulted: bool,
    last_state: Option<EditState>,
}

impl Session<LogSink> {
    pub fn new(settings: Settings, tags: Arc<TagRegistry>) -> Self {
        Self::with_sink(settings, tags, LogSink)
    }
}

impl<S: DiagnosticSink> Session<S> {
    pub fn with_sink(settings: Settings, tags: Arc<TagRegistry>, sink: S) -> Self {
        log::debug!("config edit settings | {}", settings.summary());
        if settings.log_tag_map {
            log::info!("type tags ({}):\n{}", tags.len(), tags.describe());
        }
        Self {
            settings,
            tags,
            sink,
            contexts: ContextStack::new(),
            last_file: None,
            faulted: false,
            last_state: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn contexts(&self) -> &ContextStack {
        &self.contexts
    }

    /// Key of the file the previous edit targeted; `None` before the first
    /// edit and after edits with a blank key.
    pub fn last_key(&self) -> Option<&str> {
        match &self.last_file {
            Some(FileIdentity::Key(key)) => Some(key),
            _ => None,
        }
    }

    /// True while edits to the current file are latched off.
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Cursor state the most recent attempted edit finished with.
    pub fn last_state(&self) -> Option<&EditState> {
        self.last_state.as_ref()
    }

    /// Forgets the current file, its contexts and its fault latch.
    pub fn reset(&mut self) {
        self.contexts.clear();
        self.last_file = None;
        self.faulted = false;
        self.last_state = None;
    }

    /// Applies one edit to `root`.
    ///
    /// A change of file clears the context stack and the fault latch; with
    /// latching on, edits after a fault in the same file are skipped. Edits
    /// with an empty path or value are then ignored.
    ///
    /// The file is `spec.file_key`, or the identity of `root` when the key is
    /// blank. [`ConfigRegistry::resolve_spec`](crate::ConfigRegistry::resolve_spec)
    /// fills in the key of a registered config.
    pub fn process_field_edit(&mut self, spec: &EditSpec, root: &mut Value) -> EditOutcome {
        let file = FileIdentity::of(spec, root);
        if self.last_file.as_ref() != Some(&file) {
            if !self.contexts.is_empty() {
                let discarded = self.contexts.len();
                self.contexts.clear();
                self.report(Diagnostic::for_edit(
                    Channel::Context,
                    spec,
                    ATTEMPTS_TO_EDIT,
                    spec.field_path.as_str(),
                    format!("new file, discarded {discarded} contexts"),
                ));
            }
            self.last_file = Some(file);
            self.faulted = false;
        } else if self.faulted && self.settings.latch_faults {
            self.report(Diagnostic::for_edit(
                Channel::Info,
                spec,
                ATTEMPTS_TO_EDIT,
                spec.field_path.as_str(),
                "skipped, an earlier edit to this file faulted",
            ));
            return EditOutcome::Skipped;
        }

        if spec.field_path.is_empty() || spec.value_raw.is_empty() {
            return EditOutcome::Ignored;
        }

        let mut editor = Editor::new(
            spec,
            &self.settings,
            &self.tags,
            &mut self.contexts,
            &mut self.sink,
        );
        let outcome = editor.run(root);
        self.last_state = Some(editor.into_state());
        self.faulted = outcome.is_fault();
        outcome
    }

    /// Emits a diagnostic if its channel is enabled.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        if self.settings.channel_enabled(diagnostic.channel) {
            self.sink.emit(&diagnostic);
        }
    }
}

//! The editing engine.
//!
//! [`Editor`] ties a [`Host`] surface to a [`DocumentStore`]:
//! - input events become store edits ([`Editor::handle`])
//! - control commands query or drive the editor ([`Editor::dispatch`])
//! - every text change is compiled and mounted by the [`RenderDriver`],
//!   which puts the caret back at the stored logical position

mod commands;
mod composition;
mod events;
mod history;
mod input;
mod options;
mod render;
mod store;

pub use commands::{Command, CommandOutput};
pub use composition::{CompositionState, CompositionStrategy, LeadingCaret, TrailingCaret, strategy_for};
pub use events::{Dispatch, EventKind, HookOutcome, InputEvent, Key, KeyInput, Modifiers};
pub use history::{HistoryEntry, HistoryStack};
pub use options::EditorOptions;
pub use render::RenderDriver;
pub use store::{DocumentStore, EditError, UpdateListener};

use std::collections::HashMap;
use std::fmt;

use crate::document::{Compiler, MarkdownCompiler};
use crate::host::Host;
use crate::offset::{self, TextOffset};
use crate::selection;

type Hook = Box<dyn FnMut(&InputEvent) -> HookOutcome>;

/// A markdown editor driving one host surface.
pub struct Editor<H: Host> {
    host: H,
    store: DocumentStore,
    compiler: Box<dyn MarkdownCompiler>,
    driver: RenderDriver,
    composition: CompositionState,
    strategy: Box<dyn CompositionStrategy>,
    hooks: HashMap<EventKind, Hook>,
    drag_text: Option<String>,
    rendered_revision: u64,
}

impl<H: Host + fmt::Debug> fmt::Debug for Editor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("host", &self.host)
            .field("store", &self.store)
            .field("driver", &self.driver)
            .field("composition", &self.composition)
            .field("strategy", &self.strategy)
            .field("hooks", &self.hooks.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<H: Host> Editor<H> {
    /// Create an editor and render its initial text onto `host`.
    pub fn new(host: H, options: EditorOptions) -> Self {
        let EditorOptions {
            default_value,
            value,
            on_update,
            components,
            compiler,
            render_mode,
            engine,
            scroll_margin,
        } = options;
        let mut store = value.map_or_else(
            || DocumentStore::new(&default_value),
            |value| DocumentStore::controlled(&value),
        );
        if let Some(listener) = on_update {
            store.set_listener(listener);
        }
        let compiler = compiler.unwrap_or_else(|| Box::new(Compiler::new(components)));
        let mut editor = Self {
            host,
            store,
            compiler,
            driver: RenderDriver::new(render_mode, scroll_margin),
            composition: CompositionState::default(),
            strategy: strategy_for(engine),
            hooks: HashMap::new(),
            drag_text: None,
            rendered_revision: 0,
        };
        editor.render_now();
        editor
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access for host-native behaviour (caret keys, pointer, IME text).
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub const fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn text(&self) -> String {
        self.store.text()
    }

    /// Stored logical caret position.
    pub const fn position(&self) -> usize {
        self.store.position()
    }

    pub const fn composition(&self) -> &CompositionState {
        &self.composition
    }

    pub const fn is_composing(&self) -> bool {
        self.composition.active
    }

    /// Text of the last drag that started on the surface.
    pub fn drag_text(&self) -> Option<&str> {
        self.drag_text.as_deref()
    }

    pub const fn render_driver(&self) -> &RenderDriver {
        &self.driver
    }

    pub const fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    pub const fn mark_saved(&mut self) {
        self.store.mark_clean();
    }

    /// Run `hook` before the editor handles events of `kind`.
    pub fn set_hook(&mut self, kind: EventKind, hook: impl FnMut(&InputEvent) -> HookOutcome + 'static) {
        self.hooks.insert(kind, Box::new(hook));
    }

    pub fn clear_hook(&mut self, kind: EventKind) {
        self.hooks.remove(&kind);
    }

    /// Feed the caller-owned text of a controlled editor.
    pub fn set_value_prop(&mut self, value: &str) {
        self.store.sync_controlled(value);
        self.after_change();
    }

    /// Run a control command.
    pub fn dispatch(&mut self, command: Command) -> CommandOutput {
        let output = match command {
            Command::GetPosition => {
                let (start, end) = selection::get_position(&self.host);
                CommandOutput::Position { start, end }
            }
            Command::GetLine => {
                let (start, _) = selection::get_position(&self.host);
                let (line, column) = self.store.line_col(start);
                CommandOutput::Line { line, column }
            }
            Command::GetScrollLine => self.host.scroll_anchor().map_or(
                CommandOutput::Line { line: 0, column: 0 },
                |anchor| {
                    let tree = self.host.tree();
                    let offset = offset::node_to_offset(tree, tree.root(), anchor);
                    let (line, column) = self.store.line_col(offset);
                    CommandOutput::Line { line, column }
                },
            ),
            Command::SetPosition { start, end } => {
                selection::set_position(&mut self.host, start, end);
                CommandOutput::Done
            }
            Command::SetFocus => {
                self.host.focus();
                CommandOutput::Done
            }
            Command::SetValue { value } => {
                let position = self.store.position();
                self.store.push_text(&value);
                self.store.set_position(position);
                CommandOutput::Done
            }
            Command::Update { start, end, value } => {
                let selection = selection::get_position(&self.host);
                self.store
                    .insert_text(value.as_deref().unwrap_or_default(), start, end, selection);
                CommandOutput::Done
            }
            Command::Undo => {
                if self.store.undo() {
                    CommandOutput::Done
                } else {
                    CommandOutput::Ignored
                }
            }
            Command::Redo => {
                if self.store.redo() {
                    CommandOutput::Done
                } else {
                    CommandOutput::Ignored
                }
            }
        };
        self.after_change();
        output
    }

    /// Run a deferred render if one is waiting. Returns whether it rendered.
    pub fn poll_render(&mut self) -> bool {
        if self.driver.is_pending() {
            self.render_now();
            true
        } else {
            false
        }
    }

    fn after_change(&mut self) {
        if self.store.revision() == self.rendered_revision {
            return;
        }
        self.rendered_revision = self.store.revision();
        if self.driver.request() {
            self.render_now();
        }
    }

    fn render_now(&mut self) {
        self.rendered_revision = self.store.revision();
        self.driver
            .commit(&mut self.host, self.compiler.as_ref(), &self.store);
    }

    fn selection(&self) -> (usize, usize) {
        selection::get_position(&self.host)
    }

    fn insert(&mut self, text: &str) {
        let selection = self.selection();
        self.store.insert_text(text, None, None, selection);
    }

    fn caret_to_end(&mut self) {
        selection::set_position(&mut self.host, TextOffset::End, None);
    }
}

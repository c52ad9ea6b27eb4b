// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorOptions)
    clippy::module_name_repetitions
)]

//! # Markedit
//!
//! A markdown editing engine that keeps a plain-text document in sync with
//! a rendered, editable view of it.
//!
//! Every edit goes through the logical text: the editor reads the host
//! selection as text offsets, splices the text, recompiles the markdown into
//! a visual tree and puts the caret back where the edit left it.
//!
//! ## Architecture
//!
//! - **Offset mapping**: text offsets to tree positions and back
//! - **Store**: text, cursor and undo/redo history
//! - **Orchestrator**: input events become store edits
//! - **Render driver**: compile, mount, restore the caret, scroll
//!
//! ## Modules
//!
//! - [`dom`]: In-memory visual tree and its row layout
//! - [`offset`]: Offset mapper
//! - [`selection`]: Selection reader and writer
//! - [`host`]: The editable surface the editor drives
//! - [`document`]: Markdown compiler and component mapping
//! - [`editor`]: Store, history, input handling and rendering
//! - [`config`]: Persistent flag defaults
//! - [`script`]: Headless command runner
//! - [`app`]: Terminal front end
//! - [`ui`]: Terminal drawing

pub mod app;
pub mod config;
pub mod document;
pub mod dom;
pub mod editor;
pub mod host;
pub mod offset;
pub mod script;
pub mod selection;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Compiler, Components, MarkdownCompiler, NodeKind, VisualNode};
    pub use crate::editor::{Command, CommandOutput, Editor, EditorOptions, InputEvent};
    pub use crate::host::{Host, MemoryHost};
    pub use crate::offset::{Position, TextOffset};
}

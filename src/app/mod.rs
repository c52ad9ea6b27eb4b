//! Terminal front end and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state, owning the [`Editor`](crate::editor::Editor)
//! - [`Message`]: All possible events and actions
//! - [`update`]: State transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::{DEFAULT_SCROLL_MARGIN, Engine, RenderMode};

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: PathBuf,
    engine: Engine,
    render_mode: RenderMode,
    scroll_margin: usize,
}

impl App {
    /// Create a new application for the given file.
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            engine: Engine::Blink,
            render_mode: RenderMode::Sync,
            scroll_margin: DEFAULT_SCROLL_MARGIN,
        }
    }

    /// Select the input-method behaviour to emulate.
    pub const fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub const fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Rows kept between the caret and the bottom edge after an edit.
    pub const fn with_scroll_margin(mut self, margin: usize) -> Self {
        self.scroll_margin = margin;
        self
    }
}

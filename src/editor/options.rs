//! Editor construction options.

use std::fmt;

use super::store::UpdateListener;
use crate::config::{DEFAULT_SCROLL_MARGIN, Engine, RenderMode};
use crate::document::{Components, MarkdownCompiler};

/// How an [`Editor`](super::Editor) is set up.
pub struct EditorOptions {
    pub(crate) default_value: String,
    pub(crate) value: Option<String>,
    pub(crate) on_update: Option<UpdateListener>,
    pub(crate) components: Components,
    pub(crate) compiler: Option<Box<dyn MarkdownCompiler>>,
    pub(crate) render_mode: RenderMode,
    pub(crate) engine: Engine,
    pub(crate) scroll_margin: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            default_value: String::new(),
            value: None,
            on_update: None,
            components: Components::default(),
            compiler: None,
            render_mode: RenderMode::default(),
            engine: Engine::default(),
            scroll_margin: DEFAULT_SCROLL_MARGIN,
        }
    }
}

impl fmt::Debug for EditorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorOptions")
            .field("default_value", &self.default_value)
            .field("value", &self.value)
            .field("components", &self.components)
            .field("custom_compiler", &self.compiler.is_some())
            .field("render_mode", &self.render_mode)
            .field("engine", &self.engine)
            .field("scroll_margin", &self.scroll_margin)
            .finish_non_exhaustive()
    }
}

impl EditorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial text of an editor that owns its text.
    pub fn with_default_value(mut self, text: impl Into<String>) -> Self {
        self.default_value = text.into();
        self
    }

    /// Make the editor controlled: the caller owns the text and feeds
    /// changes back with [`Editor::set_value_prop`](super::Editor::set_value_prop).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Called with the new text after every edit, undo and redo.
    pub fn with_on_update(mut self, listener: impl FnMut(&str) + 'static) -> Self {
        self.on_update = Some(Box::new(listener));
        self
    }

    pub fn with_components(mut self, components: Components) -> Self {
        self.components = components;
        self
    }

    /// Replace the markdown compiler entirely; components are then unused.
    pub fn with_compiler(mut self, compiler: impl MarkdownCompiler + 'static) -> Self {
        self.compiler = Some(Box::new(compiler));
        self
    }

    pub const fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    pub const fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub const fn with_scroll_margin(mut self, margin: usize) -> Self {
        self.scroll_margin = margin;
        self
    }
}

//! Input method composition.
//!
//! While an input method composes, the host writes the in-progress text
//! straight into the surface. When the composition ends that native text is
//! removed again and the committed text goes through the normal edit path.
//! Where the native text sits relative to the caret depends on the engine.

use crate::config::Engine;

/// State of the current composition session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionState {
    /// Between composition start and its end (or the committing Enter)
    pub active: bool,
    /// Latest composition text reported by the input method
    pub pending: Option<String>,
    /// Number of committed compositions
    pub sessions: u64,
}

impl CompositionState {
    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn update(&mut self, data: impl Into<String>) {
        self.pending = Some(data.into());
    }
}

/// Engine-specific placement of native composition text.
pub trait CompositionStrategy: std::fmt::Debug {
    /// Range inside the focus node holding `len` chars of native composition
    /// text, given the caret's offset in that node.
    fn native_range(&self, focus_offset: usize, len: usize) -> Option<(usize, usize)>;

    /// Whether composition end leaves the composing state. Engines that
    /// return `false` stay composing until the committing Enter key.
    fn ends_on_composition_end(&self) -> bool;
}

/// Caret after the composed text (Blink, Gecko).
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingCaret;

impl CompositionStrategy for TrailingCaret {
    fn native_range(&self, focus_offset: usize, len: usize) -> Option<(usize, usize)> {
        focus_offset.checked_sub(len).map(|start| (start, focus_offset))
    }

    fn ends_on_composition_end(&self) -> bool {
        true
    }
}

/// Caret before the composed text (WebKit).
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingCaret;

impl CompositionStrategy for LeadingCaret {
    fn native_range(&self, focus_offset: usize, len: usize) -> Option<(usize, usize)> {
        Some((focus_offset, focus_offset + len.saturating_sub(1)))
    }

    fn ends_on_composition_end(&self) -> bool {
        false
    }
}

/// Strategy matching `engine`.
pub fn strategy_for(engine: Engine) -> Box<dyn CompositionStrategy> {
    match engine {
        Engine::Blink | Engine::Gecko => Box::new(TrailingCaret),
        Engine::Webkit => Box::new(LeadingCaret),
    }
}

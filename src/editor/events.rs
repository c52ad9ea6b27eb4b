//! Input events the editor understands.

use crate::dom::NodeId;
use crate::offset::Position;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    /// Anything the editor leaves to the host (arrows, Home, End, ...)
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Reported by the host while an input method owns the keyboard
    pub is_composing: bool,
}

impl KeyInput {
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: false,
                shift: false,
                alt: false,
            },
            is_composing: false,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(KeyInput),
    /// Clipboard text being pasted
    Paste(String),
    Cut,
    /// Text leaving the surface in a drag
    DragStart(String),
    /// Text dropped at `target`
    Drop { text: String, target: Position },
    CompositionStart,
    CompositionUpdate(String),
    CompositionEnd,
    /// Pointer press on `target`
    Click { target: NodeId },
    SelectionChange,
}

impl InputEvent {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::Paste(_) => EventKind::Paste,
            Self::Cut => EventKind::Cut,
            Self::DragStart(_) => EventKind::DragStart,
            Self::Drop { .. } => EventKind::Drop,
            Self::CompositionStart => EventKind::CompositionStart,
            Self::CompositionUpdate(_) => EventKind::CompositionUpdate,
            Self::CompositionEnd => EventKind::CompositionEnd,
            Self::Click { .. } => EventKind::Click,
            Self::SelectionChange => EventKind::SelectionChange,
        }
    }

    pub const fn key(key: Key) -> Self {
        Self::KeyDown(KeyInput::new(key))
    }
}

/// Event categories hooks are registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    Paste,
    Cut,
    DragStart,
    Drop,
    CompositionStart,
    CompositionUpdate,
    CompositionEnd,
    Click,
    SelectionChange,
}

/// Answer of an event hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Let the editor handle the event
    Continue,
    /// The hook took care of it; skip the editor's handling
    Handled,
}

/// What the host should do after the editor saw an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The host must not run its default action
    pub prevented: bool,
    /// Text to put on the clipboard (cut)
    pub clipboard: Option<String>,
}

impl Dispatch {
    pub const fn prevented() -> Self {
        Self {
            prevented: true,
            clipboard: None,
        }
    }
}

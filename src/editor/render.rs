//! Compiling the document and mounting it on the host.

use tracing::debug;

use super::store::DocumentStore;
use crate::config::RenderMode;
use crate::document::MarkdownCompiler;
use crate::host::{Host, ScrollBehavior};
use crate::offset::TextOffset;
use crate::selection;

/// Schedules renders and runs the post-render pass.
#[derive(Debug, Clone)]
pub struct RenderDriver {
    mode: RenderMode,
    scroll_margin: usize,
    pending: bool,
    commits: u64,
}

impl RenderDriver {
    pub const fn new(mode: RenderMode, scroll_margin: usize) -> Self {
        Self {
            mode,
            scroll_margin,
            pending: false,
            commits: 0,
        }
    }

    pub const fn mode(&self) -> RenderMode {
        self.mode
    }

    pub const fn scroll_margin(&self) -> usize {
        self.scroll_margin
    }

    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of trees mounted so far.
    pub const fn commits(&self) -> u64 {
        self.commits
    }

    /// Note that the text changed. Returns `true` when the render should
    /// happen right away.
    pub const fn request(&mut self) -> bool {
        self.pending = true;
        matches!(self.mode, RenderMode::Sync)
    }

    /// Compile the current text, mount it and restore the caret.
    pub fn commit<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        compiler: &dyn MarkdownCompiler,
        store: &DocumentStore,
    ) {
        let text = store.text();
        host.blur();
        host.set_caret_visible(false);
        host.mount(compiler.compile(&text));
        self.pending = false;
        self.commits += 1;

        let position = store.position();
        let target = if position >= store.len_chars() {
            TextOffset::End
        } else {
            TextOffset::At(position)
        };
        selection::set_position(host, target, None);
        host.focus();
        host.set_caret_visible(true);
        self.scroll_into_view(host);
        debug!(commit = self.commits, position, "rendered document");
    }

    fn scroll_into_view<H: Host + ?Sized>(&self, host: &mut H) {
        let Some(selection) = host.selection() else {
            return;
        };
        if selection.focus.node == host.tree().root() {
            return;
        }
        let Some(caret) = host.caret_box(selection.focus) else {
            return;
        };
        let viewport = host.viewport();
        if caret.bottom() > viewport.bottom() {
            let top = viewport.scroll_top + caret.bottom() - viewport.bottom() + self.scroll_margin;
            host.scroll_to(top, ScrollBehavior::Smooth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Compiler;
    use crate::host::MemoryHost;

    fn lines(count: usize) -> String {
        (0..count).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_request_in_sync_mode_renders_now() {
        let mut driver = RenderDriver::new(RenderMode::Sync, 8);
        assert!(driver.request());
        let mut deferred = RenderDriver::new(RenderMode::Deferred, 8);
        assert!(!deferred.request());
        assert!(deferred.is_pending());
    }

    #[test]
    fn test_commit_restores_caret_and_focus() {
        let mut host = MemoryHost::new(10);
        let mut store = DocumentStore::new("hello **world**");
        store.set_position(3);
        let mut driver = RenderDriver::new(RenderMode::Sync, 8);
        driver.commit(&mut host, &Compiler::default(), &store);
        assert_eq!(selection::get_position(&host), (3, 3));
        assert!(host.is_focused());
        assert!(host.caret_visible());
        assert_eq!(driver.commits(), 1);
    }

    #[test]
    fn test_position_at_or_past_end_places_caret_at_end() {
        let mut host = MemoryHost::new(10);
        let mut store = DocumentStore::new("abc");
        store.set_position(4);
        let mut driver = RenderDriver::new(RenderMode::Sync, 8);
        driver.commit(&mut host, &Compiler::default(), &store);
        assert_eq!(selection::get_position(&host), (3, 3));
    }

    #[test]
    fn test_caret_below_viewport_scrolls_with_margin() {
        let mut host = MemoryHost::new(5);
        let mut store = DocumentStore::new(&lines(40));
        store.set_position(store.len_chars());
        let mut driver = RenderDriver::new(RenderMode::Sync, 8);
        driver.commit(&mut host, &Compiler::default(), &store);
        // caret on row 39, bottom 40, viewport bottom 5
        assert_eq!(host.last_scroll(), Some((43, ScrollBehavior::Smooth)));
        assert_eq!(host.viewport().scroll_top, 35);
    }

    #[test]
    fn test_visible_caret_does_not_scroll() {
        let mut host = MemoryHost::new(5);
        let store = DocumentStore::new(&lines(40));
        let mut driver = RenderDriver::new(RenderMode::Sync, 8);
        driver.commit(&mut host, &Compiler::default(), &store);
        assert_eq!(host.last_scroll(), None);
    }
}

//! Terminal UI components.
//!
//! This module draws the editor's in-memory surface:
//! - [`render`]: document rows, selection and caret
//! - [`style`]: Theming and colors

pub mod style;

mod render;
mod status;

pub use render::render;

/// Columns left blank before the document text.
pub const DOCUMENT_LEFT_PADDING: u16 = 2;

#[cfg(test)]
mod tests;

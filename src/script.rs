//! Headless command runner.
//!
//! Reads control commands as JSON lines, runs them against an editor and
//! writes one JSON result per command. Blank lines and lines starting with
//! `#` are skipped.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::document::parse;
use crate::editor::{Command, Editor};
use crate::host::Host;

/// Run every command in `input`, returning how many ran.
///
/// # Errors
///
/// Fails on the first unreadable or malformed line, or when `output`
/// cannot be written.
pub fn run_script<H: Host>(
    editor: &mut Editor<H>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<usize> {
    let mut count = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read script line {}", index + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let command: Command = serde_json::from_str(trimmed)
            .with_context(|| format!("invalid command on line {}: {trimmed}", index + 1))?;
        debug!(?command, "script command");
        let result = editor.dispatch(command);
        editor.poll_render();
        serde_json::to_writer(&mut output, &result)?;
        writeln!(output)?;
        count += 1;
    }
    output.flush()?;
    Ok(count)
}

/// The compiled node list of `text` as pretty JSON.
///
/// # Errors
///
/// Only fails if serialization fails.
pub fn dump_tree(text: &str) -> Result<String> {
    serde_json::to_string_pretty(&parse(text)).context("failed to serialize node list")
}

//! Control channel: named commands a host application sends to the editor.

use serde::{Deserialize, Serialize};

use crate::offset::TextOffset;

/// A control command.
///
/// Serialized as JSON with a `"type"` tag, for example
/// `{"type":"setPosition","start":3,"end":-1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Current selection as logical offsets
    GetPosition,
    /// Line and column of the selection start
    GetLine,
    /// Line and column of the first visible position
    GetScrollLine,
    SetPosition {
        start: TextOffset,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<TextOffset>,
    },
    SetFocus,
    /// Replace the whole text as one undoable edit
    SetValue { value: String },
    /// Replace a range (the selection by default) with `value`
    Update {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<TextOffset>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<TextOffset>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Undo,
    Redo,
}

/// Result of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CommandOutput {
    Position { start: usize, end: usize },
    /// 1-based line, 0-based column; `0, 0` when nothing is visible
    Line { line: usize, column: usize },
    Done,
    /// The command had nothing to act on
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_parse_from_json() {
        let command: Command = serde_json::from_str(r#"{"type":"setPosition","start":-1}"#).unwrap();
        assert_eq!(
            command,
            Command::SetPosition {
                start: TextOffset::End,
                end: None
            }
        );
        let command: Command =
            serde_json::from_str(r#"{"type":"update","start":2,"value":"x"}"#).unwrap();
        assert_eq!(
            command,
            Command::Update {
                start: Some(TextOffset::At(2)),
                end: None,
                value: Some("x".to_string())
            }
        );
        let command: Command = serde_json::from_str(r#"{"type":"getScrollLine"}"#).unwrap();
        assert_eq!(command, Command::GetScrollLine);
    }

    #[test]
    fn test_output_json_shape() {
        let json = serde_json::to_string(&CommandOutput::Line { line: 2, column: 4 }).unwrap();
        assert_eq!(json, r#"{"type":"line","line":2,"column":4}"#);
        let json = serde_json::to_string(&CommandOutput::Done).unwrap();
        assert_eq!(json, r#"{"type":"done"}"#);
    }
}

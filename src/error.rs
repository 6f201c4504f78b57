//! Structured error types for the planner engine.
//!
//! Layout errors are programmer errors: a tree declared wrong. They carry the
//! path of the offending node so the declaration can be found. Everything
//! softer (missing styles, unknown destinations, cramped geometry) is handled
//! by falling back, never by failing the page.

use thiserror::Error;

/// A malformed layout declaration, or a tree used before it was computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("{path}: only containers can be opened")]
    NotAContainer { path: String },

    #[error("{path}: a {kind} node cannot have children")]
    LeafWithChildren { path: String, kind: String },

    #[error("{path}: invalid sizing {detail}")]
    InvalidSizing { path: String, detail: String },

    #[error("{path}: a tab needs at least one destination")]
    EmptyTab { path: String },

    #[error("close without a matching open")]
    UnbalancedClose,

    #[error("{path}: container never closed")]
    UnclosedContainer { path: String },

    #[error("{path}: bounds not computed before rendering")]
    NotComputed { path: String },
}

/// The unified error type returned by the public entry points.
#[derive(Debug, Error)]
pub enum GridplanError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// JSON input failed to parse as a planner document.
    #[error("Failed to parse document: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// The drawing surface could not produce its output.
    #[error("Render error: {0}")]
    Render(String),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {hint}")
    }
}

impl From<serde_json::Error> for GridplanError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the planner document schema. Check node types and field names.".to_string()
            }
            serde_json::error::Category::Eof => "Unexpected end of input. Is the JSON truncated?".to_string(),
            serde_json::error::Category::Io => String::new(),
        };
        GridplanError::Parse { source: e, hint }
    }
}

pub type Result<T, E = GridplanError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_mentions_path() {
        let err = LayoutError::LeafWithChildren {
            path: "root/week/Text".to_string(),
            kind: "Text".to_string(),
        };
        assert_eq!(err.to_string(), "root/week/Text: a Text node cannot have children");
    }

    #[test]
    fn test_parse_error_carries_hint() {
        let err: GridplanError = serde_json::from_str::<serde_json::Value>("{ \"a\": 1,")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse document"));
        assert!(msg.contains("Hint:"));
    }
}

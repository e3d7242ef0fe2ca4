//! Renderable command payloads.
//!
//! A payload is opaque to the dispatcher: it is stored in the transcript as-is
//! and only the rendering layer looks inside it.

/// Output attached to a command definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Plain text, possibly spanning several lines.
    Text(String),

    /// Structured table data.
    Table {
        /// Column headers.
        headers: Vec<String>,
        /// Row data (each row is a vector of cell values).
        rows: Vec<Vec<String>>,
    },
}

impl Payload {
    /// Creates a text payload.
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    /// Creates a table payload.
    pub fn table(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self::Table { headers, rows }
    }

    /// Plain-text rendering used for logs and headless state dumps.
    pub fn to_plain(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Table { headers, rows } => {
                let mut lines = vec![headers.join(" | ")];
                lines.extend(rows.iter().map(|row| row.join(" | ")));
                lines.join("\n")
            }
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

//! Tokens produced by the inline extensions.

use serde::Serialize;

/// The syntax an extension token was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Underline,
    Color,
    Right,
    Center,
}

/// A match produced by an inline extension.
///
/// Every variant keeps the exact consumed source (`raw`) so the scanner can
/// advance past it, and the unparsed inline `text` between the delimiters.
/// Tokens own copies of their content and never point back into the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Token {
    /// `==text==`
    Underline { raw: String, text: String },
    /// `%color%text%%`
    Color {
        raw: String,
        color: String,
        text: String,
    },
    /// `->text->`
    Right { raw: String, text: String },
    /// `->text<-`
    Center { raw: String, text: String },
}

impl Token {
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Underline { .. } => TokenKind::Underline,
            Self::Color { .. } => TokenKind::Color,
            Self::Right { .. } => TokenKind::Right,
            Self::Center { .. } => TokenKind::Center,
        }
    }

    /// The exact source span this token consumed.
    pub fn raw(&self) -> &str {
        match self {
            Self::Underline { raw, .. }
            | Self::Color { raw, .. }
            | Self::Right { raw, .. }
            | Self::Center { raw, .. } => raw,
        }
    }

    /// Inline content between the delimiters, not yet rendered.
    pub fn text(&self) -> &str {
        match self {
            Self::Underline { text, .. }
            | Self::Color { text, .. }
            | Self::Right { text, .. }
            | Self::Center { text, .. } => text,
        }
    }

    /// The same token with `raw` and `text` replaced, keeping the color.
    pub(crate) fn with_source(self, raw: String, text: String) -> Self {
        match self {
            Self::Underline { .. } => Self::Underline { raw, text },
            Self::Color { color, .. } => Self::Color { raw, color, text },
            Self::Right { .. } => Self::Right { raw, text },
            Self::Center { .. } => Self::Center { raw, text },
        }
    }
}

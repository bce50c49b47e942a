//! Markdown rendering with the note syntax extensions.
//!
//! This module handles:
//! - The inline extensions (underline, color, right/center alignment)
//! - Ordered first-match-wins dispatch of those extensions
//! - Rendering through comrak, a sanitizer and the highlighter

mod extensions;
mod parser;
mod types;

pub use extensions::{Extension, InlineExtension, Registry};
pub use parser::{RenderOptions, Renderer};
pub use types::{Token, TokenKind};

/// HTML cleanup stage run on every rendered document.
///
/// Extension output (notably the color value in a `style` attribute) is
/// inserted unchecked, so a renderer fed untrusted notes should be built
/// with a real sanitizer via [`Renderer::with_sanitizer`].
pub trait Sanitize {
    fn sanitize(&self, html: String) -> String;
}

/// Leaves the HTML untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Passthrough;

impl Sanitize for Passthrough {
    fn sanitize(&self, html: String) -> String {
        html
    }
}

impl<F> Sanitize for F
where
    F: Fn(String) -> String,
{
    fn sanitize(&self, html: String) -> String {
        self(html)
    }
}

/// Render markdown with the default extensions and options.
///
/// # Example
///
/// ```
/// let html = memodown::document::render("==hi==");
/// assert_eq!(html, "<p><u>hi</u></p>\n");
/// ```
pub fn render(source: &str) -> String {
    Renderer::default().render(source)
}

//! Inline syntax extensions and the ordered registry that dispatches them.
//!
//! Each extension is a value implementing [`InlineExtension`]: a cheap
//! trigger scan, an anchored tokenizer and a renderer. The [`Registry`]
//! tries them in registration order and the first successful tokenize
//! claims the input, so order alone decides ambiguous input.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::types::Token;

static UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^==([^=]+)==").expect("underline pattern"));
static COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^%([^%]+)%([\s\S]+?)%%").expect("color pattern"));
static RIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^->\s*(.+?)\s*->").expect("right-align pattern"));
static CENTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^->\s*(.+?)\s*<-").expect("center-align pattern"));

/// Capability interface shared by every inline extension.
pub trait InlineExtension {
    /// Stable name of the syntax, used in logs.
    fn name(&self) -> &'static str;

    /// Earliest byte offset in `src` where this extension's trigger occurs.
    ///
    /// Only a hint for where to attempt [`tokenize`](Self::tokenize); a hit
    /// does not guarantee a match.
    fn scan(&self, src: &str) -> Option<usize>;

    /// Try to match at offset 0 of `src`.
    fn tokenize(&self, src: &str) -> Option<Token>;

    /// Render a token, using `render_inline` for the nested content.
    fn render<F>(&self, token: &Token, render_inline: F) -> String
    where
        F: FnMut(&str) -> String;
}

/// The built-in inline syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    /// `==text==`
    Underline,
    /// `%color%text%%`
    Color,
    /// `->text->`
    Right,
    /// `->text<-`
    Center,
}

impl Extension {
    /// Trigger sequence that [`InlineExtension::scan`] looks for.
    pub const fn trigger(self) -> &'static str {
        match self {
            Self::Underline => "==",
            Self::Color => "%",
            Self::Right | Self::Center => "->",
        }
    }

    /// Byte range of the nested content within `token.raw()`.
    pub fn text_span(self, token: &Token) -> Option<Range<usize>> {
        let caps = self.pattern().captures(token.raw())?;
        let group = if self == Self::Color { 2 } else { 1 };
        caps.get(group).map(|m| m.range())
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Underline => &UNDERLINE,
            Self::Color => &COLOR,
            Self::Right => &RIGHT,
            Self::Center => &CENTER,
        }
    }
}

impl InlineExtension for Extension {
    fn name(&self) -> &'static str {
        match self {
            Self::Underline => "underline",
            Self::Color => "color",
            Self::Right => "right",
            Self::Center => "center",
        }
    }

    fn scan(&self, src: &str) -> Option<usize> {
        src.find(self.trigger())
    }

    fn tokenize(&self, src: &str) -> Option<Token> {
        let caps = self.pattern().captures(src)?;
        let raw = caps.get(0)?.as_str().to_string();
        let first = caps.get(1)?.as_str().to_string();
        let token = match self {
            Self::Underline => Token::Underline { raw, text: first },
            Self::Color => Token::Color {
                raw,
                color: first,
                text: caps.get(2)?.as_str().to_string(),
            },
            Self::Right => Token::Right { raw, text: first },
            Self::Center => Token::Center { raw, text: first },
        };
        Some(token)
    }

    fn render<F>(&self, token: &Token, mut render_inline: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        // The color value goes into the attribute untouched; whatever
        // sanitizer runs after the pipeline owns that policy.
        match token {
            Token::Underline { text, .. } => format!("<u>{}</u>", render_inline(text)),
            Token::Color { color, text, .. } => {
                format!(r#"<span style="color:{color}">{}</span>"#, render_inline(text))
            }
            Token::Right { text, .. } => format!(
                r#"<span style="display:block;text-align:right;">{}</span>"#,
                render_inline(text)
            ),
            Token::Center { text, .. } => format!(
                r#"<span style="display:block;text-align:center;">{}</span>"#,
                render_inline(text)
            ),
        }
    }
}

/// Ordered set of extensions consulted at every inline position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    extensions: Vec<Extension>,
}

impl Registry {
    /// A registry with nothing registered; every position falls through.
    pub const fn empty() -> Self {
        Self {
            extensions: Vec::new(),
        }
    }

    /// Append an extension. Earlier registrations win ties.
    pub fn register(&mut self, extension: Extension) -> &mut Self {
        self.extensions.push(extension);
        self
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, extension: Extension) -> Self {
        self.register(extension);
        self
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Smallest trigger offset over all registered extensions.
    pub fn scan(&self, src: &str) -> Option<usize> {
        self.extensions.iter().filter_map(|ext| ext.scan(src)).min()
    }

    /// First registered extension whose anchored match succeeds on `src`.
    pub fn tokenize(&self, src: &str) -> Option<(Extension, Token)> {
        self.extensions.iter().find_map(|ext| {
            let token = ext.tokenize(src)?;
            tracing::trace!(extension = ext.name(), raw = token.raw(), "extension matched");
            Some((*ext, token))
        })
    }
}

impl Default for Registry {
    /// Underline, color, right, center: the order notes were written against.
    fn default() -> Self {
        Self::empty()
            .with(Extension::Underline)
            .with(Extension::Color)
            .with(Extension::Right)
            .with(Extension::Center)
    }
}

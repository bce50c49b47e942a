use std::borrow::Cow;

use crate::app::Model;
use crate::document::Sanitize;
use crate::video::VideoLink;

/// Toolbar formatting buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bold,
    Italic,
    Strikethrough,
    Underline,
    InlineCode,
    /// ATX heading of the given level, clamped to 1..=6
    Heading(u8),
    Quote,
    AlignRight,
    AlignCenter,
    /// Strips alignment arrows instead of wrapping
    AlignLeft,
}

impl Format {
    /// Opening and closing markers wrapped around the selection.
    ///
    /// `None` for [`Format::AlignLeft`], which removes markers instead.
    pub fn markers(self) -> Option<(Cow<'static, str>, &'static str)> {
        let pair = match self {
            Self::Bold => (Cow::Borrowed("**"), "**"),
            Self::Italic => (Cow::Borrowed("*"), "*"),
            Self::Strikethrough => (Cow::Borrowed("~~"), "~~"),
            Self::Underline => (Cow::Borrowed("=="), "=="),
            Self::InlineCode => (Cow::Borrowed("`"), "`"),
            Self::Heading(level) => {
                let level = usize::from(level.clamp(1, 6));
                (Cow::Owned(format!("{} ", "#".repeat(level))), "")
            }
            Self::Quote => (Cow::Borrowed("> "), ""),
            Self::AlignRight => (Cow::Borrowed("->"), "->"),
            Self::AlignCenter => (Cow::Borrowed("->"), "<-"),
            Self::AlignLeft => return None,
        };
        Some(pair)
    }
}

/// All user actions an editor session responds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Textarea
    /// Content replaced by typing
    Input(String),
    /// Selection moved; does not touch the content
    Select { start: usize, end: usize },

    // Buffer primitives
    /// Wrap the selection in `open` and `close`
    Wrap { open: String, close: String },
    /// Replace the selection, caret `caret` chars into `text`
    Insert { text: String, caret: Option<usize> },
    /// Strip alignment arrows from the selection
    RemoveArrows,

    // Toolbar
    /// Formatting button
    Format(Format),

    // Forms
    /// Color form submitted with a CSS color
    Color(String),
    /// Link form submitted
    Link { text: String, url: String },
    /// Image form submitted
    Image { alt: String, url: String },
    /// Video form submitted with a YouTube URL
    Video(String),
}

/// Apply one message to the session.
///
/// Any content edit re-renders the preview before returning. Messages that
/// leave the content alone (form validation failures, selection moves) do
/// not.
pub fn update<S: Sanitize>(mut model: Model<S>, msg: Message) -> Model<S> {
    let edited = match msg {
        Message::Input(text) => {
            model.buffer.set_text(&text);
            true
        }
        Message::Select { start, end } => {
            model.buffer.select(start, end);
            false
        }
        Message::Wrap { open, close } => {
            model.buffer.wrap_selection(&open, &close);
            true
        }
        Message::Insert { text, caret } => {
            model.buffer.insert_at_cursor(&text, caret);
            true
        }
        Message::RemoveArrows => model.buffer.remove_arrows(),
        Message::Format(format) => match format.markers() {
            Some((open, close)) => {
                model.buffer.wrap_selection(&open, close);
                true
            }
            None => model.buffer.remove_arrows(),
        },
        Message::Color(code) => {
            let code = code.trim();
            if code.is_empty() {
                false
            } else {
                model.buffer.wrap_selection(&format!("%{code}%"), "%%");
                true
            }
        }
        Message::Link { text, url } => {
            let (text, url) = (text.trim(), url.trim());
            if text.is_empty() && url.is_empty() {
                false
            } else {
                model.buffer.insert_at_cursor(&format!("[{text}]({url})"), None);
                true
            }
        }
        Message::Image { alt, url } => {
            let url = url.trim();
            if url.is_empty() {
                false
            } else {
                let alt = alt.trim();
                model.buffer.insert_at_cursor(&format!("![{alt}]({url})"), None);
                true
            }
        }
        Message::Video(url) => match VideoLink::parse(url.trim()) {
            Ok(link) => {
                model.buffer.insert_at_cursor(&link.embed_markdown(), None);
                true
            }
            Err(err) => {
                tracing::debug!(%err, "video form ignored");
                false
            }
        },
    };

    if edited {
        model.rerender();
    }
    model
}

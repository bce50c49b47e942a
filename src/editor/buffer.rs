//! Rope-backed note text with a char-offset selection.

use std::sync::LazyLock;

use regex::Regex;
use ropey::Rope;

static ARROWS: LazyLock<Regex> = LazyLock::new(|| Regex::new("->|<-").expect("arrow pattern"));

/// Selected range in the editor buffer, in char offsets.
///
/// `start == end` is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// An empty selection at `at`.
    pub const fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }
}

/// A text buffer backed by a rope, plus the user's selection.
///
/// Every public method leaves `0 <= start <= end <= len_chars()` intact.
pub struct EditorBuffer {
    rope: Rope,
    selection: Selection,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string, caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::default(),
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Content length in chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn selected_text(&self) -> String {
        self.rope
            .slice(self.selection.start..self.selection.end)
            .to_string()
    }

    /// Set the selection, clamped to the content.
    ///
    /// Like a textarea, a start past the end collapses onto the end.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.rope.len_chars();
        let end = end.min(len);
        self.selection = Selection {
            start: start.min(end),
            end,
        };
    }

    /// Replace the whole content, keeping the selection where it still fits.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.select(self.selection.start, self.selection.end);
        self.dirty = true;
    }

    /// Surround the selection with `open` and `close`.
    ///
    /// The originally selected text stays selected, shifted by the length
    /// of `open`. With a caret this leaves the caret between the markers.
    pub fn wrap_selection(&mut self, open: &str, close: &str) {
        let Selection { start, end } = self.selection;
        self.rope.insert(end, close);
        self.rope.insert(start, open);

        let shift = open.chars().count();
        self.selection = Selection {
            start: start + shift,
            end: end + shift,
        };
        self.dirty = true;
    }

    /// Replace the selection with `text` and leave a caret inside it.
    ///
    /// The caret lands `caret_offset` chars into the inserted text, or right
    /// after it when `caret_offset` is `None`.
    pub fn insert_at_cursor(&mut self, text: &str, caret_offset: Option<usize>) {
        let Selection { start, end } = self.selection;
        self.rope.remove(start..end);
        self.rope.insert(start, text);

        let offset = caret_offset.unwrap_or_else(|| text.chars().count());
        let caret = (start + offset).min(self.rope.len_chars());
        self.selection = Selection::caret(caret);
        self.dirty = true;
    }

    /// Strip every `->` and `<-` from the selected text.
    ///
    /// Plain substring removal: it does not check that the arrows were
    /// alignment markers or that they balance. The cleaned text stays
    /// selected. Returns `false` (and does nothing) for an empty selection.
    pub fn remove_arrows(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let Selection { start, end } = self.selection;
        let selected = self.selected_text();
        let cleaned = ARROWS.replace_all(&selected, "");

        if cleaned != selected {
            self.rope.remove(start..end);
            self.rope.insert(start, &cleaned);
            self.dirty = true;
        }
        self.selection = Selection {
            start,
            end: start + cleaned.chars().count(),
        };
        true
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} chars)", self.rope.len_chars()),
            )
            .field("selection", &self.selection)
            .field("dirty", &self.dirty)
            .finish()
    }
}

//! Text buffer behind the note editor.
//!
//! Provides a rope-backed buffer with a char-offset selection and the
//! edit primitives the formatting commands are built from.

mod buffer;

pub use buffer::{EditorBuffer, Selection};

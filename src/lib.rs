// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. video::VideoLink)
    clippy::module_name_repetitions
)]

//! # memodown
//!
//! Markdown notes with a few extra inline syntaxes, and the editing
//! primitives a note editor's toolbar is built on.
//!
//! On top of CommonMark/GFM, memodown renders:
//! - `==text==` as underlined text
//! - `%color%text%%` as colored text
//! - `->text->` and `->text<-` as right-aligned and centered blocks
//!
//! ## Architecture
//!
//! The editor session uses The Elm Architecture (TEA) pattern:
//! - **Model**: Buffer, selection and rendered preview
//! - **Message**: Toolbar and form actions
//! - **Update**: Applies the edit, then re-renders
//!
//! ## Modules
//!
//! - [`app`]: Editor session state and transitions
//! - [`document`]: Extension dispatch and HTML rendering
//! - [`editor`]: Selection-aware text buffer
//! - [`highlight`]: Syntax highlighting of code blocks
//! - [`video`]: YouTube link normalization
//! - [`config`]: Saved render defaults

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod highlight;
pub mod video;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{Format, Message, Model, update};
    pub use crate::document::{RenderOptions, Renderer, Token};
    pub use crate::editor::{EditorBuffer, Selection};
    pub use crate::video::{VideoLink, parse_link};
}

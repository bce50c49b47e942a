//! Editor session state and transitions.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The buffer, selection and rendered preview of one session
//! - [`Message`]: Every toolbar, form and textarea action
//! - [`update`]: Applies one message, then re-renders synchronously

mod model;
mod update;

pub use model::Model;
pub use update::{Format, Message, update};

use crate::document::{Passthrough, RenderOptions, Renderer, Sanitize};
use crate::editor::EditorBuffer;

/// The complete state of one editor session.
///
/// All state lives here: the buffer and selection being edited, the
/// renderer, and the preview produced from the current content.
#[derive(Debug)]
pub struct Model<S = Passthrough> {
    /// The note being edited
    pub buffer: EditorBuffer,
    /// Renderer used for the preview
    pub renderer: Renderer<S>,
    /// Preview HTML for the current content
    pub html: String,
    /// Number of times the preview has been rendered
    pub renders: u64,
}

impl Model {
    /// Open a session on `text` with the default renderer for `options`.
    pub fn new(text: &str, options: RenderOptions) -> Self {
        Self::with_renderer(text, Renderer::new(options))
    }
}

impl<S: Sanitize> Model<S> {
    /// Open a session on `text` rendered by `renderer`.
    pub fn with_renderer(text: &str, renderer: Renderer<S>) -> Self {
        let mut model = Self {
            buffer: EditorBuffer::from_text(text),
            renderer,
            html: String::new(),
            renders: 0,
        };
        model.rerender();
        model
    }

    /// Rebuild the preview from the buffer content.
    pub(super) fn rerender(&mut self) {
        self.html = self.renderer.render(&self.buffer.text());
        self.renders += 1;
        tracing::trace!(
            renders = self.renders,
            chars = self.buffer.len_chars(),
            "preview rendered"
        );
    }
}

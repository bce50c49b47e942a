//! Markdown rendering with comrak plus the inline extension pass.
//!
//! comrak parses the document first. The extensions then run over the
//! inline children of each paragraph, heading and table cell, so a match
//! never leaves the block it starts in. Nodes comrak already gave a meaning
//! to (code spans, autolinks, images, raw HTML, escapes) are opaque to the
//! extensions; emphasis and links are walked into.

use std::borrow::Cow;
use std::ops::Range;

use comrak::nodes::{AstNode, NodeLink, NodeValue, Sourcepos};
use comrak::{Arena, Options, format_html, parse_document};

use super::extensions::{Extension, InlineExtension, Registry};
use super::types::Token;
use super::{Passthrough, Sanitize};
use crate::highlight::{self, HighlightBackground};

/// Stands in for an opaque inline node while extensions scan a block.
const ATOM: char = '\u{E000}';
/// Marks where nested content goes in an extension's rendered wrapper.
const NESTED: char = '\u{E001}';
/// Prefixed to nested inline content so comrak cannot read its first
/// line as a block construct (heading, list item, indented code).
const INLINE_ANCHOR: char = '\u{E002}';
const RESERVED: [char; 3] = [ATOM, NESTED, INLINE_ANCHOR];

/// Switches for the base engine and the post-processing stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render single newlines as `<br />`.
    pub hard_breaks: bool,
    /// GitHub flavored extensions: strikethrough, tables, autolinks, task
    /// lists and `> [!NOTE]` alerts.
    pub gfm: bool,
    /// Pass raw HTML in the source through instead of omitting it.
    pub raw_html: bool,
    /// Syntax highlight fenced code blocks that name a language.
    pub highlight: bool,
    /// Palette used for highlighting.
    pub theme: HighlightBackground,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            hard_breaks: true,
            gfm: true,
            raw_html: false,
            highlight: true,
            theme: HighlightBackground::Light,
        }
    }
}

/// Markdown to HTML pipeline: comrak, extensions, sanitizer, highlighter.
#[derive(Debug, Clone)]
pub struct Renderer<S = Passthrough> {
    registry: Registry,
    options: RenderOptions,
    sanitizer: S,
}

impl Renderer {
    /// A renderer with the default extensions and no sanitizer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            registry: Registry::default(),
            options,
            sanitizer: Passthrough,
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl<S: Sanitize> Renderer<S> {
    /// Replace the extension registry (and with it the precedence order).
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Run `sanitizer` over every rendered document before highlighting.
    pub fn with_sanitizer<T: Sanitize>(self, sanitizer: T) -> Renderer<T> {
        Renderer {
            registry: self.registry,
            options: self.options,
            sanitizer,
        }
    }

    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render a full markdown document to HTML.
    pub fn render(&self, source: &str) -> String {
        let source = strip_reserved(source);
        let (html, tokens) = self.to_html(&source);
        let html = self.sanitizer.sanitize(html);
        tracing::debug!(
            source_bytes = source.len(),
            tokens = tokens.len(),
            "rendered markdown"
        );
        if self.options.highlight {
            highlight::highlight_html(&html, self.options.theme)
        } else {
            html
        }
    }

    /// Render inline markdown without a surrounding paragraph.
    ///
    /// Extensions apply here too, so `render_inline("==x==")` is `<u>x</u>`.
    pub fn render_inline(&self, text: &str) -> String {
        let anchored = format!("{INLINE_ANCHOR}{}", strip_reserved(text));
        let (html, _) = self.to_html(&anchored);
        strip_paragraph(&html)
    }

    /// Top-level extension tokens in `source`, in document order.
    ///
    /// A token nested inside another extension's content is not listed on
    /// its own; it is part of the outer token's `raw` and `text`.
    pub fn tokens(&self, source: &str) -> Vec<Token> {
        let source = strip_reserved(source);
        let arena = Arena::new();
        let options = self.comrak_options();
        let root = parse_document(&arena, &source, &options);
        self.expand_document(&arena, root, &source)
    }

    fn to_html(&self, source: &str) -> (String, Vec<Token>) {
        let arena = Arena::new();
        let mut options = self.comrak_options();
        let root = parse_document(&arena, source, &options);
        let tokens = self.expand_document(&arena, root, source);

        // Escapes were parsed as their own nodes so extensions skip them;
        // rendered, they are just the escaped character.
        options.render.escaped_char_spans = false;
        let mut out: Vec<u8> = Vec::with_capacity(source.len() * 2);
        if let Err(err) = format_html(root, &options, &mut out) {
            tracing::warn!(%err, "html formatting stopped early");
        }
        let html = String::from_utf8(out)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned());
        (html, tokens)
    }

    fn comrak_options(&self) -> Options<'static> {
        let mut options = Options::default();
        apply_options(&mut options, &self.options);
        options.render.escaped_char_spans = true;
        options
    }

    /// Run the registry over every block that holds inline content.
    fn expand_document<'a>(
        &self,
        arena: &'a Arena<AstNode<'a>>,
        root: &'a AstNode<'a>,
        source: &str,
    ) -> Vec<Token> {
        if self.registry.is_empty() {
            return Vec::new();
        }
        let blocks: Vec<_> = root
            .descendants()
            .filter(|node| node.data.borrow().value.contains_inlines())
            .collect();
        let mut expander = Expander::new(&self.registry, arena, source);
        for block in blocks {
            expander.rewrite_children(block);
        }
        expander.tokens
    }
}

fn apply_options(options: &mut Options, render: &RenderOptions) {
    if render.gfm {
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.alerts = true;
    }
    options.render.hardbreaks = render.hard_breaks;
    options.render.unsafe_ = render.raw_html;
}

/// One inline child of a block while extensions are applied.
#[derive(Clone)]
enum Piece<'a> {
    /// Literal text, open to the extensions.
    Text(String),
    /// A node kept as is. Line breaks read as `\n`, anything else as a
    /// single opaque character.
    Node(&'a AstNode<'a>),
    /// Rendered extension markup around nested content.
    Html(String),
}

impl Piece<'_> {
    fn flat_len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Node(node) if is_break(node) => 1,
            Self::Node(_) | Self::Html(_) => ATOM.len_utf8(),
        }
    }
}

/// The text extensions see for `pieces`, and where each piece starts in it.
fn flatten(pieces: &[Piece<'_>]) -> (String, Vec<usize>) {
    let mut flat = String::new();
    let mut starts = Vec::with_capacity(pieces.len());
    for piece in pieces {
        starts.push(flat.len());
        match piece {
            Piece::Text(text) => flat.push_str(text),
            Piece::Node(node) if is_break(node) => flat.push('\n'),
            Piece::Node(_) | Piece::Html(_) => flat.push(ATOM),
        }
    }
    (flat, starts)
}

/// Pieces covering `range` of the flattened text. Text is cut to fit; a
/// node is kept only when it lies wholly inside.
fn slice<'a>(pieces: &[Piece<'a>], starts: &[usize], range: Range<usize>) -> Vec<Piece<'a>> {
    let mut out = Vec::new();
    for (piece, &start) in pieces.iter().zip(starts) {
        let end = start + piece.flat_len();
        if end <= range.start || start >= range.end {
            continue;
        }
        match piece {
            Piece::Text(text) => {
                let from = range.start.saturating_sub(start);
                let to = range.end.min(end) - start;
                out.push(Piece::Text(text[from..to].to_string()));
            }
            _ if start >= range.start && end <= range.end => out.push(piece.clone()),
            _ => {}
        }
    }
    out
}

fn is_break(node: &AstNode<'_>) -> bool {
    matches!(
        node.data.borrow().value,
        NodeValue::SoftBreak | NodeValue::LineBreak
    )
}

/// Inline nodes whose children are ordinary inline content.
fn is_inline_container<'a>(node: &'a AstNode<'a>) -> bool {
    match &node.data.borrow().value {
        NodeValue::Emph | NodeValue::Strong | NodeValue::Strikethrough | NodeValue::Superscript => {
            true
        }
        NodeValue::Link(link) => !is_autolink(node, link),
        _ => false,
    }
}

/// Autolinks display their own destination (`https://`, `mailto:` and
/// `http://` for `www.` links may be prepended to it).
fn is_autolink<'a>(node: &'a AstNode<'a>, link: &NodeLink) -> bool {
    let label: String = node
        .children()
        .filter_map(|child| child.data.borrow().value.text().cloned())
        .collect();
    !label.is_empty() && link.url.ends_with(&label)
}

/// Rewrites inline children in place and records top-level tokens.
struct Expander<'a, 'r> {
    registry: &'r Registry,
    arena: &'a Arena<AstNode<'a>>,
    source: &'r str,
    line_starts: Vec<usize>,
    depth: usize,
    tokens: Vec<Token>,
}

impl<'a, 'r> Expander<'a, 'r> {
    fn new(registry: &'r Registry, arena: &'a Arena<AstNode<'a>>, source: &'r str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self {
            registry,
            arena,
            source,
            line_starts,
            depth: 0,
            tokens: Vec::new(),
        }
    }

    fn rewrite_children(&mut self, parent: &'a AstNode<'a>) {
        let children: Vec<_> = parent.children().collect();
        let pieces = children
            .iter()
            .map(|&child| match &child.data.borrow().value {
                NodeValue::Text(text) => Piece::Text(text.clone()),
                _ => Piece::Node(child),
            })
            .collect();
        let expanded = self.expand(pieces);

        for child in children {
            child.detach();
        }
        for piece in expanded {
            let node = match piece {
                Piece::Text(text) => self.alloc(NodeValue::Text(text)),
                Piece::Html(html) => self.alloc(NodeValue::Raw(html)),
                Piece::Node(node) => node,
            };
            parent.append(node);
        }
    }

    fn alloc(&self, value: NodeValue) -> &'a AstNode<'a> {
        self.arena.alloc(AstNode::from(value))
    }

    /// Left to right, let the registry claim spans of `pieces`.
    fn expand(&mut self, pieces: Vec<Piece<'a>>) -> Vec<Piece<'a>> {
        let (flat, starts) = flatten(&pieces);
        let mut out = Vec::with_capacity(pieces.len());
        let mut emitted = 0;
        let mut pos = 0;

        while pos < flat.len() {
            let rest = &flat[pos..];
            let Some(skip) = self.registry.scan(rest) else {
                break;
            };
            if skip > 0 {
                pos += skip;
                continue;
            }
            let Some((ext, token, inner)) = self.claim(rest) else {
                pos += rest.chars().next().map_or(1, char::len_utf8);
                continue;
            };

            let end = pos + token.raw().len();
            let inner = pos + inner.start..pos + inner.end;
            self.emit(&mut out, slice(&pieces, &starts, emitted..pos));
            let html = ext.render(&token, |_| NESTED.to_string());
            if self.depth == 0 {
                let raw = self.source_text(&slice(&pieces, &starts, pos..end));
                let text = self.source_text(&slice(&pieces, &starts, inner.clone()));
                self.tokens.push(token.with_source(raw, text));
            }

            match html.split_once(NESTED) {
                Some((open, close)) => {
                    out.push(Piece::Html(open.to_string()));
                    self.depth += 1;
                    let nested = self.expand(slice(&pieces, &starts, inner));
                    self.depth -= 1;
                    out.extend(nested);
                    out.push(Piece::Html(close.to_string()));
                }
                None => out.push(Piece::Html(html)),
            }
            emitted = end;
            pos = end;
        }

        self.emit(&mut out, slice(&pieces, &starts, emitted..flat.len()));
        out
    }

    /// A registry match at the start of `rest` whose delimiters are plain
    /// text, with the span of its nested content.
    fn claim(&self, rest: &str) -> Option<(Extension, Token, Range<usize>)> {
        let (ext, token) = self.registry.tokenize(rest)?;
        let inner = ext.text_span(&token)?;
        let raw = token.raw();
        if raw[..inner.start].contains(ATOM) || raw[inner.end..].contains(ATOM) {
            tracing::trace!(extension = ext.name(), "delimiter overlaps an inline node");
            return None;
        }
        Some((ext, token, inner))
    }

    /// Push unclaimed pieces, descending into emphasis and links.
    fn emit(&mut self, out: &mut Vec<Piece<'a>>, pieces: Vec<Piece<'a>>) {
        for piece in pieces {
            if let Piece::Node(node) = piece {
                if is_inline_container(node) {
                    self.rewrite_children(node);
                }
            }
            out.push(piece);
        }
    }

    /// Source text behind `pieces`, for token reporting.
    fn source_text(&self, pieces: &[Piece<'_>]) -> String {
        pieces
            .iter()
            .map(|piece| match piece {
                Piece::Text(text) => text.as_str(),
                Piece::Node(node) if is_break(node) => "\n",
                Piece::Node(node) => self.source_span(node.data.borrow().sourcepos),
                Piece::Html(_) => "",
            })
            .collect()
    }

    fn source_span(&self, pos: Sourcepos) -> &'r str {
        let offset = |line: usize, column: usize| {
            self.line_starts
                .get(line.checked_sub(1)?)
                .map(|start| start + column)
        };
        let start = offset(pos.start.line, pos.start.column).and_then(|o| o.checked_sub(1));
        let end = offset(pos.end.line, pos.end.column);
        match (start, end) {
            (Some(start), Some(end)) => self.source.get(start..end).unwrap_or_default(),
            _ => "",
        }
    }
}

fn strip_reserved(text: &str) -> Cow<'_, str> {
    if text.contains(&RESERVED[..]) {
        Cow::Owned(text.replace(&RESERVED[..], ""))
    } else {
        Cow::Borrowed(text)
    }
}

fn strip_paragraph(html: &str) -> String {
    let trimmed = html.trim_end_matches('\n');
    let inner = trimmed
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
        .filter(|inner| !inner.contains("<p>"))
        .unwrap_or(trimmed);
    inner.replace(INLINE_ANCHOR, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Renderer {
        Renderer::new(RenderOptions {
            highlight: false,
            ..RenderOptions::default()
        })
    }

    // --- Extension rendering ---

    #[test]
    fn test_underline_renders_u_tag() {
        assert_eq!(plain().render("==hello=="), "<p><u>hello</u></p>\n");
    }

    #[test]
    fn test_color_renders_span_with_exact_value() {
        assert_eq!(
            plain().render("%#ff8800%warm%%"),
            "<p><span style=\"color:#ff8800\">warm</span></p>\n"
        );
    }

    #[test]
    fn test_right_and_center_render_blocks() {
        assert_eq!(
            plain().render("->right->"),
            "<p><span style=\"display:block;text-align:right;\">right</span></p>\n"
        );
        assert_eq!(
            plain().render("->middle<-"),
            "<p><span style=\"display:block;text-align:center;\">middle</span></p>\n"
        );
    }

    #[test]
    fn test_nested_content_is_rendered_inline() {
        assert_eq!(
            plain().render("==**bold** and *em*=="),
            "<p><u><strong>bold</strong> and <em>em</em></u></p>\n"
        );
    }

    #[test]
    fn test_extensions_nest_inside_each_other() {
        assert_eq!(
            plain().render("%red%a ==b== c%%"),
            "<p><span style=\"color:red\">a <u>b</u> c</span></p>\n"
        );
    }

    #[test]
    fn test_extension_inside_emphasis() {
        assert_eq!(
            plain().render("**==x==**"),
            "<p><strong><u>x</u></strong></p>\n"
        );
    }

    #[test]
    fn test_surrounding_text_is_preserved() {
        assert_eq!(
            plain().render("before ==mid== after"),
            "<p>before <u>mid</u> after</p>\n"
        );
    }

    #[test]
    fn test_extension_in_heading() {
        assert_eq!(plain().render("# Title ==u=="), "<h1>Title <u>u</u></h1>\n");
    }

    // --- Known ambiguity ---

    #[test]
    fn test_known_limitation_right_claims_shared_trigger_first() {
        // `->A<-B->` reads like a centered `A` followed by `B->`, but the
        // right-align pattern is registered first and matches, so it wins.
        assert_eq!(
            plain().render("->A<-B->"),
            "<p><span style=\"display:block;text-align:right;\">A&lt;-B</span></p>\n"
        );
    }

    #[test]
    fn test_known_limitation_center_first_changes_output() {
        let registry = Registry::empty()
            .with(Extension::Underline)
            .with(Extension::Color)
            .with(Extension::Center)
            .with(Extension::Right);
        let renderer = plain().with_registry(registry);
        assert_eq!(
            renderer.render("->A<-B->"),
            "<p><span style=\"display:block;text-align:center;\">A</span>B-&gt;</p>\n"
        );
    }

    // --- Fallthrough ---

    #[test]
    fn test_unterminated_syntax_is_literal() {
        assert_eq!(plain().render("==text"), "<p>==text</p>\n");
        assert_eq!(plain().render("%red%text"), "<p>%red%text</p>\n");
        assert_eq!(plain().render("a -> b"), "<p>a -&gt; b</p>\n");
    }

    #[test]
    fn test_empty_registry_leaves_syntax_alone() {
        let renderer = plain().with_registry(Registry::empty());
        assert_eq!(renderer.render("==x=="), "<p>==x==</p>\n");
    }

    #[test]
    fn test_code_span_is_not_dispatched() {
        assert_eq!(
            plain().render("`==x==` ==y=="),
            "<p><code>==x==</code> <u>y</u></p>\n"
        );
    }

    #[test]
    fn test_unclosed_backticks_do_not_block_extensions() {
        assert_eq!(plain().render("` ==y=="), "<p>` <u>y</u></p>\n");
    }

    #[test]
    fn test_escaped_trigger_is_literal() {
        assert_eq!(plain().render(r"\==x=="), "<p>==x==</p>\n");
    }

    #[test]
    fn test_link_destination_is_not_dispatched() {
        assert_eq!(
            plain().render("[==t==](http://a.com/x==y==)"),
            "<p><a href=\"http://a.com/x==y==\"><u>t</u></a></p>\n"
        );
    }

    #[test]
    fn test_fenced_code_is_verbatim() {
        let html = plain().render("```\n==x==\n```\n");
        assert_eq!(html, "<pre><code>==x==\n</code></pre>\n");
    }

    #[test]
    fn test_syntax_does_not_span_blank_line() {
        assert_eq!(plain().render("==a\n\nb=="), "<p>==a</p>\n<p>b==</p>\n");
    }

    #[test]
    fn test_reserved_characters_are_stripped() {
        assert_eq!(plain().render("a\u{E000}0\u{E001}b"), "<p>a0b</p>\n");
    }

    // --- Block boundaries ---

    #[test]
    fn test_syntax_does_not_span_list_items() {
        assert_eq!(
            plain().render("- ==a\n- b=="),
            "<ul>\n<li>==a</li>\n<li>b==</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_extension_inside_list_item() {
        assert_eq!(
            plain().render("- ==a==\n- b"),
            "<ul>\n<li><u>a</u></li>\n<li>b</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_extension_inside_blockquote() {
        assert_eq!(
            plain().render("> ==a=="),
            "<blockquote>\n<p><u>a</u></p>\n</blockquote>\n"
        );
    }

    #[test]
    fn test_blockquote_paragraph_keeps_its_soft_break() {
        assert_eq!(
            plain().render("> ==a\n> b=="),
            "<blockquote>\n<p><u>a<br />\nb</u></p>\n</blockquote>\n"
        );
    }

    #[test]
    fn test_heading_does_not_reach_into_next_paragraph() {
        assert_eq!(plain().render("# ==a\nb=="), "<h1>==a</h1>\n<p>b==</p>\n");
    }

    #[test]
    fn test_color_does_not_wrap_following_list() {
        assert_eq!(
            plain().render("%red%a\n- b%%"),
            "<p>%red%a</p>\n<ul>\n<li>b%%</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_fence_inside_blockquote_is_verbatim() {
        assert_eq!(
            plain().render("> ~~~\n> ==x==\n> ~~~\n"),
            "<blockquote>\n<pre><code>==x==\n</code></pre>\n</blockquote>\n"
        );
    }

    #[test]
    fn test_extension_in_table_cell() {
        let html = plain().render("| a |\n|---|\n| ==b== |\n");
        assert!(html.contains("<td><u>b</u></td>"), "{html}");
    }

    // --- Opaque inline nodes ---

    #[test]
    fn test_image_alt_text_stays_literal() {
        assert_eq!(
            plain().render("![%red%x%%](a.png)"),
            "<p><img src=\"a.png\" alt=\"%red%x%%\" /></p>\n"
        );
    }

    #[test]
    fn test_bare_autolink_keeps_its_href() {
        let html = plain().render("see https://a.com/p==x==q");
        assert!(html.contains(r#"href="https://a.com/p==x==q""#), "{html}");
        assert!(!html.contains("<u>"), "{html}");
    }

    #[test]
    fn test_angle_autolink_keeps_its_href() {
        let html = plain().render("<https://a.com/==x==>");
        assert!(html.contains(r#"href="https://a.com/==x==""#), "{html}");
        assert!(!html.contains("<u>"), "{html}");
    }

    #[test]
    fn test_raw_html_attributes_are_untouched() {
        let renderer = Renderer::new(RenderOptions {
            raw_html: true,
            highlight: false,
            ..RenderOptions::default()
        });
        assert_eq!(
            renderer.render(r#"<a title="==x==">t</a>"#),
            "<p><a title=\"==x==\">t</a></p>\n"
        );
    }

    #[test]
    fn test_delimiter_cannot_contain_code_span() {
        assert_eq!(
            plain().render("%`red`%a%%"),
            "<p>%<code>red</code>%a%%</p>\n"
        );
    }

    #[test]
    fn test_nested_content_spans_code_span() {
        assert_eq!(
            plain().render("==a `b` c=="),
            "<p><u>a <code>b</code> c</u></p>\n"
        );
    }

    // --- Options ---

    #[test]
    fn test_hard_breaks_default_on() {
        assert_eq!(plain().render("a\nb"), "<p>a<br />\nb</p>\n");
    }

    #[test]
    fn test_hard_breaks_can_be_disabled() {
        let renderer = Renderer::new(RenderOptions {
            hard_breaks: false,
            highlight: false,
            ..RenderOptions::default()
        });
        assert_eq!(renderer.render("a\nb"), "<p>a\nb</p>\n");
    }

    #[test]
    fn test_gfm_strikethrough() {
        assert_eq!(plain().render("~~gone~~"), "<p><del>gone</del></p>\n");
    }

    #[test]
    fn test_gfm_alert() {
        assert_eq!(
            plain().render("> [!NOTE]\n> Heads ==up=="),
            "<div class=\"markdown-alert markdown-alert-note\">\n\
             <p class=\"markdown-alert-title\">Note</p>\n\
             <p>Heads <u>up</u></p>\n</div>\n"
        );
    }

    #[test]
    fn test_alert_needs_gfm() {
        let renderer = Renderer::new(RenderOptions {
            gfm: false,
            highlight: false,
            ..RenderOptions::default()
        });
        let html = renderer.render("> [!NOTE]\n> hi");
        assert!(html.starts_with("<blockquote>"), "{html}");
    }

    #[test]
    fn test_raw_html_omitted_by_default() {
        let html = plain().render("<b>x</b>");
        assert!(!html.contains("<b>"), "raw html leaked: {html}");
    }

    #[test]
    fn test_raw_html_passes_when_enabled() {
        let renderer = Renderer::new(RenderOptions {
            raw_html: true,
            highlight: false,
            ..RenderOptions::default()
        });
        assert_eq!(renderer.render("<b>x</b>"), "<p><b>x</b></p>\n");
    }

    // --- Inline rendering ---

    #[test]
    fn test_render_inline_has_no_paragraph() {
        assert_eq!(plain().render_inline("*a*"), "<em>a</em>");
    }

    #[test]
    fn test_render_inline_applies_extensions() {
        assert_eq!(plain().render_inline("==x=="), "<u>x</u>");
    }

    #[test]
    fn test_render_inline_ignores_block_markers() {
        assert_eq!(plain().render_inline("# not a heading"), "# not a heading");
        assert_eq!(plain().render_inline("    not code"), "    not code");
    }

    // --- Tokens ---

    #[test]
    fn test_tokens_in_document_order() {
        let tokens = plain().tokens("==a== then %blue%b%%\n\n->c<-");
        let raws: Vec<&str> = tokens.iter().map(Token::raw).collect();
        assert_eq!(raws, vec!["==a==", "%blue%b%%", "->c<-"]);
    }

    #[test]
    fn test_tokens_skip_code() {
        assert!(plain().tokens("```\n==a==\n```\n`==b==`").is_empty());
    }

    #[test]
    fn test_tokens_report_source_of_nested_markup() {
        let tokens = plain().tokens("==**bold** `c`==");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].raw(), "==**bold** `c`==");
        assert_eq!(tokens[0].text(), "**bold** `c`");
    }

    #[test]
    fn test_tokens_list_only_outer_match() {
        let tokens = plain().tokens("%red%a ==b== c%%");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text(), "a ==b== c");
    }

    // --- Properties ---

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn underline_wraps_any_plain_text(text in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,20}[a-zA-Z0-9]") {
                let renderer = plain();
                let html = renderer.render(&format!("=={text}=="));
                let expected = format!("<p><u>{}</u></p>\n", renderer.render_inline(&text));
                prop_assert_eq!(html, expected);
            }

            #[test]
            fn color_keeps_value_verbatim(
                color in "#[0-9a-f]{3}|#[0-9a-f]{6}",
                text in "[a-z][a-z ]{0,12}[a-z]",
            ) {
                let renderer = plain();
                let html = renderer.render(&format!("%{color}%{text}%%"));
                let expected = format!("style=\"color:{color}\">{}</span>", renderer.render_inline(&text));
                prop_assert!(html.contains(&expected), "{}", html);
            }
        }
    }
}

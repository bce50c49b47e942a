//! Syntax highlighting for rendered code blocks.
//!
//! Uses syntect with Sublime Text syntax definitions. Fenced blocks that
//! name a language come out of comrak as `<pre><code class="language-X">`;
//! their contents are re-emitted as inline-styled spans.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre><code class="language-([^"\s]+)">(.*?)</code></pre>"#)
        .expect("code block pattern")
});

/// Which page background the highlight palette should suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightBackground {
    #[default]
    Light,
    Dark,
}

/// Highlight every language-tagged code block in `html`.
///
/// Blocks in a language syntect does not know are left as they are.
pub fn highlight_html(html: &str, background: HighlightBackground) -> String {
    CODE_BLOCK
        .replace_all(html, |caps: &Captures<'_>| {
            let language = &caps[1];
            let code = unescape_html(&caps[2]);
            highlight_code(Some(language), &code, background).map_or_else(
                || caps[0].to_string(),
                |body| format!(r#"<pre><code class="language-{language}">{body}</code></pre>"#),
            )
        })
        .into_owned()
}

/// Highlight `code` as HTML spans, or `None` if the language is unknown.
pub fn highlight_code(
    language: Option<&str>,
    code: &str,
    background: HighlightBackground,
) -> Option<String> {
    let syntax_set = syntax_set();
    let syntax = language
        .and_then(|lang| syntax_set.find_syntax_by_token(lang))
        .or_else(|| language.and_then(|lang| syntax_set.find_syntax_by_name(lang)))?;

    let mut highlighter = HighlightLines::new(syntax, theme(background));
    let mut out = String::with_capacity(code.len() * 2);
    for line in LinesWithEndings::from(code) {
        let ranges = highlighter.highlight_line(line, syntax_set).ok()?;
        out.push_str(&styled_line_to_highlighted_html(&ranges, IncludeBackground::No).ok()?);
    }
    Some(out)
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(|| {
        tracing::debug!("loading default syntax set");
        SyntaxSet::load_defaults_newlines()
    });
    &SYNTAX_SET
}

fn theme(background: HighlightBackground) -> &'static Theme {
    static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);
    static FALLBACK: LazyLock<Theme> = LazyLock::new(Theme::default);

    let preferred = match background {
        HighlightBackground::Dark => {
            ["base16-ocean.dark", "Solarized (dark)", "base16-eighties.dark"].as_slice()
        }
        HighlightBackground::Light => {
            ["InspiredGitHub", "Solarized (light)", "base16-ocean.light"].as_slice()
        }
    };

    preferred
        .iter()
        .find_map(|name| THEME_SET.themes.get(*name))
        .or_else(|| THEME_SET.themes.values().next())
        .unwrap_or(&*FALLBACK)
}

/// comrak escapes code block text; syntect escapes it again on output.
fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

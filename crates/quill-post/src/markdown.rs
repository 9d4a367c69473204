//! Markdown compilation.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, html};
use quill_slug::escape_html;

/// Parser options for post markdown.
///
/// GFM adds tables, strikethrough, task lists and alert blockquotes.
/// Footnotes are always enabled. `{#id .class}` heading attributes are not:
/// heading IDs come from the anchor injector so the table of contents can
/// link to them.
#[must_use]
pub fn parser_options(gfm: bool) -> Options {
    let base = Options::ENABLE_FOOTNOTES;
    if gfm {
        base | Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    } else {
        base
    }
}

/// Compile markdown to HTML.
///
/// Fenced code blocks with an info string render as
/// `<pre data-language="…"><code class="language-…">` so highlighters and
/// the sanitizer agree on the markup.
///
/// # Examples
///
/// ```
/// let html = quill_post::compile_markdown("## Hello *world*", true);
/// assert_eq!(html, "<h2>Hello <em>world</em></h2>\n");
/// ```
#[must_use]
pub fn compile_markdown(markdown: &str, gfm: bool) -> String {
    let parser = Parser::new_ext(markdown, parser_options(gfm)).map(|event| match event {
        Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => match fence_language(&info) {
            Some(language) => {
                let language = escape_html(language);
                Event::Html(CowStr::from(format!(
                    r#"<pre data-language="{language}"><code class="language-{language}">"#
                )))
            }
            None => Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))),
        },
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Language from a fence info string (`rust,ignore` → `rust`).
fn fence_language(info: &str) -> Option<&str> {
    info.split([' ', ',', '{'])
        .next()
        .map(str::trim)
        .filter(|language| !language.is_empty())
}

//! Conversion of an HTML fragment into a UI forest.

use std::collections::BTreeMap;

use ego_tree::NodeRef;
use quill_sanitize::{HREF_SCHEMES, SRC_SCHEMES, merge_rel, sanitize, sanitize_url};
use scraper::{Html, Node};

use crate::attrs::{is_event_handler, prop_name};
use crate::node::{PropValue, UiElement, UiNode};
use crate::style::parse_style;

/// Parents whose whitespace-only text children are not valid UI children.
const TABLE_STRUCTURE_TAGS: &[&str] = &["table", "thead", "tbody", "tfoot", "tr", "colgroup"];

/// Sanitize `html` with the blog policy and render it.
///
/// Never fails: the parser recovers from malformed markup, and nodes that
/// cannot be represented render as nothing.
///
/// # Examples
///
/// ```
/// use quill_renderer::{UiNode, render};
///
/// let forest = render(r#"<span class="lead" onclick="x()">Hi</span>"#);
/// let UiNode::Element(span) = &forest[0] else { panic!("expected element") };
/// assert_eq!(span.tag, "span");
/// assert_eq!(span.prop("className"), Some("lead"));
/// assert!(span.prop("onclick").is_none());
/// ```
#[must_use]
pub fn render(html: &str) -> Vec<UiNode> {
    render_unsanitized(&sanitize(html))
}

/// Render HTML that has already been sanitized.
///
/// The per-attribute guards (event handlers, URL schemes, inline styles)
/// still apply.
#[must_use]
pub fn render_unsanitized(html: &str) -> Vec<UiNode> {
    let fragment = Html::parse_fragment(html);
    // Fragment content is parented by a synthetic <html> element.
    let root = fragment.root_element();
    convert_children(*root, "", None)
}

fn convert_children(parent: NodeRef<'_, Node>, parent_tag: &str, key: Option<&str>) -> Vec<UiNode> {
    let drop_whitespace = TABLE_STRUCTURE_TAGS.contains(&parent_tag);

    parent
        .children()
        .enumerate()
        .filter_map(|(index, child)| {
            let child_key = match key {
                Some(prefix) => format!("{prefix}.{index}"),
                None => index.to_string(),
            };
            convert_node(child, child_key, drop_whitespace)
        })
        .collect()
}

fn convert_node(node: NodeRef<'_, Node>, key: String, drop_whitespace: bool) -> Option<UiNode> {
    match node.value() {
        Node::Text(text) => {
            let text: &str = text;
            if drop_whitespace && text.trim().is_empty() {
                return None;
            }
            Some(UiNode::Text(text.to_owned()))
        }
        Node::Element(element) => {
            let tag = element.name().to_ascii_lowercase();
            let props = convert_attributes(&tag, element.attrs());
            let children = convert_children(node, &tag, Some(&key));
            Some(UiNode::Element(UiElement {
                tag,
                key,
                props,
                children,
            }))
        }
        // Comments, doctypes and processing instructions have no UI form.
        _ => None,
    }
}

fn convert_attributes<'a>(
    tag: &str,
    attrs: impl Iterator<Item = (&'a str, &'a str)>,
) -> BTreeMap<String, PropValue> {
    let mut props = BTreeMap::new();
    let mut rel = None;
    let mut blank_target = false;

    for (name, value) in attrs {
        if is_event_handler(name) {
            tracing::debug!(tag, attribute = name, "Dropped event handler attribute");
            continue;
        }

        match name.to_ascii_lowercase().as_str() {
            "style" => {
                let style = parse_style(value);
                if !style.is_empty() {
                    props.insert("style".to_owned(), PropValue::Style(style));
                }
            }
            "href" => insert_url(&mut props, tag, "href", value, HREF_SCHEMES),
            "src" => insert_url(&mut props, tag, "src", value, SRC_SCHEMES),
            "rel" => rel = Some(value),
            "target" => {
                blank_target = value.trim().eq_ignore_ascii_case("_blank");
                props.insert("target".to_owned(), PropValue::Text(value.to_owned()));
            }
            _ => {
                props.insert(prop_name(name), PropValue::Text(value.to_owned()));
            }
        }
    }

    if blank_target {
        props.insert("rel".to_owned(), PropValue::Text(merge_rel(rel)));
    } else if let Some(rel) = rel {
        props.insert("rel".to_owned(), PropValue::Text(rel.to_owned()));
    }

    props
}

fn insert_url(
    props: &mut BTreeMap<String, PropValue>,
    tag: &str,
    name: &str,
    value: &str,
    schemes: &[&str],
) {
    match sanitize_url(value, schemes) {
        Some(url) => {
            props.insert(name.to_owned(), PropValue::Text(url));
        }
        None => tracing::debug!(tag, attribute = name, "Dropped unsafe URL attribute"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn element(node: &UiNode) -> &UiElement {
        node.as_element().expect("expected element")
    }

    fn text(value: &str) -> UiNode {
        UiNode::Text(value.to_owned())
    }

    #[test]
    fn test_renders_forest_in_document_order() {
        let forest = render("<h2>Title</h2><p>One</p><p>Two</p>");
        let tags: Vec<&str> = forest.iter().map(|n| element(n).tag.as_str()).collect();
        assert_eq!(tags, ["h2", "p", "p"]);
        assert_eq!(forest[2].text_content(), "Two");
    }

    #[test]
    fn test_keys_follow_position_path() {
        let forest = render("<ul><li>a</li><li><em>b</em></li></ul>");
        let ul = element(&forest[0]);
        assert_eq!(ul.key, "0");
        let second = ul.child_elements().nth(1).unwrap();
        assert_eq!(second.key, "0.1");
        assert_eq!(second.child_elements().next().unwrap().key, "0.1.0");
    }

    #[test]
    fn test_table_whitespace_suppressed() {
        let html = "<table>\n  <tbody>\n    <tr>\n      <td> a </td>\n    </tr>\n    <tr><td>b</td></tr>\n  </tbody>\n</table>";
        let forest = render_unsanitized(html);
        let table = element(&forest[0]);
        assert_eq!(table.children.len(), 1);
        let tbody = element(&table.children[0]);
        assert_eq!(tbody.tag, "tbody");
        assert!(tbody.children.iter().all(|c| c.as_element().is_some()));
        assert_eq!(tbody.children.len(), 2);
        let td = tbody.child_elements().next().unwrap().child_elements().next().unwrap();
        assert_eq!(td.children, vec![text(" a ")]);
    }

    #[test]
    fn test_whitespace_kept_outside_tables() {
        let forest = render_unsanitized("<p><em>a</em> <em>b</em></p>");
        let p = element(&forest[0]);
        assert_eq!(p.children.len(), 3);
        assert_eq!(p.children[1], text(" "));
    }

    #[test]
    fn test_attribute_translation() {
        let forest = render_unsanitized(
            r#"<table><tbody><tr><td colspan="2" rowspan="3" class="num" data-x="1" aria-label="cell">1</td></tr></tbody></table>"#,
        );
        let td = element(&forest[0])
            .child_elements()
            .next()
            .and_then(|tbody| tbody.child_elements().next())
            .and_then(|tr| tr.child_elements().next())
            .unwrap();
        assert_eq!(td.prop("colSpan"), Some("2"));
        assert_eq!(td.prop("rowSpan"), Some("3"));
        assert_eq!(td.prop("className"), Some("num"));
        assert_eq!(td.prop("data-x"), Some("1"));
        assert_eq!(td.prop("aria-label"), Some("cell"));
    }

    #[test]
    fn test_event_handlers_dropped_without_sanitizer() {
        let forest = render_unsanitized(r#"<p onclick="x()" ONMOUSEOVER="y()" id="p">t</p>"#);
        let p = element(&forest[0]);
        assert_eq!(p.props.len(), 1);
        assert_eq!(p.prop("id"), Some("p"));
    }

    #[test]
    fn test_href_guard() {
        let forest = render_unsanitized(
            r#"<a href="//evil.com">a</a><a href="/ok">b</a><a href=" https://example.com ">c</a>"#,
        );
        assert_eq!(element(&forest[0]).prop("href"), None);
        assert_eq!(element(&forest[1]).prop("href"), Some("/ok"));
        assert_eq!(
            element(&forest[2]).prop("href"),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_src_guard_is_narrower() {
        let forest = render_unsanitized(
            r#"<img src="mailto:a@b.c" alt="x"><img src="https://cdn.example.com/a.png" alt="y">"#,
        );
        let first = element(&forest[0]);
        assert_eq!(first.prop("src"), None);
        assert_eq!(first.prop("alt"), Some("x"));
        assert_eq!(
            element(&forest[1]).prop("src"),
            Some("https://cdn.example.com/a.png")
        );
    }

    #[test]
    fn test_blank_target_merges_rel() {
        let forest = render(r#"<a href="https://example.com" target="_blank" rel="nofollow">x</a>"#);
        let a = element(&forest[0]);
        assert_eq!(a.prop("target"), Some("_blank"));
        assert_eq!(a.prop("rel"), Some("nofollow noopener noreferrer"));

        let forest = render(r#"<a href="/x" rel="author">x</a>"#);
        assert_eq!(element(&forest[0]).prop("rel"), Some("author"));
    }

    #[test]
    fn test_style_parsed_and_filtered() {
        let forest = render_unsanitized(
            r#"<span style="color: red; width: expression(alert(1))">x</span><span style="width: expression(1)">y</span>"#,
        );
        let first = element(&forest[0]);
        let style = first.style().unwrap();
        assert_eq!(style.get("color").map(String::as_str), Some("red"));
        assert!(!style.contains_key("width"));
        assert!(element(&forest[1]).props.is_empty());
    }

    #[test]
    fn test_pre_contents_stay_parsed() {
        let html = r#"<pre data-language="rust"><code class="language-rust"><span class="kw">fn</span> main() {}</code></pre>"#;
        let forest = render(html);
        let pre = element(&forest[0]);
        assert_eq!(pre.prop("data-language"), Some("rust"));
        let code = pre.child_elements().next().unwrap();
        assert_eq!(code.prop("className"), Some("language-rust"));
        let span = code.child_elements().next().unwrap();
        assert_eq!(span.tag, "span");
        assert_eq!(span.prop("className"), Some("kw"));
        assert_eq!(code.children[1], text(" main() {}"));
    }

    #[test]
    fn test_comments_dropped() {
        let forest = render_unsanitized("<p>a<!-- hidden -->b</p>");
        let p = element(&forest[0]);
        assert_eq!(p.children, vec![text("a"), text("b")]);
    }

    #[test]
    fn test_svg_attributes_translated() {
        let forest = render(
            r##"<a href="#top"><svg viewBox="0 0 16 16" aria-hidden="true"><path d="M0 0" fill-rule="evenodd"></path></svg></a>"##,
        );
        let svg = element(&forest[0]).child_elements().next().unwrap();
        assert_eq!(svg.tag, "svg");
        assert_eq!(svg.prop("viewBox"), Some("0 0 16 16"));
        assert_eq!(svg.prop("aria-hidden"), Some("true"));
        let path = svg.child_elements().next().unwrap();
        assert_eq!(path.prop("fillRule"), Some("evenodd"));
    }

    #[test]
    fn test_malformed_html_degrades() {
        let forest = render("<p>open <em>never closed<div>block</p></span>tail");
        assert!(!forest.is_empty());
        let all_text: String = forest.iter().map(UiNode::text_content).collect();
        assert!(all_text.contains("open"));
        assert!(all_text.contains("tail"));
    }

    #[test]
    fn test_script_removed_end_to_end() {
        let forest = render(r#"<script>alert(1)</script><p onclick="x()">hi</p>"#);
        assert_eq!(forest.len(), 1);
        let p = element(&forest[0]);
        assert_eq!(p.tag, "p");
        assert!(p.props.is_empty());
        assert_eq!(p.children, vec![text("hi")]);
    }

    #[test]
    fn test_class_follows_policy() {
        let forest = render(r#"<p class="lead">a</p><span class="lead" onclick="x()">b</span>"#);
        let p = element(&forest[0]);
        assert_eq!(p.prop("className"), None);
        let span = element(&forest[1]);
        assert_eq!(span.tag, "span");
        assert_eq!(span.prop("className"), Some("lead"));
        assert!(span.prop("onclick").is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(render("").is_empty());
        assert!(render("   ").iter().all(|n| matches!(n, UiNode::Text(_))));
    }
}

// File: ./src/render/html.rs
use crate::render::RenderNode;

const VOID_TAGS: &[&str] = &["img", "br", "hr"];

/// Serializes a render tree to HTML markup. Text and attribute values are escaped.
pub fn to_html(node: &RenderNode) -> String {
    let mut out = String::new();
    write_node(node, 0, &mut out);
    out
}

fn write_node(node: &RenderNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(&node.tag);
    if !node.class.is_empty() {
        out.push_str(&format!(" class=\"{}\"", escape(&node.class)));
    }
    for (key, value) in &node.attrs {
        out.push_str(&format!(" {}=\"{}\"", key, escape(value)));
    }
    out.push('>');

    if VOID_TAGS.contains(&node.tag.as_str()) {
        out.push('\n');
        return;
    }

    if let Some(text) = &node.text {
        out.push_str(&escape(text));
    }

    if node.children.is_empty() {
        out.push_str(&format!("</{}>\n", node.tag));
        return;
    }

    out.push('\n');
    for child in &node.children {
        write_node(child, depth + 1, out);
    }
    out.push_str(&indent);
    out.push_str(&format!("</{}>\n", node.tag));
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_markup() {
        let tree = RenderNode::new("div", "game-logos").with_children([
            RenderNode::new("img", "team-logo").with_attr("alt", "Heat \"Logo\""),
            RenderNode::text("div", "vs", "vs"),
        ]);
        assert_eq!(
            to_html(&tree),
            "<div class=\"game-logos\">\n  <img class=\"team-logo\" alt=\"Heat &quot;Logo&quot;\">\n  <div class=\"vs\">vs</div>\n</div>\n"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let node = RenderNode::text("span", "team-text", "Tom & Jerry <3");
        assert_eq!(
            to_html(&node),
            "<span class=\"team-text\">Tom &amp; Jerry &lt;3</span>\n"
        );
    }
}

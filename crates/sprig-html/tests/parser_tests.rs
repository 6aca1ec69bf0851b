//! Integration tests for the tree builder, driven through the tokenizer.

use serde_json::json;
use sprig_dom::{DomTree, NodeId, NodeType};
use sprig_html::{HTMLTokenizer, HTMLTreeBuilder, parse_document, parse_document_with_issues};

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if let Some(data) = tree.as_element(from)
        && data.tag_name == tag
    {
        return Some(from);
    }
    for &child_id in tree.children(from) {
        if let Some(found) = find_element(tree, child_id, tag) {
            return Some(found);
        }
    }
    None
}

/// Helper to count elements in the whole tree
fn count_elements(tree: &DomTree, from: NodeId) -> usize {
    let own = usize::from(tree.as_element(from).is_some());
    own + tree
        .children(from)
        .iter()
        .map(|&child| count_elements(tree, child))
        .sum::<usize>()
}

#[test]
fn test_plain_text_is_one_text_node() {
    let tree = parse_document("just some text, no markup");
    let children = tree.children(NodeId::ROOT);
    assert_eq!(children.len(), 1);
    assert_eq!(tree.as_text(children[0]), Some("just some text, no markup"));
}

#[test]
fn test_empty_input_is_empty_document() {
    let tree = parse_document("");
    assert_eq!(tree.len(), 1);
    assert!(tree.children(NodeId::ROOT).is_empty());
}

#[test]
fn test_element_with_attribute_and_text() {
    let tree = parse_document(r#"<tag attr="v">text</tag>"#);
    let tag = find_element(&tree, NodeId::ROOT, "tag").unwrap();
    let data = tree.as_element(tag).unwrap();
    assert_eq!(data.attribute("attr"), Some("v"));
    assert_eq!(data.attrs.len(), 1);

    let children = tree.children(tag);
    assert_eq!(children.len(), 1);
    assert_eq!(tree.as_text(children[0]), Some("text"));
}

#[test]
fn test_self_closing_has_no_children() {
    let tree = parse_document(r#"<p><img src="a" />after</p>"#);
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    let img = find_element(&tree, NodeId::ROOT, "img").unwrap();
    assert!(tree.children(img).is_empty());
    assert_eq!(tree.as_element(img).unwrap().attribute("src"), Some("a"));

    // "after" lands beside the image, not inside it
    let children = tree.children(p);
    assert_eq!(children.len(), 2);
    assert_eq!(children[0], img);
    assert_eq!(tree.as_text(children[1]), Some("after"));
}

#[test]
fn test_self_closing_returns_stack_to_parent() {
    let mut tokenizer = HTMLTokenizer::new(HTMLTreeBuilder::new());
    tokenizer.feed_str("<div><br/>");
    let builder = tokenizer.sink();
    let div = find_element(builder.output(), NodeId::ROOT, "div").unwrap();
    assert_eq!(builder.open_elements(), &[NodeId::ROOT, div]);
}

#[test]
fn test_case_folding() {
    let tree = parse_document(r#"<DIV CLASS="x"></DIV>"#);
    let div = tree.first_child(NodeId::ROOT).unwrap();
    let data = tree.as_element(div).unwrap();
    assert_eq!(data.tag_name, "div");
    assert_eq!(data.attribute("class"), Some("x"));
}

#[test]
fn test_character_reference_kept_verbatim() {
    let tree = parse_document("&amp;");
    let children = tree.children(NodeId::ROOT);
    assert_eq!(children.len(), 1);
    assert_eq!(tree.as_text(children[0]), Some("&amp;"));
}

#[test]
fn test_text_fragments_coalesce_around_references() {
    let tree = parse_document("<p>fish &amp; chips</p>");
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    let children = tree.children(p);
    assert_eq!(children.len(), 1);
    assert_eq!(tree.as_text(children[0]), Some("fish &amp; chips"));
}

#[test]
fn test_nesting() {
    let tree = parse_document("<a><b>x</b></a>");
    let a = tree.first_child(NodeId::ROOT).unwrap();
    assert_eq!(tree.as_element(a).unwrap().tag_name, "a");
    assert_eq!(tree.children(a).len(), 1);

    let b = tree.first_child(a).unwrap();
    assert_eq!(tree.as_element(b).unwrap().tag_name, "b");

    let x = tree.first_child(b).unwrap();
    assert_eq!(tree.as_text(x), Some("x"));

    let chain: Vec<NodeId> = tree.ancestors(x).collect();
    assert_eq!(chain, vec![b, a, NodeId::ROOT]);
}

#[test]
fn test_stack_unwinds_in_reverse_order() {
    let mut tokenizer = HTMLTokenizer::new(HTMLTreeBuilder::new());
    let mut depths = Vec::new();
    for c in "<a><b>x</b></a>".chars() {
        tokenizer.feed(c);
        if c == '>' {
            depths.push(tokenizer.sink().open_elements().len());
        }
    }
    // <a> <b> (text opens, then </b> pops text and b) </a>
    assert_eq!(depths, vec![2, 3, 2, 1]);
}

#[test]
fn test_unexpected_character_reports_once_and_builds_nothing() {
    let (tree, issues) = parse_document_with_issues("<1>");
    assert_eq!(issues.len(), 1);
    assert!(issues[0].is_error);
    assert_eq!(issues[0].message, "unexpected character '1'");
    assert_eq!(count_elements(&tree, NodeId::ROOT), 0);
}

#[test]
fn test_stray_lt_in_text_drops_the_rest_of_the_input() {
    let (tree, issues) = parse_document_with_issues("1 < 2 and <b>bold</b>");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].message, "unexpected character ' '");
    let children = tree.children(NodeId::ROOT);
    assert_eq!(children.len(), 1);
    assert_eq!(tree.as_text(children[0]), Some("1 "));
    assert!(find_element(&tree, NodeId::ROOT, "b").is_none());
}

#[test]
fn test_mismatched_end_tags_close_top_of_stack() {
    let tree = parse_document("<a><b></a>c</b>");
    let a = find_element(&tree, NodeId::ROOT, "a").unwrap();
    let b = find_element(&tree, NodeId::ROOT, "b").unwrap();
    assert_eq!(tree.parent(b), Some(a));
    // </a> closed b, so the text belongs to a
    let text = tree.children(a)[1];
    assert_eq!(tree.as_text(text), Some("c"));
}

#[test]
fn test_stray_end_tag_is_a_warning() {
    let (tree, issues) = parse_document_with_issues("x</p>y");
    assert_eq!(issues.len(), 1);
    assert!(!issues[0].is_error);
    assert!(issues[0].message.contains("</p>"));
    // the end tag still closed the first text node
    let children = tree.children(NodeId::ROOT);
    assert_eq!(children.len(), 2);
    assert_eq!(tree.as_text(children[0]), Some("x"));
    assert_eq!(tree.as_text(children[1]), Some("y"));
}

#[test]
fn test_partial_output_mid_parse() {
    let mut tokenizer = HTMLTokenizer::new(HTMLTreeBuilder::new());
    tokenizer.feed_str("<ul><li>one");
    let partial = tokenizer.sink().output().clone();
    assert!(find_element(&partial, NodeId::ROOT, "li").is_some());

    tokenizer.feed_str("</li></ul>");
    let builder = tokenizer.into_sink();
    assert_eq!(builder.open_elements(), &[NodeId::ROOT]);
    assert_eq!(builder.output(), &partial);
}

#[test]
fn test_reset_and_fresh_builder_give_identical_trees() {
    let input = r#"<html lang="en" >
    <head>
      <title>cool</title>
    </head>
    <body>
      <img src="a" />
    </body>
</html>"#;
    let first = parse_document(input);

    let mut tokenizer = HTMLTokenizer::new(HTMLTreeBuilder::new());
    tokenizer.feed_str("<half");
    tokenizer.reset();
    *tokenizer.sink_mut() = HTMLTreeBuilder::new();
    tokenizer.feed_str(input);
    let second = tokenizer.into_sink().finish();

    assert_eq!(first, second);
}

#[test]
fn test_document_shape_serializes() {
    let tree = parse_document(r#"<html lang="en"><body><img src="a" />hi</body></html>"#);
    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "document",
            "children": [{
                "type": "element",
                "name": "html",
                "attributes": { "lang": "en" },
                "children": [{
                    "type": "element",
                    "name": "body",
                    "attributes": {},
                    "children": [
                        {
                            "type": "element",
                            "name": "img",
                            "attributes": { "src": "a" },
                            "children": []
                        },
                        { "type": "text", "value": "hi" }
                    ]
                }]
            }]
        })
    );
}

#[test]
fn test_whitespace_between_tags_is_text() {
    let tree = parse_document("<p>\n  <b></b>\n</p>");
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    let kinds: Vec<&str> = tree
        .children(p)
        .iter()
        .map(|&id| match tree.get(id).unwrap().node_type {
            NodeType::Document => "document",
            NodeType::Element(_) => "element",
            NodeType::Text(_) => "text",
        })
        .collect();
    assert_eq!(kinds, vec!["text", "element", "text"]);
}

//! XML utility functions for navigating OAI-PMH record trees.
//!
//! All lookups match by local tag name, ignoring namespace prefixes: feeds
//! bind the OAI envelope either as the default namespace or under a prefix,
//! and a re-parsed record fragment may carry no envelope declaration at all.
//! The header/payload namespace split of the source format is preserved
//! structurally instead, by scoping lookups to the `<header>` or
//! `<metadata>` subtree.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use wayne_harvester::xml::get_tag_name;
///
/// let xml = r#"<dc:title xmlns:dc="http://purl.org/dc/elements/1.1/">x</dc:title>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "title");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with the given local tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Find the first child element with the given tag name.
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_tag(*child, tag))
}

/// Find all descendant elements with the given tag name, in document order.
pub fn descendants_named<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants().filter(move |n| has_tag(*n, tag))
}

/// Non-empty, trimmed text of the first matching child element.
pub fn child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    find_child(node, tag).and_then(text_of)
}

/// First non-empty, trimmed text among descendants with the given tag name.
pub fn first_text<'a>(node: Node<'a, '_>, tag: &'a str) -> Option<String> {
    descendants_named(node, tag).find_map(text_of)
}

/// Every non-empty, trimmed text among descendants with the given tag name,
/// in document order.
pub fn collect_texts<'a>(node: Node<'a, '_>, tag: &'a str) -> Vec<String> {
    descendants_named(node, tag).filter_map(text_of).collect()
}

/// Raw source XML of a node's subtree.
///
/// `roxmltree` keeps byte offsets into its input, so the exact original
/// markup of a subtree can be recovered by slicing. `source` must be the
/// string the node's document was parsed from.
pub fn node_xml<'a>(node: Node<'_, '_>, source: &'a str) -> &'a str {
    &source[node.range()]
}

fn text_of(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

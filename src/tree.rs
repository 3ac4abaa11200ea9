//! HTML tree wrapper with raw-markup insertion.
//!
//! The base document produced by the rasterizer is parsed into a `scraper`
//! tree for lookup and mutation. Because the HTML serializer escapes text
//! nodes, backend-rendered fragments (which may contain `<?= ?>` or
//! `{% %}` syntax) cannot be inserted directly; [`TemplateDocument`] inserts
//! an inert placeholder token instead and substitutes the bound markup after
//! serialization (see [`crate::placeholder`]).

use ego_tree::NodeId;
use scraper::node::{Node, Text};
use scraper::{Html, Selector};

use crate::placeholder::PlaceholderStore;

/// A parsed base document plus the placeholder registry for raw insertions.
pub struct TemplateDocument {
    html: Html,
    placeholders: PlaceholderStore,
}

impl TemplateDocument {
    /// Parse a full HTML document.
    pub fn parse(document: &str) -> Self {
        Self {
            html: Html::parse_document(document),
            placeholders: PlaceholderStore::new(),
        }
    }

    /// Node ids of all elements matching a CSS selector, in tree order.
    ///
    /// An invalid selector matches nothing.
    pub fn node_ids(&self, css: &str) -> Vec<NodeId> {
        let selector = match Selector::parse(css) {
            Ok(s) => s,
            Err(_) => {
                log::debug!("Invalid selector ignored: {}", css);
                return Vec::new();
            },
        };
        self.html.select(&selector).map(|el| el.id()).collect()
    }

    /// Node id of the first element matching a CSS selector.
    pub fn node_id(&self, css: &str) -> Option<NodeId> {
        self.node_ids(css).into_iter().next()
    }

    /// Remove every element matching a CSS selector from the tree.
    pub fn decompose(&mut self, css: &str) {
        for id in self.node_ids(css) {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
            }
        }
    }

    /// Append `markup` as the last child of `node`, unescaped.
    ///
    /// The markup goes through the placeholder store, so it survives
    /// serialization byte-for-byte even when it contains template syntax.
    pub fn append_raw(&mut self, node: NodeId, markup: String) {
        let token = self.placeholders.insert(markup);
        if let Some(mut node) = self.html.tree.get_mut(node) {
            node.append(Node::Text(Text {
                text: token.as_str().into(),
            }));
        }
    }

    /// Insert `markup` as a sibling immediately before `node`, unescaped.
    pub fn insert_raw_before(&mut self, node: NodeId, markup: String) {
        let token = self.placeholders.insert(markup);
        if let Some(mut node) = self.html.tree.get_mut(node) {
            node.insert_before(Node::Text(Text {
                text: token.as_str().into(),
            }));
        }
    }

    /// Insert `markup` as a sibling immediately after `node`, unescaped.
    pub fn insert_raw_after(&mut self, node: NodeId, markup: String) {
        let token = self.placeholders.insert(markup);
        if let Some(mut node) = self.html.tree.get_mut(node) {
            node.insert_after(Node::Text(Text {
                text: token.as_str().into(),
            }));
        }
    }

    /// Rewrite every `<style>` element's text content.
    ///
    /// `f` receives the element's current CSS text and returns `None` to drop
    /// the whole element, or the replacement text. Style elements serialize as
    /// raw text, so the replacement needs no placeholder indirection.
    pub fn rewrite_styles<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> Option<String>,
    {
        let styles: Vec<(NodeId, String)> = self
            .node_ids("style")
            .into_iter()
            .filter_map(|id| {
                let node = self.html.tree.get(id)?;
                let el = scraper::ElementRef::wrap(node)?;
                Some((id, el.text().collect::<String>()))
            })
            .collect();

        for (id, css) in styles {
            match f(&css) {
                None => {
                    if let Some(mut node) = self.html.tree.get_mut(id) {
                        node.detach();
                    }
                },
                Some(replacement) if replacement != css => {
                    let children: Vec<NodeId> = self
                        .html
                        .tree
                        .get(id)
                        .map(|n| n.children().map(|c| c.id()).collect())
                        .unwrap_or_default();
                    for child in children {
                        if let Some(mut node) = self.html.tree.get_mut(child) {
                            node.detach();
                        }
                    }
                    if let Some(mut node) = self.html.tree.get_mut(id) {
                        node.append(Node::Text(Text {
                            text: replacement.as_str().into(),
                        }));
                    }
                },
                Some(_) => {},
            }
        }
    }

    /// Serialize the tree and resolve all placeholders.
    pub fn serialize(&self) -> String {
        self.placeholders.resolve(&self.html.html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "<html><head></head><body>\
        <div id='page-container'><div class='pf'>page one</div></div>\
        <div id='sidebar'>chrome</div>\
        </body></html>";

    #[test]
    fn test_node_lookup() {
        let doc = TemplateDocument::parse(BASE);
        assert!(doc.node_id("#page-container").is_some());
        assert_eq!(doc.node_ids(".pf").len(), 1);
        assert!(doc.node_id("#missing").is_none());
    }

    #[test]
    fn test_decompose_removes_elements() {
        let mut doc = TemplateDocument::parse(BASE);
        doc.decompose("#sidebar");
        let out = doc.serialize();
        assert!(!out.contains("chrome"));
    }

    #[test]
    fn test_append_raw_survives_serialization() {
        let mut doc = TemplateDocument::parse(BASE);
        let page = doc.node_id(".pf").unwrap();
        doc.append_raw(page, "<input type='text' value=\"<?=$x?>\"/>".to_string());
        let out = doc.serialize();
        assert!(out.contains("<?=$x?>"));
        assert!(!out.contains("${p"));
    }

    #[test]
    fn test_placeholder_as_sole_content_round_trip() {
        let mut doc = TemplateDocument::parse("<html><body><div id='slot'></div></body></html>");
        let slot = doc.node_id("#slot").unwrap();
        doc.append_raw(slot, "X".to_string());
        let out = doc.serialize();
        assert!(out.contains("X"));
        assert!(!out.contains("${"));
    }

    #[test]
    fn test_insert_raw_before_and_after_wraps_element() {
        let mut doc = TemplateDocument::parse(BASE);
        let container = doc.node_id("#page-container").unwrap();
        doc.insert_raw_before(container, "<form>".to_string());
        doc.insert_raw_after(container, "</form>".to_string());
        let out = doc.serialize();
        let form_open = out.find("<form>").unwrap();
        let container_at = out.find("page-container").unwrap();
        let form_close = out.find("</form>").unwrap();
        assert!(form_open < container_at);
        assert!(container_at < form_close);
    }

    #[test]
    fn test_rewrite_styles_drop_and_replace() {
        let mut doc = TemplateDocument::parse(
            "<html><head><style>/*drop*/a{color:red}</style>\
             <style>b{color:blue}</style></head><body></body></html>",
        );
        doc.rewrite_styles(|css| {
            if css.contains("drop") {
                None
            } else {
                Some(css.replace("blue", "green"))
            }
        });
        let out = doc.serialize();
        assert!(!out.contains("color:red"));
        assert!(out.contains("b{color:green}"));
    }

    #[test]
    fn test_rewrite_styles_untouched_passthrough() {
        let mut doc = TemplateDocument::parse(
            "<html><head><style>a{color:red}</style></head><body></body></html>",
        );
        doc.rewrite_styles(|css| Some(css.to_string()));
        assert!(doc.serialize().contains("a{color:red}"));
    }

    #[test]
    fn test_plain_text_still_escaped() {
        // Only placeholder-carried markup bypasses escaping
        let doc = TemplateDocument::parse("<html><body><p>a &amp; b</p></body></html>");
        assert!(doc.serialize().contains("a &amp; b"));
    }
}

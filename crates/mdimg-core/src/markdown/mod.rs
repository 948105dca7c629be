//! Markdown document trees and image-reference discovery.
//!
//! The analyzer only depends on [`MarkdownParser`] and the closed [`Node`]
//! tree; it does not know which parser produced it.

mod cmark;

pub use cmark::CmarkParser;

/// A parsed document node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Any node with children: document, paragraph, list item, link, emphasis...
    Container(Vec<Node>),
    /// Embedded image with its destination as written by the parser.
    Image { dest: String },
    /// Text, code, breaks and every other leaf.
    Other,
}

impl Node {
    /// Depth-first, document-order collection of every leaf `f` maps to `Some`.
    pub fn collect_leaves<'a, T, F>(&'a self, f: &F) -> Vec<T>
    where
        F: Fn(&'a Node) -> Option<T>,
    {
        let mut out = Vec::new();
        self.walk(f, &mut out);
        out
    }

    fn walk<'a, T, F>(&'a self, f: &F, out: &mut Vec<T>)
    where
        F: Fn(&'a Node) -> Option<T>,
    {
        match self {
            Node::Container(children) => {
                for child in children {
                    child.walk(f, out);
                }
            }
            leaf => out.extend(f(leaf)),
        }
    }

    /// Destinations of every image in the tree, including nested containers.
    pub fn image_destinations(&self) -> Vec<&str> {
        self.collect_leaves(&|node| match node {
            Node::Image { dest } => Some(dest.as_str()),
            _ => None,
        })
    }
}

/// Parses document text into a [`Node`] tree.
pub trait MarkdownParser {
    fn parse(&self, text: &str) -> Node;
}

//! [`MarkdownParser`] backed by pulldown-cmark.

use super::{MarkdownParser, Node};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// CommonMark parser with the common GFM extensions enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkParser;

impl CmarkParser {
    pub fn new() -> Self {
        Self
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
    }
}

impl MarkdownParser for CmarkParser {
    fn parse(&self, text: &str) -> Node {
        // Stack of open containers; the bottom one is the document.
        let mut stack: Vec<Vec<Node>> = vec![Vec::new()];
        // Nesting depth inside an image; its alt-text events are not part of the tree.
        let mut image_depth = 0usize;

        for event in Parser::new_ext(text, Self::options()) {
            if image_depth > 0 {
                match event {
                    Event::Start(Tag::Image { .. }) => image_depth += 1,
                    Event::End(TagEnd::Image) => image_depth -= 1,
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::Image { dest_url, .. }) => {
                    image_depth = 1;
                    if let Some(current) = stack.last_mut() {
                        current.push(Node::Image {
                            dest: dest_url.into_string(),
                        });
                    }
                }
                Event::Start(_) => stack.push(Vec::new()),
                Event::End(_) => {
                    if stack.len() > 1 {
                        let children = stack.pop().unwrap_or_default();
                        if let Some(parent) = stack.last_mut() {
                            parent.push(Node::Container(children));
                        }
                    }
                }
                _ => {
                    if let Some(current) = stack.last_mut() {
                        current.push(Node::Other);
                    }
                }
            }
        }

        // Unbalanced input cannot happen with pulldown-cmark, but fold leftovers anyway.
        while stack.len() > 1 {
            let children = stack.pop().unwrap_or_default();
            if let Some(parent) = stack.last_mut() {
                parent.push(Node::Container(children));
            }
        }
        Node::Container(stack.pop().unwrap_or_default())
    }
}

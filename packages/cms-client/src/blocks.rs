//! Rich-text `description` parsing.
//!
//! Handles the Strapi blocks editor format (an array of typed nodes) and the
//! older markdown `richtext` field, which arrives as a plain string.

use serde_json::Value;

use crate::types::{DescriptionBlock, ListFormat, TextSpan};

pub fn parse_description(value: Option<&Value>) -> Option<Vec<DescriptionBlock>> {
    match value? {
        Value::Array(nodes) => Some(nodes.iter().filter_map(parse_block).collect()),
        Value::String(markdown) => Some(paragraphs_from_text(markdown)),
        _ => None,
    }
}

fn parse_block(node: &Value) -> Option<DescriptionBlock> {
    let kind = node.get("type")?.as_str()?;
    let children = || parse_inline(node.get("children"));

    let block = match kind {
        "paragraph" => DescriptionBlock::Paragraph {
            children: children(),
        },
        "heading" => DescriptionBlock::Heading {
            level: node
                .get("level")
                .and_then(Value::as_u64)
                .and_then(|level| u8::try_from(level).ok())
                .unwrap_or(1),
            children: children(),
        },
        "quote" => DescriptionBlock::Quote {
            children: children(),
        },
        "code" => DescriptionBlock::Code {
            language: node
                .get("language")
                .and_then(Value::as_str)
                .map(str::to_string),
            children: children(),
        },
        "list" => {
            let mut items = Vec::new();
            collect_list_items(node, &mut items);
            DescriptionBlock::List {
                format: list_format(node),
                items,
            }
        }
        other => DescriptionBlock::Other {
            kind: other.to_string(),
            children: children(),
        },
    };

    Some(block)
}

fn list_format(node: &Value) -> ListFormat {
    match node.get("format").and_then(Value::as_str) {
        Some("ordered") => ListFormat::Ordered,
        _ => ListFormat::Unordered,
    }
}

/// Nested lists are flattened into the parent's items.
fn collect_list_items(list: &Value, items: &mut Vec<Vec<TextSpan>>) {
    let Some(children) = list.get("children").and_then(Value::as_array) else {
        return;
    };

    for child in children {
        match child.get("type").and_then(Value::as_str) {
            Some("list-item") => items.push(parse_inline(child.get("children"))),
            Some("list") => collect_list_items(child, items),
            _ => {}
        }
    }
}

fn parse_inline(children: Option<&Value>) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    if let Some(nodes) = children.and_then(Value::as_array) {
        for node in nodes {
            push_inline(node, None, &mut spans);
        }
    }
    spans
}

fn push_inline(node: &Value, link: Option<&str>, spans: &mut Vec<TextSpan>) {
    match node.get("type").and_then(Value::as_str) {
        Some("link") => {
            let url = node.get("url").and_then(Value::as_str).or(link);
            if let Some(children) = node.get("children").and_then(Value::as_array) {
                for child in children {
                    push_inline(child, url, spans);
                }
            }
        }
        Some("text") | None => {
            let Some(text) = node.get("text").and_then(Value::as_str) else {
                return;
            };
            let flag = |name: &str| node.get(name).and_then(Value::as_bool).unwrap_or(false);
            spans.push(TextSpan {
                text: text.to_string(),
                bold: flag("bold"),
                italic: flag("italic"),
                underline: flag("underline"),
                strikethrough: flag("strikethrough"),
                code: flag("code"),
                link: link.map(str::to_string),
            });
        }
        Some(_) => {
            if let Some(children) = node.get("children").and_then(Value::as_array) {
                for child in children {
                    push_inline(child, link, spans);
                }
            }
        }
    }
}

fn paragraphs_from_text(text: &str) -> Vec<DescriptionBlock> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| DescriptionBlock::Paragraph {
            children: vec![TextSpan::plain(p)],
        })
        .collect()
}

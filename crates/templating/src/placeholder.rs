//! `{name}` placeholder substitution.
//!
//! Syntax: `{name}` is replaced by the fact of that name, `{{` and `}}` are
//! literal braces. Anything else involving braces is an error, including
//! format specs such as `{runtime:>10}` (reported as an unknown name).

use movie_facts::FactSheet;

use crate::error::{RenderError, Result};

/// A parsed piece of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Field(&'a str),
}

/// Split a template into literal text and placeholder names.
pub fn parse(template: &str) -> Result<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    let bytes = template.as_bytes();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                push_text(&mut segments, &template[text_start..i + 1]);
                i += 2;
                text_start = i;
            }
            b'{' => {
                push_text(&mut segments, &template[text_start..i]);
                let name_start = i + 1;
                let close = template[name_start..]
                    .find(['{', '}'])
                    .map(|offset| name_start + offset)
                    .filter(|&end| bytes[end] == b'}')
                    .ok_or(RenderError::UnbalancedBrace { position: i })?;
                segments.push(Segment::Field(&template[name_start..close]));
                i = close + 1;
                text_start = i;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => {
                push_text(&mut segments, &template[text_start..i + 1]);
                i += 2;
                text_start = i;
            }
            b'}' => return Err(RenderError::UnbalancedBrace { position: i }),
            _ => i += 1,
        }
    }
    push_text(&mut segments, &template[text_start..]);

    Ok(segments)
}

fn push_text<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str) {
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
}

/// Placeholder names a template references, in order of appearance.
pub fn referenced_placeholders(template: &str) -> Result<Vec<&str>> {
    Ok(parse(template)?
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Field(name) => Some(name),
            Segment::Text(_) => None,
        })
        .collect())
}

/// Substitute every placeholder in `template` from `sheet`.
pub fn render(template: &str, sheet: &FactSheet) -> Result<String> {
    let mut out = String::with_capacity(template.len() * 2);
    for segment in parse(template)? {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Field(name) => match sheet.lookup(name) {
                Some(Ok(value)) => out.push_str(value),
                Some(Err(source)) => {
                    return Err(RenderError::MissingFact {
                        placeholder: name.to_string(),
                        source: source.clone(),
                    });
                }
                None => {
                    return Err(RenderError::UnknownPlaceholder {
                        name: name.to_string(),
                    });
                }
            },
        }
    }
    Ok(out)
}

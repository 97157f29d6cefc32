//! `:shortcode:` expansion for rendered messages and tag decorations.
//!
//! Shortcodes are the gemoji names (`:heart_eyes:`, `:+1:`, ...). Anything
//! else between two colons is left alone, so "10:30" or ":notanemoji:"
//! survive untouched.

use std::borrow::Cow;

pub fn lookup(shortcode: &str) -> Option<&'static str> {
    emojis::get_by_shortcode(shortcode).map(|emoji| emoji.as_str())
}

/// Replace every known `:alias:` in `text` with its emoji.
pub fn emojize(text: &str) -> Cow<'_, str> {
    if !text.contains(':') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(':') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let expansion = after
            .find(':')
            .and_then(|end| lookup(&after[..end]).map(|emoji| (end, emoji)));
        match expansion {
            Some((end, emoji)) => {
                out.push_str(emoji);
                rest = &after[end + 1..];
            }
            None => {
                out.push(':');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MARKUP_TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Removes every markup tag from the tweet `source`, e.g.
/// `<a href="http://twitter.com">Twitter Web App</a>` becomes `Twitter Web App`.
/// Text between tags, including whitespace, is left untouched.
pub fn strip_tags(source: &str) -> Cow<'_, str> {
    MARKUP_TAG_REGEX.replace_all(source, "")
}

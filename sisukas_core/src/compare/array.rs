//! Unordered collection comparisons over strings

use std::borrow::Cow;

/// How two strings are considered equal.
///
/// The default is case-insensitive exact matching. With `partial` set, two
/// strings match when either one contains the other, so a short search term
/// matches a long catalog entry and the other way round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    pub case_sensitive: bool,
    pub partial: bool,
}

impl MatchOptions {
    pub fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
            partial: false,
        }
    }
}

fn fold<'a>(value: &'a str, options: &MatchOptions) -> Cow<'a, str> {
    if options.case_sensitive {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.to_lowercase())
    }
}

/// Compare two single values under the given options.
pub fn values_match(a: &str, b: &str, options: &MatchOptions) -> bool {
    let a = fold(a, options);
    let b = fold(b, options);
    if options.partial {
        a.contains(b.as_ref()) || b.contains(a.as_ref())
    } else {
        a == b
    }
}

pub fn includes<S: AsRef<str>>(items: &[S], value: &str, options: &MatchOptions) -> bool {
    items
        .iter()
        .any(|item| values_match(item.as_ref(), value, options))
}

pub fn not_includes<S: AsRef<str>>(items: &[S], value: &str, options: &MatchOptions) -> bool {
    !includes(items, value, options)
}

/// At least one of `values` is in `items`. False when `values` is empty.
pub fn includes_any<S: AsRef<str>, T: AsRef<str>>(
    items: &[S],
    values: &[T],
    options: &MatchOptions,
) -> bool {
    values
        .iter()
        .any(|value| includes(items, value.as_ref(), options))
}

/// Every one of `values` is in `items`. True when `values` is empty.
pub fn includes_all<S: AsRef<str>, T: AsRef<str>>(
    items: &[S],
    values: &[T],
    options: &MatchOptions,
) -> bool {
    values
        .iter()
        .all(|value| includes(items, value.as_ref(), options))
}

pub fn is_empty<S>(items: &[S]) -> bool {
    items.is_empty()
}

pub fn is_not_empty<S>(items: &[S]) -> bool {
    !items.is_empty()
}

/// Same length and every element of each side is found in the other.
pub fn have_same_elements<S: AsRef<str>, T: AsRef<str>>(
    a: &[S],
    b: &[T],
    options: &MatchOptions,
) -> bool {
    a.len() == b.len() && includes_all(a, b, options) && includes_all(b, a, options)
}

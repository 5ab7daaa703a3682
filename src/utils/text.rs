use std::borrow::Cow;
use std::fmt::Display;

use itertools::Itertools;

/// Pluralizes a piece of text.
pub fn pluralize(base: &str, count: usize) -> Cow<'_, str> {
    if count == 1 {
        base.into()
    } else {
        format!("{base}s").into()
    }
}

/// Wraps every item in double quotes and joins them with commas.
pub fn quoted_list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    items.into_iter().map(|item| format!(r#""{item}""#)).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralize_zero() {
        assert_eq!(pluralize("Label", 0), "Labels");
    }

    #[test]
    fn pluralize_one() {
        assert_eq!(pluralize("Label", 1), "Label");
    }

    #[test]
    fn pluralize_many() {
        assert_eq!(pluralize("Label", 3), "Labels");
    }

    #[test]
    fn quoted_list_empty() {
        assert_eq!(quoted_list(Vec::<String>::new()), "");
    }

    #[test]
    fn quoted_list_single() {
        assert_eq!(quoted_list(["bug"]), r#""bug""#);
    }

    #[test]
    fn quoted_list_keeps_order() {
        assert_eq!(
            quoted_list(["help wanted", "bug"]),
            r#""help wanted", "bug""#
        );
    }
}

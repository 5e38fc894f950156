//! Template matching and merging.
//!
//! A template is a partially filled header. Absent optional fields and
//! empty strings in the template act as wildcards; parameters must be a
//! subset of the matched header's parameters.

/// Matches a header against a template.
pub trait Matches {
    fn matches(&self, template: &Self) -> bool;
}

/// Overlays the fields that are present in `other` onto `self`.
pub trait Merge {
    fn merge(&mut self, other: &Self);
}

/// A `None` template matches anything.
pub(crate) fn match_opt<T: PartialEq>(mine: &Option<T>, template: &Option<T>) -> bool {
    template.is_none() || mine == template
}

/// Case-insensitive, with an empty template matching anything.
pub(crate) fn match_token(mine: &str, template: &str) -> bool {
    template.is_empty() || mine.eq_ignore_ascii_case(template)
}

/// Exact comparison for quoted and free text, with an empty template matching anything.
pub(crate) fn match_text(mine: &str, template: &str) -> bool {
    template.is_empty() || mine == template
}

pub(crate) fn merge_opt<T: Clone>(mine: &mut Option<T>, other: &Option<T>) {
    if other.is_some() {
        mine.clone_from(other);
    }
}

pub(crate) fn merge_string(mine: &mut String, other: &str) {
    if !other.is_empty() {
        *mine = other.to_string();
    }
}

//! Field name normalization and deduplication.
//!
//! PDF fully-qualified field names routinely contain brackets, dots and
//! whitespace (`topmostSubform[0].Page1[0].f1_01[0]`), which make poor HTML
//! input names and template variable names. [`sanitize_name`] flattens them
//! to `[A-Za-z0-9_]` identifiers; [`NameAllocator`] hands out unique variants
//! when several fields collapse to the same identifier within one run.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::form::Field;

lazy_static! {
    /// Runs of characters that are not letters or digits
    static ref RE_NON_ALNUM: Regex = Regex::new("[^A-Za-z0-9]+").unwrap();
}

/// Strategy for computing the output name of a field.
pub enum RenameStrategy {
    /// Keep the fully-qualified PDF name as-is.
    Keep,
    /// Look the PDF name up in a caller-supplied map; names not present in
    /// the map are kept as-is.
    Map(HashMap<String, String>),
    /// Caller-supplied function of the PDF name and the field.
    Func(Box<dyn Fn(&str, &Field) -> String>),
    /// Automatic sanitization via [`sanitize_name`].
    Auto,
}

impl RenameStrategy {
    /// Compute the output name for a field.
    pub fn apply(&self, name: &str, field: &Field) -> String {
        match self {
            RenameStrategy::Keep => name.to_string(),
            RenameStrategy::Map(map) => {
                map.get(name).cloned().unwrap_or_else(|| name.to_string())
            },
            RenameStrategy::Func(f) => f(name, field),
            RenameStrategy::Auto => sanitize_name(name),
        }
    }
}

impl std::fmt::Debug for RenameStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenameStrategy::Keep => write!(f, "Keep"),
            RenameStrategy::Map(map) => write!(f, "Map({} entries)", map.len()),
            RenameStrategy::Func(_) => write!(f, "Func(..)"),
            RenameStrategy::Auto => write!(f, "Auto"),
        }
    }
}

impl Default for RenameStrategy {
    fn default() -> Self {
        RenameStrategy::Keep
    }
}

/// Normalize a raw field name into an identifier.
///
/// Runs of non-alphanumeric characters collapse to a single underscore,
/// leading/trailing underscores are trimmed, and a leading digit gets an
/// underscore prefix. Deterministic: the same input always yields the same
/// identifier.
///
/// # Examples
///
/// ```
/// use form_oxide::naming::sanitize_name;
///
/// assert_eq!(sanitize_name("Page1[0].Name Field!"), "Page1_0_Name_Field");
/// assert_eq!(sanitize_name("1st_choice"), "_1st_choice");
/// ```
pub fn sanitize_name(raw: &str) -> String {
    let name = RE_NON_ALNUM.replace_all(raw, "_");
    let name = name.trim_matches('_');
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name.to_string()
    }
}

/// Per-run collision table for generated identifiers.
///
/// The first occurrence of a name is returned unsuffixed; later occurrences
/// get the occurrence count appended (`name`, `name2`, `name3`, ...). The
/// table lives for one conversion run and is discarded afterwards.
#[derive(Debug, Default)]
pub struct NameAllocator {
    counts: HashMap<String, u32>,
}

impl NameAllocator {
    /// Create an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a unique variant of `name` for this run.
    pub fn dedupe(&mut self, name: &str) -> String {
        let count = self.counts.entry(name.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            name.to_string()
        } else {
            format!("{}{}", name, count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldType;

    #[test]
    fn test_sanitize_name_spec_example() {
        assert_eq!(sanitize_name("Page1[0].Name Field!"), "Page1_0_Name_Field");
    }

    #[test]
    fn test_sanitize_name_leading_digit() {
        assert_eq!(sanitize_name("2ndChoice"), "_2ndChoice");
    }

    #[test]
    fn test_sanitize_name_trims_separators() {
        assert_eq!(sanitize_name("__x__"), "x");
        assert_eq!(sanitize_name("!x!"), "x");
    }

    #[test]
    fn test_sanitize_name_deterministic() {
        let a = sanitize_name("form1[0].a b");
        let b = sanitize_name("form1[0].a b");
        assert_eq!(a, b);
    }

    #[test]
    fn test_allocator_first_occurrence_unsuffixed() {
        let mut alloc = NameAllocator::new();
        assert_eq!(alloc.dedupe("sig"), "sig");
        assert_eq!(alloc.dedupe("sig"), "sig2");
        assert_eq!(alloc.dedupe("sig"), "sig3");
        assert_eq!(alloc.dedupe("other"), "other");
    }

    #[test]
    fn test_rename_strategy_map_fallback() {
        let field = Field::new("a.b", FieldType::Text);
        let mut map = HashMap::new();
        map.insert("a.b".to_string(), "ab".to_string());
        let strategy = RenameStrategy::Map(map);
        assert_eq!(strategy.apply("a.b", &field), "ab");
        assert_eq!(strategy.apply("c.d", &field), "c.d");
    }

    #[test]
    fn test_rename_strategy_func() {
        let field = Field::new("a.b", FieldType::Text);
        let strategy = RenameStrategy::Func(Box::new(|name, _| name.to_uppercase()));
        assert_eq!(strategy.apply("a.b", &field), "A.B");
    }
}

//! Two-phase placeholder substitution.
//!
//! Backend-rendered fragments may contain syntax that is special to the
//! target language but not to HTML (`<?= ... ?>`, `{% ... %}`). Inserting
//! such fragments into an HTML tree directly would get them escaped or
//! re-serialized. Instead, an inert token is inserted as literal text; the
//! bound value is substituted in a single pass over the fully serialized
//! output, after the tree model has finished its own escaping.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use uuid::Uuid;

lazy_static! {
    /// Placeholder tokens: `${p` + 32 hex digits + `}`
    static ref RE_TOKEN: Regex = Regex::new(r"\$\{p[0-9a-f]{32}\}").unwrap();
}

/// Registry of placeholder tokens and their late-bound values.
///
/// Token uniqueness comes from a fresh v4 UUID per placeholder, so tokens
/// cannot collide with each other or, realistically, with incidental
/// document content. Scoped to a single conversion run.
#[derive(Debug, Default)]
pub struct PlaceholderStore {
    substitutions: HashMap<String, String>,
}

impl PlaceholderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` and return the token standing in for it.
    ///
    /// The token is safe to insert as literal text: it contains no characters
    /// an HTML serializer escapes.
    pub fn insert(&mut self, value: String) -> String {
        let token = format!("${{p{}}}", Uuid::new_v4().simple());
        self.substitutions.insert(token.clone(), value);
        token
    }

    /// Number of registered placeholders.
    pub fn len(&self) -> usize {
        self.substitutions.len()
    }

    /// Whether the store holds no placeholders.
    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }

    /// Substitute every known token in `serialized` with its bound value.
    ///
    /// A single linear pass. Tokens that match the syntax but are unknown to
    /// this store are left untouched, and registered tokens absent from the
    /// text are logged; neither case is an error, so partial or debug
    /// serializations still work.
    pub fn resolve(&self, serialized: &str) -> String {
        let mut seen = 0usize;
        let resolved = RE_TOKEN.replace_all(serialized, |caps: &Captures| {
            let token = &caps[0];
            match self.substitutions.get(token) {
                Some(value) => {
                    seen += 1;
                    value.clone()
                },
                None => {
                    log::warn!("Unknown placeholder token left unresolved: {}", token);
                    token.to_string()
                },
            }
        });
        if seen < self.substitutions.len() {
            log::warn!(
                "{} of {} placeholders were not found in the serialized output",
                self.substitutions.len() - seen,
                self.substitutions.len()
            );
        }
        resolved.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_returns_unique_tokens() {
        let mut store = PlaceholderStore::new();
        let a = store.insert("A".to_string());
        let b = store.insert("B".to_string());
        assert_ne!(a, b);
        assert!(RE_TOKEN.is_match(&a));
    }

    #[test]
    fn test_round_trip() {
        let mut store = PlaceholderStore::new();
        let token = store.insert("X".to_string());
        let doc = format!("<div>{}</div>", token);
        let out = store.resolve(&doc);
        assert_eq!(out, "<div>X</div>");
        assert!(!out.contains("${p"));
    }

    #[test]
    fn test_nested_template_syntax_survives() {
        let mut store = PlaceholderStore::new();
        let token = store.insert("<?=htmlspecialchars($fd['a'])?>".to_string());
        let out = store.resolve(&format!("<span>{}</span>", token));
        assert!(out.contains("<?=htmlspecialchars($fd['a'])?>"));
    }

    #[test]
    fn test_unknown_token_left_untouched() {
        let store = PlaceholderStore::new();
        let text = "before ${p0123456789abcdef0123456789abcdef} after";
        assert_eq!(store.resolve(text), text);
    }

    #[test]
    fn test_multiple_tokens_single_pass() {
        let mut store = PlaceholderStore::new();
        let a = store.insert("one".to_string());
        let b = store.insert("two".to_string());
        let out = store.resolve(&format!("{} and {}", a, b));
        assert_eq!(out, "one and two");
    }
}

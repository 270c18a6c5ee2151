//! Resolved settings: the immutable result of one resolution.

use std::collections::BTreeMap;
use std::ops::Index;
use std::sync::Arc;

use ol_common::{Token, Value};
use serde::Serialize;

/// Immutable category-to-value map produced by one resolution call.
///
/// Two generic readers replace per-category accessors: [`Settings::get`]
/// returns a category's resolved value, and [`Settings::is_active`] asks
/// whether an option token is the current value of its owning category.
/// Every category of the schema is present, including unset ones, which
/// read as [`Value::Null`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<Token, Value>,
    #[serde(skip)]
    owners: Arc<BTreeMap<Token, Token>>,
}

impl Settings {
    pub(crate) fn new(values: BTreeMap<Token, Value>, owners: Arc<BTreeMap<Token, Token>>) -> Self {
        Settings { values, owners }
    }

    /// The resolved value of `category`, or `None` for a token that is not
    /// a category of the schema.
    pub fn get(&self, category: impl Into<Token>) -> Option<&Value> {
        self.values.get(&category.into())
    }

    /// True if `option` is the current value of the category that owns it.
    ///
    /// Tokens that are not registered options are never active; asking
    /// about one is answered with `false`, not an error.
    pub fn is_active(&self, option: impl Into<Token>) -> bool {
        let option = option.into();
        match self.owners.get(&option) {
            Some(category) => self.values.get(category) == Some(&Value::Token(option)),
            None => false,
        }
    }

    /// True if `category` is a category of the schema.
    pub fn contains(&self, category: impl Into<Token>) -> bool {
        self.values.contains_key(&category.into())
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no categories. Schemas cannot compile empty,
    /// so settings never are either.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(category, value)` pairs in category token order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, &Value)> + '_ {
        self.values.iter().map(|(category, value)| (*category, value))
    }

    /// Iterates category tokens in order.
    pub fn categories(&self) -> impl Iterator<Item = Token> + '_ {
        self.values.keys().copied()
    }

    /// Serializes the settings to a JSON object keyed by category name.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Index<Token> for Settings {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if `category` is not a category of the schema; use
    /// [`Settings::get`] for a fallible lookup.
    fn index(&self, category: Token) -> &Value {
        self.values
            .get(&category)
            .unwrap_or_else(|| panic!("no category {category} in settings"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use crate::spec::{ChoiceDefault, Spec};

    const STYLE: Token = Token::new("style");
    const SEDAN: Token = Token::new("sedan");
    const COUPE: Token = Token::new("coupe");
    const COLOR: Token = Token::new("color");
    const RED: Token = Token::new("red");
    const PAGE_LEN: Token = Token::new("page_len");

    fn settings() -> Settings {
        Schema::compile([
            Spec::choice(STYLE, SEDAN, [COUPE]),
            Spec::choice(COLOR, ChoiceDefault::Unset, [RED]),
            Spec::value(PAGE_LEN, 42),
        ])
        .unwrap()
        .resolve_defaults()
        .unwrap()
    }

    #[test]
    fn test_get_distinguishes_unset_from_unknown() {
        let settings = settings();

        assert_eq!(settings.get(COLOR), Some(&Value::Null));
        assert_eq!(settings.get("no_such_category"), None);
        assert!(settings.contains(COLOR));
        assert!(!settings.contains("no_such_category"));
    }

    #[test]
    fn test_is_active_answers_false_for_foreign_tokens() {
        let settings = settings();

        assert!(settings.is_active(SEDAN));
        assert!(!settings.is_active(COUPE));
        // Unset category: none of its options are active.
        assert!(!settings.is_active(RED));
        // Not an option at all: false, not an error.
        assert!(!settings.is_active(STYLE));
        assert!(!settings.is_active("wagon"));
    }

    #[test]
    fn test_index_reads_known_categories() {
        let settings = settings();
        assert_eq!(settings[STYLE], Value::Token(SEDAN));
        assert_eq!(settings[PAGE_LEN], Value::from(42));
    }

    #[test]
    #[should_panic(expected = "no category wagon in settings")]
    fn test_index_panics_on_unknown_category() {
        let _ = &settings()[Token::new("wagon")];
    }

    #[test]
    fn test_iteration_is_in_token_order() {
        let settings = settings();
        let categories: Vec<Token> = settings.categories().collect();
        assert_eq!(categories, vec![COLOR, PAGE_LEN, STYLE]);

        let via_pairs: Vec<Token> = settings.iter().map(|(category, _)| category).collect();
        assert_eq!(via_pairs, categories);
    }

    #[test]
    fn test_to_json_is_an_object_keyed_by_category() {
        let json = settings().to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({
                "color": null,
                "page_len": 42,
                "style": "sedan",
            })
        );
    }

    #[test]
    fn test_settings_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Settings>();
    }
}

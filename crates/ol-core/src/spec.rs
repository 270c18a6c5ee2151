//! Specification entries: the literals a schema is compiled from.
//!
//! A [`Spec`] is one declarative entry in a schema definition. Choice
//! entries fix a closed set of option tokens for one category; value
//! entries give categories an arbitrary default with no option set.
//! Entries are inert data until [`Schema::compile`](crate::Schema::compile)
//! checks them.

use ol_common::{Token, Value};
use serde::Serialize;

/// Default rule for an enumerated (choice) category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChoiceDefault {
    /// This option is selected when the category goes unmentioned. The
    /// token is also registered as the category's first option.
    Token(Token),
    /// No default; an unmentioned category resolves to null.
    Unset,
    /// No default, and resolution fails unless the category is selected.
    Required,
}

impl From<Token> for ChoiceDefault {
    fn from(token: Token) -> Self {
        ChoiceDefault::Token(token)
    }
}

impl From<&'static str> for ChoiceDefault {
    fn from(name: &'static str) -> Self {
        ChoiceDefault::Token(Token::new(name))
    }
}

/// One entry in a schema specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Spec {
    /// An enumerated category: a default rule plus further options.
    Choice {
        category: Token,
        default: ChoiceDefault,
        options: Vec<Token>,
    },
    /// Value categories with their defaults, in declaration order.
    Values(Vec<(Token, Value)>),
}

impl Spec {
    /// An enumerated category.
    ///
    /// With a [`ChoiceDefault::Token`] default, that token becomes the
    /// category's first registered option and `options` lists the rest.
    /// Compilation requires at least one token in `options` either way.
    ///
    /// The category name may coincide with one of its own options, which
    /// reads naturally for binary switches:
    ///
    /// ```
    /// use ol_core::Spec;
    ///
    /// let spec = Spec::choice("history", "history", ["nohistory"]);
    /// # drop(spec);
    /// ```
    pub fn choice<C, D, I, T>(category: C, default: D, options: I) -> Spec
    where
        C: Into<Token>,
        D: Into<ChoiceDefault>,
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        Spec::Choice {
            category: category.into(),
            default: default.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// A single value category with its default.
    ///
    /// Shorthand for [`Spec::values`] with one pair; the boolean `false`
    /// caveat documented there applies here too.
    pub fn value<C, V>(category: C, default: V) -> Spec
    where
        C: Into<Token>,
        V: Into<Value>,
    {
        Spec::Values(vec![(category.into(), default.into())])
    }

    /// Several value categories at once, registered in order.
    ///
    /// A default of boolean `false` does not install a default at all: it
    /// marks the category mandatory, the same as [`ChoiceDefault::Required`]
    /// does for choice categories. A category whose genuine default should
    /// be `false` cannot be declared this way; model it as a two-option
    /// choice category instead.
    pub fn values<I, C, V>(pairs: I) -> Spec
    where
        I: IntoIterator<Item = (C, V)>,
        C: Into<Token>,
        V: Into<Value>,
    {
        Spec::Values(
            pairs
                .into_iter()
                .map(|(category, default)| (category.into(), default.into()))
                .collect(),
        )
    }
}

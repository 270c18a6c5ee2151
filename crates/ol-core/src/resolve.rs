//! Selection resolution: defaults plus one call's selections become settings.
//!
//! Resolution seeds a working set from the schema's defaults, applies the
//! caller's selection entries in order, then runs the mandatory sweep and
//! the validation hook. Each category accepts at most one assignment per
//! resolution; a second one is an error even when it repeats the same
//! value, since that always indicates a confused call site.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use ol_common::{Error, Result, Token, Value};
use serde::Serialize;

use crate::schema::{CategoryDefault, Schema};
use crate::settings::Settings;

/// One selection entry passed to [`Schema::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Selection {
    /// A bare option token; its owning category is implied.
    Option(Token),
    /// Category-to-value assignments, applied left to right.
    Assign(Vec<(Token, Value)>),
}

impl Selection {
    /// Assigns one category a value directly.
    pub fn assign<C, V>(category: C, value: V) -> Selection
    where
        C: Into<Token>,
        V: Into<Value>,
    {
        Selection::Assign(vec![(category.into(), value.into())])
    }

    /// Assigns several categories in one entry, left to right.
    pub fn assign_all<I, C, V>(pairs: I) -> Selection
    where
        I: IntoIterator<Item = (C, V)>,
        C: Into<Token>,
        V: Into<Value>,
    {
        Selection::Assign(
            pairs
                .into_iter()
                .map(|(category, value)| (category.into(), value.into()))
                .collect(),
        )
    }
}

impl From<Token> for Selection {
    fn from(option: Token) -> Self {
        Selection::Option(option)
    }
}

impl From<&'static str> for Selection {
    fn from(name: &'static str) -> Self {
        Selection::Option(Token::new(name))
    }
}

pub(crate) fn resolve_selections<I>(schema: &Schema, selections: I) -> Result<Settings>
where
    I: Iterator<Item = Selection>,
{
    let mut selected: BTreeMap<Token, Value> = schema
        .categories
        .iter()
        .map(|(category, entry)| {
            let seed = match entry.default() {
                CategoryDefault::Value(value) => value.clone(),
                CategoryDefault::Unset | CategoryDefault::Required => Value::Null,
            };
            (*category, seed)
        })
        .collect();
    let mut touched = BTreeSet::new();

    for selection in selections {
        match selection {
            Selection::Option(option) => apply_option(schema, &mut selected, &mut touched, option)?,
            Selection::Assign(pairs) => {
                apply_assignments(schema, &mut selected, &mut touched, pairs)?
            }
        }
    }

    for category in schema.mandatory() {
        let missing = selected
            .get(category)
            .map_or(true, |value| !value.is_truthy());
        if missing {
            return Err(Error::InvalidSelection(format!(
                "missing mandatory setting {category}"
            )));
        }
    }

    let settings = Settings::new(selected, Arc::clone(&schema.owners));
    if let Some(hook) = &schema.hook {
        hook(&settings)?;
    }
    tracing::debug!(categories = settings.len(), "resolved option settings");
    Ok(settings)
}

fn apply_option(
    schema: &Schema,
    selected: &mut BTreeMap<Token, Value>,
    touched: &mut BTreeSet<Token>,
    option: Token,
) -> Result<()> {
    let Some(category) = schema.owner_of(option) else {
        return Err(Error::InvalidSelection(format!("unknown option: {option}")));
    };
    if !touched.insert(category) {
        return Err(Error::InvalidSelection(format!(
            "category {category} has multiple values"
        )));
    }
    selected.insert(category, Value::Token(option));
    Ok(())
}

fn apply_assignments(
    schema: &Schema,
    selected: &mut BTreeMap<Token, Value>,
    touched: &mut BTreeSet<Token>,
    pairs: Vec<(Token, Value)>,
) -> Result<()> {
    for (category, value) in pairs {
        let Some(entry) = schema.category(category) else {
            return Err(Error::InvalidSelection(format!(
                "not a category: {category}"
            )));
        };
        if touched.contains(&category) {
            return Err(Error::InvalidSelection(format!(
                "category {category} has multiple values"
            )));
        }
        if entry.is_choice() {
            check_choice_value(schema, category, &value)?;
        }
        touched.insert(category);
        selected.insert(category, value);
    }
    Ok(())
}

fn check_choice_value(schema: &Schema, category: Token, value: &Value) -> Result<()> {
    match value {
        // An explicit null clears the category, even over a token default.
        Value::Null => Ok(()),
        Value::Token(option) => {
            if schema.owner_of(*option) == Some(category) {
                Ok(())
            } else {
                Err(Error::InvalidSelection(format!(
                    "invalid option: {option} is not an option of category {category}"
                )))
            }
        }
        data => Err(Error::InvalidSelection(format!(
            "found {} for category {category}, expected an option token",
            data.kind()
        ))),
    }
}

//! Schema compilation: specification entries become immutable tables.
//!
//! Compilation walks entries in order and builds three tables:
//! - the category table: every category with its kind and default rule
//! - the owner table: every option token mapped to its owning category
//! - the mandatory list: categories that must be selected, in order
//!
//! Checks are fail-fast. The first bad entry aborts compilation, and no
//! partially built schema escapes.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use ol_common::{BoxError, Error, Result, Token, Value};
use serde::Serialize;

use crate::resolve::{self, Selection};
use crate::settings::Settings;
use crate::spec::{ChoiceDefault, Spec};

/// Post-resolution validation hook.
///
/// The hook sees the finished settings of one resolution and may reject
/// them; its error reaches the resolving caller unchanged.
pub type ValidationHook = dyn Fn(&Settings) -> std::result::Result<(), BoxError> + Send + Sync;

/// What kind of category a specification entry compiled to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Closed option set, in registration order. A token default comes
    /// first, remaining options follow in declaration order.
    Choice { options: Vec<Token> },
    /// Open category carrying arbitrary data, with no option set.
    Value,
}

/// Compiled default rule for a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryDefault {
    /// Seeded into every resolution unless the caller overrides it.
    Value(Value),
    /// No default; the category seeds as null.
    Unset,
    /// No default, and every resolution must supply a truthy value.
    Required,
}

/// One compiled category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    kind: CategoryKind,
    default: CategoryDefault,
}

impl Category {
    /// The category's kind.
    pub fn kind(&self) -> &CategoryKind {
        &self.kind
    }

    /// The category's default rule.
    pub fn default(&self) -> &CategoryDefault {
        &self.default
    }

    /// True for enumerated categories.
    pub fn is_choice(&self) -> bool {
        matches!(self.kind, CategoryKind::Choice { .. })
    }

    /// The category's options in registration order; empty for value
    /// categories.
    pub fn options(&self) -> &[Token] {
        match &self.kind {
            CategoryKind::Choice { options } => options,
            CategoryKind::Value => &[],
        }
    }
}

/// A compiled, immutable option schema.
///
/// Compile one next to the function whose options it describes, then
/// resolve each call's selections against it. A schema never changes
/// after compilation, so sharing one instance across threads needs no
/// synchronization; concurrent [`Schema::resolve`] calls are independent.
pub struct Schema {
    pub(crate) categories: BTreeMap<Token, Category>,
    pub(crate) owners: Arc<BTreeMap<Token, Token>>,
    pub(crate) mandatory: Vec<Token>,
    pub(crate) hook: Option<Arc<ValidationHook>>,
}

impl Schema {
    /// Compiles specification entries into a schema.
    ///
    /// Entries are checked in order; the first offending entry aborts
    /// compilation with an [`Error::InvalidSpecification`] naming it.
    /// An empty specification is itself an error.
    pub fn compile<I>(specs: I) -> Result<Schema>
    where
        I: IntoIterator<Item = Spec>,
    {
        Schema::build(specs, None)
    }

    /// Compiles a schema with a post-resolution validation hook.
    ///
    /// The hook runs at the end of every successful resolution, after the
    /// mandatory sweep, and can enforce cross-category rules a single
    /// entry cannot express.
    pub fn compile_with_hook<I, H>(specs: I, hook: H) -> Result<Schema>
    where
        I: IntoIterator<Item = Spec>,
        H: Fn(&Settings) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
    {
        let hook: Arc<ValidationHook> = Arc::new(hook);
        Schema::build(specs, Some(hook))
    }

    fn build<I>(specs: I, hook: Option<Arc<ValidationHook>>) -> Result<Schema>
    where
        I: IntoIterator<Item = Spec>,
    {
        let mut tables = Tables::default();
        let mut seen_any = false;

        for spec in specs {
            seen_any = true;
            match spec {
                Spec::Choice {
                    category,
                    default,
                    options,
                } => compile_choice(&mut tables, category, default, options)?,
                Spec::Values(pairs) => compile_values(&mut tables, pairs)?,
            }
        }
        if !seen_any {
            return Err(Error::InvalidSpecification(
                "missing option specifications".into(),
            ));
        }

        let Tables {
            categories,
            owners,
            mandatory,
        } = tables;
        let schema = Schema {
            categories,
            owners: Arc::new(owners),
            mandatory,
            hook,
        };
        tracing::debug!(
            categories = schema.categories.len(),
            options = schema.owners.len(),
            mandatory = schema.mandatory.len(),
            "compiled option schema"
        );
        Ok(schema)
    }

    /// Resolves one call's selections into settings.
    ///
    /// Accepts anything convertible to [`Selection`], so bare option
    /// tokens mix with category assignments:
    ///
    /// ```
    /// use ol_core::{Schema, Selection, Spec};
    ///
    /// let schema = Schema::compile([
    ///     Spec::choice("history", "history", ["nohistory"]),
    ///     Spec::value("page_len", 42),
    /// ])?;
    ///
    /// let settings = schema.resolve([
    ///     Selection::from("nohistory"),
    ///     Selection::assign("page_len", 55),
    /// ])?;
    /// assert!(settings.is_active("nohistory"));
    /// # Ok::<(), ol_core::Error>(())
    /// ```
    pub fn resolve<I, S>(&self, selections: I) -> Result<Settings>
    where
        I: IntoIterator<Item = S>,
        S: Into<Selection>,
    {
        resolve::resolve_selections(self, selections.into_iter().map(Into::into))
    }

    /// Resolves with no selections at all: pure defaults.
    ///
    /// Fails if the schema has mandatory categories, exactly as an empty
    /// selection list passed to [`Schema::resolve`] would.
    pub fn resolve_defaults(&self) -> Result<Settings> {
        self.resolve(std::iter::empty::<Selection>())
    }

    /// Number of categories in the schema.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True when the schema has no categories. Compilation rejects empty
    /// specifications, so this never holds for a compiled schema.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Looks up a category.
    pub fn category(&self, category: impl Into<Token>) -> Option<&Category> {
        self.categories.get(&category.into())
    }

    /// True if `category` is a category of this schema.
    pub fn has_category(&self, category: impl Into<Token>) -> bool {
        self.categories.contains_key(&category.into())
    }

    /// Iterates categories in token order.
    pub fn categories(&self) -> impl Iterator<Item = (Token, &Category)> + '_ {
        self.categories.iter().map(|(token, category)| (*token, category))
    }

    /// The category owning `option`, if `option` is a registered option.
    pub fn owner_of(&self, option: impl Into<Token>) -> Option<Token> {
        self.owners.get(&option.into()).copied()
    }

    /// True if `option` is a registered option of some category.
    pub fn has_option(&self, option: impl Into<Token>) -> bool {
        self.owners.contains_key(&option.into())
    }

    /// Iterates `(option, owning category)` pairs in option token order.
    pub fn options(&self) -> impl Iterator<Item = (Token, Token)> + '_ {
        self.owners.iter().map(|(option, category)| (*option, *category))
    }

    /// Mandatory categories, in registration order.
    pub fn mandatory(&self) -> &[Token] {
        &self.mandatory
    }

    /// True if a validation hook was attached at compile time.
    pub fn has_hook(&self) -> bool {
        self.hook.is_some()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("categories", &self.categories)
            .field("mandatory", &self.mandatory)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl Clone for Schema {
    fn clone(&self) -> Self {
        Schema {
            categories: self.categories.clone(),
            owners: Arc::clone(&self.owners),
            mandatory: self.mandatory.clone(),
            hook: self.hook.clone(),
        }
    }
}

#[derive(Default)]
struct Tables {
    categories: BTreeMap<Token, Category>,
    owners: BTreeMap<Token, Token>,
    mandatory: Vec<Token>,
}

fn compile_choice(
    tables: &mut Tables,
    category: Token,
    default: ChoiceDefault,
    options: Vec<Token>,
) -> Result<()> {
    check_new_category(tables, category)?;
    if options.is_empty() {
        return Err(Error::InvalidSpecification(format!(
            "invalid number of entries for category {category}"
        )));
    }

    let mut registered = Vec::new();
    let default = match default {
        ChoiceDefault::Token(token) => {
            register_option(tables, category, token, &mut registered)?;
            CategoryDefault::Value(Value::Token(token))
        }
        ChoiceDefault::Unset => CategoryDefault::Unset,
        ChoiceDefault::Required => {
            tables.mandatory.push(category);
            CategoryDefault::Required
        }
    };
    for token in options {
        register_option(tables, category, token, &mut registered)?;
    }

    tables.categories.insert(
        category,
        Category {
            kind: CategoryKind::Choice {
                options: registered,
            },
            default,
        },
    );
    Ok(())
}

fn compile_values(tables: &mut Tables, pairs: Vec<(Token, Value)>) -> Result<()> {
    if pairs.is_empty() {
        return Err(Error::InvalidSpecification(
            "value specification contains no entries".into(),
        ));
    }
    for (category, default) in pairs {
        check_new_category(tables, category)?;
        if tables.owners.contains_key(&category) {
            return Err(Error::InvalidSpecification(format!(
                "duplicate category: {category} is already a registered option"
            )));
        }
        // A literal `false` default means "no default, selection required",
        // same as ChoiceDefault::Required for choice categories.
        let default = if matches!(default, Value::Data(serde_json::Value::Bool(false))) {
            tables.mandatory.push(category);
            CategoryDefault::Required
        } else {
            CategoryDefault::Value(default)
        };
        tables.categories.insert(
            category,
            Category {
                kind: CategoryKind::Value,
                default,
            },
        );
    }
    Ok(())
}

fn check_new_category(tables: &Tables, category: Token) -> Result<()> {
    if category.name().is_empty() {
        return Err(Error::InvalidSpecification("empty category token".into()));
    }
    if tables.categories.contains_key(&category) {
        return Err(Error::InvalidSpecification(format!(
            "duplicate category: {category}"
        )));
    }
    Ok(())
}

fn register_option(
    tables: &mut Tables,
    category: Token,
    option: Token,
    registered: &mut Vec<Token>,
) -> Result<()> {
    if option.name().is_empty() {
        return Err(Error::InvalidSpecification(format!(
            "empty option token in category {category}"
        )));
    }
    // The option namespace spans every category's options plus the value
    // category names; a choice category's own name is deliberately not in
    // it, so `choice("history", "history", ...)` stays legal.
    let taken = tables.owners.contains_key(&option)
        || tables
            .categories
            .get(&option)
            .is_some_and(|existing| !existing.is_choice());
    if taken {
        return Err(Error::InvalidSpecification(format!(
            "duplicate option: {option}"
        )));
    }
    tables.owners.insert(option, category);
    registered.push(option);
    Ok(())
}

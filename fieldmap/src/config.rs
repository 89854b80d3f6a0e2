//! Configuration-driven mapper.
//!
//! [`MapperConfig`] is plain serde data so it can live in an application's
//! own configuration file; [`ConfiguredMapper`] applies it.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::{FieldDescriptor, Mapper, NullPolicy};

/// Settings for a [`ConfiguredMapper`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    pub null_policy: NullPolicy,
    /// Case convention for fields without an explicit rename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename_rule: Option<RenameRule>,
}

impl MapperConfig {
    /// Parse a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Case conventions applied to snake_case field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenameRule {
    #[serde(rename = "lowercase")]
    LowerCase,
    #[serde(rename = "UPPERCASE")]
    UpperCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "SCREAMING_SNAKE_CASE")]
    ScreamingSnakeCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
}

impl RenameRule {
    pub fn apply(self, name: &str) -> String {
        match self {
            RenameRule::LowerCase | RenameRule::SnakeCase => name.to_ascii_lowercase(),
            RenameRule::UpperCase | RenameRule::ScreamingSnakeCase => name.to_ascii_uppercase(),
            RenameRule::KebabCase => name.to_ascii_lowercase().replace('_', "-"),
            RenameRule::PascalCase => join_capitalized(name, true),
            RenameRule::CamelCase => join_capitalized(name, false),
        }
    }
}

fn join_capitalized(name: &str, capitalize_first: bool) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, word) in name.split('_').filter(|w| !w.is_empty()).enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i > 0 || capitalize_first {
                out.push(first.to_ascii_uppercase());
            } else {
                out.push(first.to_ascii_lowercase());
            }
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    out
}

/// A [`Mapper`] whose naming and null handling come from a [`MapperConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConfiguredMapper {
    config: MapperConfig,
}

impl ConfiguredMapper {
    pub fn new(config: MapperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }
}

impl Mapper for ConfiguredMapper {
    /// Explicit renames always win over the rename rule.
    fn name(&self, field: &FieldDescriptor) -> Cow<'static, str> {
        match (field.renamed(), self.config.rename_rule) {
            (Some(renamed), _) => Cow::Borrowed(renamed),
            (None, Some(rule)) => Cow::Owned(rule.apply(field.name())),
            (None, None) => Cow::Borrowed(field.name()),
        }
    }

    fn null_policy(&self) -> NullPolicy {
        self.config.null_policy
    }
}

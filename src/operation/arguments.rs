//! Typed access to an operation's untyped property bag.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::command::UpdateAttributes;
use crate::metamodel::ElementKind;

use super::request::DecodeError;

/// Member visibility vocabulary carried in the `visibility` property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
    Package,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Package => "package",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            "protected" => Some(Visibility::Protected),
            "package" => Some(Visibility::Package),
            _ => None,
        }
    }
}

/// Validated view over `properties`.
///
/// Recognized keys are type-specific; unknown keys are ignored. Absent
/// keys fall back to defined defaults, malformed values are decode
/// errors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OperationArgs {
    properties: IndexMap<String, String>,
}

impl OperationArgs {
    pub fn new(properties: IndexMap<String, String>) -> Self {
        Self { properties }
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Parse a `"true"`/`"false"` property. Absent is `None`; anything
    /// else is malformed.
    pub fn boolean(&self, key: &str) -> Result<Option<bool>, DecodeError> {
        match self.properties.get(key).map(String::as_str) {
            None => Ok(None),
            Some("true") => Ok(Some(true)),
            Some("false") => Ok(Some(false)),
            Some(other) => Err(DecodeError::MalformedProperty {
                key: key.into(),
                message: format!("expected \"true\" or \"false\", got \"{other}\""),
            }),
        }
    }

    /// Parse the `visibility` property, defaulting to public.
    pub fn visibility(&self) -> Result<Visibility, DecodeError> {
        match self.properties.get("visibility") {
            None => Ok(Visibility::default()),
            Some(value) => Visibility::parse(value).ok_or_else(|| DecodeError::MalformedProperty {
                key: "visibility".into(),
                message: format!("unknown visibility \"{value}\""),
            }),
        }
    }

    /// Attribute changes for a create operation: every recognized field
    /// gets a value, falling back to the kind's defaults.
    pub fn create_attributes(&self, kind: ElementKind) -> Result<UpdateAttributes, DecodeError> {
        let name = self
            .string("name")
            .map(SmolStr::new)
            .unwrap_or_else(|| SmolStr::new(kind.display_label()));
        let is_abstract = self.boolean("is_abstract")?.unwrap_or(false);
        let mut properties = Vec::new();
        if self.properties.contains_key("visibility") {
            let visibility = self.visibility()?;
            properties.push(("visibility".into(), Some(visibility.as_str().to_owned())));
        }
        Ok(UpdateAttributes {
            name: Some(name),
            is_abstract: Some(is_abstract),
            properties,
        })
    }

    /// Attribute changes for an update operation: only the fields the
    /// client actually sent.
    pub fn update_attributes(&self) -> Result<UpdateAttributes, DecodeError> {
        let mut properties = Vec::new();
        if self.properties.contains_key("visibility") {
            let visibility = self.visibility()?;
            properties.push(("visibility".into(), Some(visibility.as_str().to_owned())));
        }
        Ok(UpdateAttributes {
            name: self.string("name").map(SmolStr::new),
            is_abstract: self.boolean("is_abstract")?,
            properties,
        })
    }
}

//! Declared model schemas.
//!
//! Model generation is explicit data: each model names its fields and types
//! up front, and the generator collaborator receives them as plain
//! arguments. Nothing is inferred at runtime.

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Column types understood by the external generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Text,
    Integer,
    Boolean,
    Date,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }
}

/// One declared column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A declared model handed to the external generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Model name, possibly namespaced (`blog/post`).
    pub name: String,
    /// Parent class override (`--parent=<name>`).
    #[serde(default)]
    pub parent: Option<String>,
    /// Whether the generator should emit a migration. Defaults to true.
    #[serde(default = "default_migration")]
    pub migration: bool,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

fn default_migration() -> bool {
    true
}

impl ModelSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            migration: true,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(FieldSpec::new(name, ty));
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn without_migration(mut self) -> Self {
        self.migration = false;
        self
    }

    /// Check structural invariants: a name, and unique non-empty fields.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::InvalidSchema {
                model: self.name.clone(),
                reason: "model name is empty".into(),
            });
        }
        for (i, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(DomainError::InvalidSchema {
                    model: self.name.clone(),
                    reason: format!("field {i} has an empty name"),
                });
            }
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(DomainError::InvalidSchema {
                    model: self.name.clone(),
                    reason: format!("duplicate field '{}'", field.name),
                });
            }
        }
        Ok(())
    }

    /// Argument list for the generator collaborator: the model name,
    /// `name:type` pairs, then flag overrides.
    pub fn generator_args(&self) -> Vec<String> {
        let mut args = vec![self.name.clone()];
        for field in &self.fields {
            args.push(format!("{}:{}", field.name, field.ty.as_str()));
        }
        if !self.migration {
            args.push("--migration=false".into());
        }
        if let Some(parent) = &self.parent {
            args.push(format!("--parent={parent}"));
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_args_include_typed_fields() {
        let model = ModelSpec::new("post")
            .field("title", FieldType::String)
            .field("body", FieldType::Text)
            .field("starred", FieldType::Boolean);
        assert_eq!(
            model.generator_args(),
            vec!["post", "title:string", "body:text", "starred:boolean"]
        );
    }

    #[test]
    fn generator_args_include_parent_and_migration_flags() {
        let model = ModelSpec::new("publisher")
            .without_migration()
            .parent("User");
        assert_eq!(
            model.generator_args(),
            vec!["publisher", "--migration=false", "--parent=User"]
        );
    }

    #[test]
    fn duplicate_fields_rejected() {
        let model = ModelSpec::new("tag")
            .field("name", FieldType::String)
            .field("name", FieldType::String);
        assert!(matches!(
            model.validate(),
            Err(DomainError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn namespaced_model_names_allowed() {
        let model = ModelSpec::new("blog/post").field("title", FieldType::String);
        assert!(model.validate().is_ok());
        assert_eq!(model.generator_args()[0], "blog/post");
    }

    #[test]
    fn empty_model_name_rejected() {
        assert!(ModelSpec::new("").validate().is_err());
    }
}

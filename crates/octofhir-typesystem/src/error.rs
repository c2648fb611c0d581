//! Error types for the type system core.
//!
//! Errors fall into three groups:
//!
//! - [`SchemaError`] - a single definition-time violation found while
//!   finalizing the schema.
//! - [`BuildError`] - the aggregate returned by `finalize()`, carrying every
//!   violation found in one pass.
//! - [`TypeSystemError`] - lookup and resolution failures raised while the
//!   executor reads the frozen schema.
//!
//! None of these are transient. Callers should never retry them.

use std::fmt;

use thiserror::Error;

use crate::types::TypeKind;

/// A single definition-time violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Type `{name}` is defined more than once")]
    DuplicateType { name: String },

    #[error("Field `{field}` is declared more than once on `{owner}`")]
    DuplicateField { owner: String, field: String },

    #[error("`{name}` is declared more than once on `{owner}`")]
    DuplicateMember { owner: String, name: String },

    #[error("`{name}` is not a valid GraphQL name")]
    InvalidName { name: String },

    #[error("`{referenced_by}` references undefined type `{type_name}`")]
    UndefinedType {
        referenced_by: String,
        type_name: String,
    },

    #[error("`{referenced_by}` uses `{type_name}` where {expected} type is required")]
    InvalidTypeUsage {
        referenced_by: String,
        type_name: String,
        expected: &'static str,
    },

    #[error("Object `{object}` implements `{name}`, which is not an interface")]
    InvalidImplements { object: String, name: String },

    #[error("Root {operation} type `{type_name}` must be a defined object type")]
    InvalidRootType {
        operation: &'static str,
        type_name: String,
    },

    #[error("`{object}` does not satisfy interface `{interface}` on field `{field}`: {reason}")]
    InterfaceContractViolation {
        interface: String,
        object: String,
        field: String,
        reason: String,
    },

    #[error("{kind} `{name}` must define at least one {member}")]
    EmptyType {
        name: String,
        kind: TypeKind,
        member: &'static str,
    },

    #[error("`{owner}` declares a behavior for `{field}`, which is not a field of `{object}`")]
    BehaviorWithoutField {
        owner: String,
        object: String,
        field: String,
    },
}

/// Aggregate of every violation found by a single `finalize()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    violations: Vec<SchemaError>,
}

impl BuildError {
    /// Creates a build error from the collected violations.
    #[must_use]
    pub fn new(violations: Vec<SchemaError>) -> Self {
        Self { violations }
    }

    /// Returns all violations in the order they were found.
    #[must_use]
    pub fn violations(&self) -> &[SchemaError] {
        &self.violations
    }

    /// Returns the number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Schema build failed with {} violation(s)",
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BuildError {}

impl IntoIterator for BuildError {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

/// Failure raised by an application-supplied field behavior.
///
/// The core never inspects or retries these; they propagate to the executor
/// for the field being resolved.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct FieldError {
    /// Human readable message.
    pub message: String,

    /// Optional structured details forwarded as GraphQL error extensions.
    pub extensions: Option<serde_json::Value>,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: None,
        }
    }

    /// Attaches structured extension data to the error.
    #[must_use]
    pub fn with_extensions(mut self, extensions: serde_json::Value) -> Self {
        self.extensions = Some(extensions);
        self
    }
}

/// Errors raised while reading or resolving against the schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeSystemError {
    #[error("Schema has not been finalized")]
    SchemaNotFinalized,

    #[error("Type `{0}` is not part of the schema")]
    TypeNotFound(String),

    #[error("Field `{field}` not found on `{owner}`")]
    FieldNotFound { owner: String, field: String },

    #[error("No behavior is defined for `{owner}.{field}`")]
    BehaviorNotFound { owner: String, field: String },

    #[error("`{0}` is not an interface or union")]
    NotAbstractType(String),

    #[error("Unable to resolve the concrete type of a `{declared}` value")]
    UnresolvableType { declared: String },

    #[error("Value of `{declared}` resolved to `{resolved}`, which is not part of the schema")]
    UnknownType { declared: String, resolved: String },

    #[error("Value of `{declared}` resolved to `{resolved}`, which is not a possible type of `{declared}`")]
    NotPossibleType { declared: String, resolved: String },

    #[error("Missing required argument `{argument}` for `{owner}.{field}`")]
    MissingArgument {
        owner: String,
        field: String,
        argument: String,
    },

    #[error("Invalid value for `{owner}.{field}`: {message}")]
    InvalidValue {
        owner: String,
        field: String,
        message: String,
    },

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Failed to build executable schema: {0}")]
    DynamicSchema(String),
}

impl TypeSystemError {
    /// Returns the error code for GraphQL error extensions.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SchemaNotFinalized => "SCHEMA_NOT_FINALIZED",
            Self::TypeNotFound(_) => "TYPE_NOT_FOUND",
            Self::FieldNotFound { .. } => "FIELD_NOT_FOUND",
            Self::BehaviorNotFound { .. } => "BEHAVIOR_NOT_FOUND",
            Self::NotAbstractType(_) => "NOT_ABSTRACT_TYPE",
            Self::UnresolvableType { .. } => "UNRESOLVABLE_TYPE",
            Self::UnknownType { .. } => "UNKNOWN_TYPE",
            Self::NotPossibleType { .. } => "NOT_POSSIBLE_TYPE",
            Self::MissingArgument { .. } => "MISSING_ARGUMENT",
            Self::InvalidValue { .. } => "INVALID_VALUE",
            Self::Field(_) => "FIELD_ERROR",
            Self::Build(_) | Self::DynamicSchema(_) => "SCHEMA_BUILD_FAILED",
        }
    }

    /// Returns true for failures caused by schema configuration rather than
    /// by the value being resolved.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::SchemaNotFinalized
                | Self::UnresolvableType { .. }
                | Self::NotAbstractType(_)
                | Self::Build(_)
                | Self::DynamicSchema(_)
        )
    }
}

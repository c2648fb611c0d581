//! Field and argument definitions.

use serde_json::Value;

use super::behavior::FieldBehavior;
use super::type_ref::TypeRef;

/// An argument of a field, or an input field of an input object.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentDefinition {
    pub name: String,
    pub ty: TypeRef,
    pub default_value: Option<Value>,
    pub description: Option<String>,
}

impl ArgumentDefinition {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default_value: None,
            description: None,
        }
    }

    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// An argument is required when its type is non-null and it carries no
    /// default.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.ty.is_non_null() && self.default_value.is_none()
    }
}

/// A field of an object or interface type.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: TypeRef,
    pub arguments: Vec<ArgumentDefinition>,
    pub description: Option<String>,
    pub deprecation: Option<String>,
    pub resolver: Option<FieldBehavior>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            arguments: Vec::new(),
            description: None,
            deprecation: None,
            resolver: None,
        }
    }

    #[must_use]
    pub fn argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation = Some(reason.into());
        self
    }

    /// Attaches an inline resolver behavior.
    #[must_use]
    pub fn resolver(mut self, behavior: FieldBehavior) -> Self {
        self.resolver = Some(behavior);
        self
    }

    #[must_use]
    pub fn is_nullable(&self) -> bool {
        !self.ty.is_non_null()
    }

    #[must_use]
    pub fn argument_named(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

impl PartialEq for FieldDefinition {
    fn eq(&self, other: &Self) -> bool {
        let same_resolver = match (&self.resolver, &other.resolver) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            (None, None) => true,
            _ => false,
        };

        same_resolver
            && self.name == other.name
            && self.ty == other.ty
            && self.arguments == other.arguments
            && self.description == other.description
            && self.deprecation == other.deprecation
    }
}

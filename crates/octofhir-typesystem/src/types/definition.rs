//! Type definitions as declared by schema authors.
//!
//! Definitions are plain data with builder-style constructors. Nothing here
//! validates; every violation is collected by `SchemaRegistry::finalize`.

use std::fmt;

use indexmap::IndexMap;

use super::behavior::{FieldBehavior, ResolveTypeBehavior};
use super::field::{ArgumentDefinition, FieldDefinition};

/// An interface: a named field contract shared by implementing objects.
#[derive(Debug, Clone)]
pub struct InterfaceDefinition {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDefinition>,
    /// Implementation behaviors merged into every implementer, keyed by
    /// field name.
    pub behaviors: IndexMap<String, FieldBehavior>,
    pub resolve_type: Option<ResolveTypeBehavior>,
    /// Implementers that must be part of the schema even when no field
    /// returns them.
    pub orphan_types: Vec<String>,
}

impl InterfaceDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            behaviors: IndexMap::new(),
            resolve_type: None,
            orphan_types: Vec::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn behavior(mut self, field: impl Into<String>, behavior: FieldBehavior) -> Self {
        self.behaviors.insert(field.into(), behavior);
        self
    }

    #[must_use]
    pub fn resolve_type(mut self, behavior: ResolveTypeBehavior) -> Self {
        self.resolve_type = Some(behavior);
        self
    }

    #[must_use]
    pub fn orphan_type(mut self, type_name: impl Into<String>) -> Self {
        self.orphan_types.push(type_name.into());
        self
    }
}

/// A concrete, instantiable object type.
#[derive(Debug, Clone)]
pub struct ObjectDefinition {
    pub name: String,
    pub description: Option<String>,
    /// Implemented interfaces in declaration order. Earlier interfaces win
    /// when two of them contribute the same field or behavior.
    pub implements: Vec<String>,
    pub fields: Vec<FieldDefinition>,
    pub behaviors: IndexMap<String, FieldBehavior>,
}

impl ObjectDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            implements: Vec::new(),
            fields: Vec::new(),
            behaviors: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn behavior(mut self, field: impl Into<String>, behavior: FieldBehavior) -> Self {
        self.behaviors.insert(field.into(), behavior);
        self
    }
}

/// A union of object types.
#[derive(Debug, Clone)]
pub struct UnionDefinition {
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<String>,
    pub resolve_type: Option<ResolveTypeBehavior>,
}

impl UnionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            members: Vec::new(),
            resolve_type: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn member(mut self, type_name: impl Into<String>) -> Self {
        self.members.push(type_name.into());
        self
    }

    #[must_use]
    pub fn resolve_type(mut self, behavior: ResolveTypeBehavior) -> Self {
        self.resolve_type = Some(behavior);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarDefinition {
    pub name: String,
    pub description: Option<String>,
}

impl ScalarDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDefinition {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<String>,
}

impl EnumDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectDefinition {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<ArgumentDefinition>,
}

impl InputObjectDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: ArgumentDefinition) -> Self {
        self.fields.push(field);
        self
    }
}

/// Kind of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl TypeKind {
    /// Whether values of this kind may be returned by a field.
    #[must_use]
    pub fn is_output(self) -> bool {
        !matches!(self, Self::InputObject)
    }

    /// Whether values of this kind may be passed as an argument.
    #[must_use]
    pub fn is_input(self) -> bool {
        matches!(self, Self::Scalar | Self::Enum | Self::InputObject)
    }

    #[must_use]
    pub fn is_abstract(self) -> bool {
        matches!(self, Self::Interface | Self::Union)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
        };
        f.write_str(name)
    }
}

/// Any type that can be registered in a schema.
#[derive(Debug, Clone)]
pub enum TypeDefinition {
    Scalar(ScalarDefinition),
    Object(ObjectDefinition),
    Interface(InterfaceDefinition),
    Union(UnionDefinition),
    Enum(EnumDefinition),
    InputObject(InputObjectDefinition),
}

impl TypeDefinition {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(def) => &def.name,
            Self::Object(def) => &def.name,
            Self::Interface(def) => &def.name,
            Self::Union(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::InputObject(def) => &def.name,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(def) => def.description.as_deref(),
            Self::Object(def) => def.description.as_deref(),
            Self::Interface(def) => def.description.as_deref(),
            Self::Union(def) => def.description.as_deref(),
            Self::Enum(def) => def.description.as_deref(),
            Self::InputObject(def) => def.description.as_deref(),
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectDefinition> {
        match self {
            Self::Object(def) => Some(def),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_interface(&self) -> Option<&InterfaceDefinition> {
        match self {
            Self::Interface(def) => Some(def),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_union(&self) -> Option<&UnionDefinition> {
        match self {
            Self::Union(def) => Some(def),
            _ => None,
        }
    }
}

impl From<ScalarDefinition> for TypeDefinition {
    fn from(def: ScalarDefinition) -> Self {
        Self::Scalar(def)
    }
}

impl From<ObjectDefinition> for TypeDefinition {
    fn from(def: ObjectDefinition) -> Self {
        Self::Object(def)
    }
}

impl From<InterfaceDefinition> for TypeDefinition {
    fn from(def: InterfaceDefinition) -> Self {
        Self::Interface(def)
    }
}

impl From<UnionDefinition> for TypeDefinition {
    fn from(def: UnionDefinition) -> Self {
        Self::Union(def)
    }
}

impl From<EnumDefinition> for TypeDefinition {
    fn from(def: EnumDefinition) -> Self {
        Self::Enum(def)
    }
}

impl From<InputObjectDefinition> for TypeDefinition {
    fn from(def: InputObjectDefinition) -> Self {
        Self::InputObject(def)
    }
}

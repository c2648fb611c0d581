//! The immutable result of `SchemaRegistry::finalize`.

use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

use super::composer::{BehaviorEntry, is_possible_type};
use super::field_registry::FieldRegistry;
use super::resolver::TypeResolver;
use crate::config::SchemaConfig;
use crate::error::TypeSystemError;
use crate::types::{
    Arguments, FieldBehavior, FieldDefinition, ObjectDefinition, ResolveContext,
    ResolveTypeBehavior, TypeDefinition, TypeKind,
};

/// Root operation type names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootOperations {
    pub query: String,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

impl RootOperations {
    /// Iterates the configured root type names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.query.as_str())
            .chain(self.mutation.as_deref())
            .chain(self.subscription.as_deref())
    }
}

#[derive(Debug)]
pub(crate) struct FrozenParts {
    pub config: SchemaConfig,
    pub roots: RootOperations,
    pub types: IndexMap<String, TypeDefinition>,
    pub fields: FieldRegistry,
    pub behaviors: IndexMap<String, IndexMap<String, BehaviorEntry>>,
    pub reachable: BTreeSet<String>,
    pub default_resolve_type: Option<ResolveTypeBehavior>,
}

/// A finalized schema.
///
/// Cheap to clone and safe to share across threads. Every structure behind
/// it was computed once by `finalize()` and is never mutated afterwards, so
/// any number of concurrent requests can read it without synchronization.
#[derive(Debug, Clone)]
pub struct FrozenSchema {
    inner: Arc<FrozenParts>,
}

impl FrozenSchema {
    pub(crate) fn new(parts: FrozenParts) -> Self {
        Self {
            inner: Arc::new(parts),
        }
    }

    /// Returns true when both handles share the same frozen structures.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    #[must_use]
    pub fn config(&self) -> &SchemaConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn roots(&self) -> &RootOperations {
        &self.inner.roots
    }

    #[must_use]
    pub fn query_type(&self) -> &str {
        &self.inner.roots.query
    }

    #[must_use]
    pub fn mutation_type(&self) -> Option<&str> {
        self.inner.roots.mutation.as_deref()
    }

    #[must_use]
    pub fn subscription_type(&self) -> Option<&str> {
        self.inner.roots.subscription.as_deref()
    }

    /// Whether `name` is part of the final schema.
    #[must_use]
    pub fn is_reachable(&self, name: &str) -> bool {
        self.inner.reachable.contains(name)
    }

    /// Returns a type of the final schema. Registered types excluded by
    /// reachability are not returned.
    #[must_use]
    pub fn type_definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.inner.types.get(name).filter(|_| self.is_reachable(name))
    }

    /// All types of the final schema, sorted by name.
    ///
    /// An object type that implements an interface but is neither returned
    /// by any reachable field nor declared orphan is NOT included.
    #[must_use]
    pub fn reachable_types(&self) -> Vec<&TypeDefinition> {
        self.inner
            .reachable
            .iter()
            .filter_map(|name| self.inner.types.get(name))
            .collect()
    }

    /// Registered types that were left out of the final schema, sorted by
    /// name.
    #[must_use]
    pub fn excluded_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .inner
            .types
            .keys()
            .map(String::as_str)
            .filter(|name| !self.is_reachable(name))
            .collect();
        names.sort_unstable();
        names
    }

    fn field_owner(&self, type_name: &str) -> Result<&TypeDefinition, TypeSystemError> {
        self.type_definition(type_name)
            .filter(|def| matches!(def.kind(), TypeKind::Object | TypeKind::Interface))
            .ok_or_else(|| TypeSystemError::TypeNotFound(type_name.to_string()))
    }

    /// Effective fields of an object or interface type, in composition order.
    ///
    /// # Errors
    ///
    /// Returns `TypeNotFound` if the type is not an object or interface of
    /// the final schema.
    pub fn effective_fields(
        &self,
        type_name: &str,
    ) -> Result<&IndexMap<String, FieldDefinition>, TypeSystemError> {
        self.field_owner(type_name)?;
        self.inner
            .fields
            .effective(type_name)
            .ok_or_else(|| TypeSystemError::TypeNotFound(type_name.to_string()))
    }

    /// Looks up one effective field.
    pub fn field(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Result<&FieldDefinition, TypeSystemError> {
        self.field_owner(type_name)?;
        self.inner.fields.lookup(type_name, field_name)
    }

    /// Effective behavior table of an object type, with the origin of each
    /// behavior.
    pub fn effective_behaviors(
        &self,
        type_name: &str,
    ) -> Result<&IndexMap<String, BehaviorEntry>, TypeSystemError> {
        self.type_definition(type_name)
            .and_then(TypeDefinition::as_object)
            .and_then(|_| self.inner.behaviors.get(type_name))
            .ok_or_else(|| TypeSystemError::TypeNotFound(type_name.to_string()))
    }

    /// Effective behavior of a field of an object type.
    ///
    /// # Errors
    ///
    /// Returns `TypeNotFound`, `FieldNotFound`, or `BehaviorNotFound` when
    /// the field exists but neither the object nor its interfaces define a
    /// behavior for it.
    pub fn effective_behavior(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Result<&FieldBehavior, TypeSystemError> {
        let behaviors = self.effective_behaviors(type_name)?;
        self.inner.fields.lookup(type_name, field_name)?;
        behaviors
            .get(field_name)
            .map(|entry| &entry.behavior)
            .ok_or_else(|| TypeSystemError::BehaviorNotFound {
                owner: type_name.to_string(),
                field: field_name.to_string(),
            })
    }

    /// Resolves the concrete object type of a value returned for an
    /// interface or union.
    ///
    /// # Errors
    ///
    /// - `UnresolvableType` when neither the declared type nor the schema
    ///   configures a resolve-type behavior that answers.
    /// - `UnknownType` when the answer names a type outside the final schema.
    /// - `NotPossibleType` when the answer is not an implementer or member.
    pub fn resolve_type(
        &self,
        value: &Value,
        declared: &str,
        ctx: &ResolveContext,
    ) -> Result<&ObjectDefinition, TypeSystemError> {
        TypeResolver {
            types: &self.inner.types,
            reachable: &self.inner.reachable,
            default_resolve_type: self.inner.default_resolve_type.as_ref(),
        }
        .resolve(value, declared, ctx)
    }

    /// Object types of the final schema a value of the abstract type
    /// `declared` may resolve to.
    pub fn possible_types(
        &self,
        declared: &str,
    ) -> Result<Vec<&ObjectDefinition>, TypeSystemError> {
        let definition = self
            .type_definition(declared)
            .ok_or_else(|| TypeSystemError::TypeNotFound(declared.to_string()))?;

        if !definition.kind().is_abstract() {
            return Err(TypeSystemError::NotAbstractType(declared.to_string()));
        }

        Ok(self
            .reachable_types()
            .into_iter()
            .filter_map(TypeDefinition::as_object)
            .filter(|object| is_possible_type(&self.inner.types, &object.name, declared))
            .collect())
    }

    /// Resolves one field of a parent value.
    ///
    /// Arguments are coerced against the field definition first: missing
    /// arguments take their default, and a missing or null required argument
    /// fails. The effective behavior is then invoked; fields without a
    /// behavior read the member of the parent object named like the field.
    pub fn resolve_field(
        &self,
        type_name: &str,
        field_name: &str,
        parent: &Value,
        args: &Arguments,
        ctx: &ResolveContext,
    ) -> Result<Value, TypeSystemError> {
        let field = self.field(type_name, field_name)?;
        let args = coerce_arguments(type_name, field, args)?;

        let behavior = self
            .inner
            .behaviors
            .get(type_name)
            .and_then(|behaviors| behaviors.get(field_name));

        match behavior {
            Some(entry) => {
                trace!(
                    type_name = %type_name,
                    field = %field_name,
                    origin = %entry.origin,
                    "Invoking field behavior"
                );
                Ok(entry.behavior.call(parent, &args, ctx)?)
            }
            None => Ok(parent.get(field_name).cloned().unwrap_or(Value::Null)),
        }
    }
}

fn coerce_arguments(
    owner: &str,
    field: &FieldDefinition,
    provided: &Arguments,
) -> Result<Arguments, TypeSystemError> {
    let mut args = Arguments::new();

    for argument in &field.arguments {
        let value = match provided.get(&argument.name) {
            Some(value) => Some(value.clone()),
            None => argument.default_value.clone(),
        };

        match value {
            Some(Value::Null) | None if argument.ty.is_non_null() => {
                return Err(TypeSystemError::MissingArgument {
                    owner: owner.to_string(),
                    field: field.name.clone(),
                    argument: argument.name.clone(),
                });
            }
            Some(value) => {
                args.insert(argument.name.clone(), value);
            }
            None => {}
        }
    }

    Ok(args)
}

//! Value conversion between the core and `async-graphql`.

use std::borrow::Cow;

use async_graphql::dynamic::{FieldValue, ResolverContext, TypeRef as DynamicTypeRef};
use async_graphql::{ErrorExtensions, Name, Value as GraphQLValue};
use serde_json::Value;
use tracing::trace;

use crate::error::TypeSystemError;
use crate::schema::FrozenSchema;
use crate::types::{Arguments, ResolveContext, TypeDefinition, TypeRef};

/// Converts a core type reference into the `async-graphql` one.
#[must_use]
pub fn to_dynamic_type_ref(ty: &TypeRef) -> DynamicTypeRef {
    match ty {
        TypeRef::Named(name) => DynamicTypeRef::named(name.clone()),
        TypeRef::List(inner) => DynamicTypeRef::List(Box::new(to_dynamic_type_ref(inner))),
        TypeRef::NonNull(inner) => DynamicTypeRef::NonNull(Box::new(to_dynamic_type_ref(inner))),
    }
}

/// Converts a type system error into a GraphQL error carrying its code, plus
/// the extensions of a behavior failure.
#[must_use]
pub fn to_graphql_error(err: TypeSystemError) -> async_graphql::Error {
    let code = err.error_code();
    let extensions = match &err {
        TypeSystemError::Field(field) => field.extensions.clone(),
        _ => None,
    };

    async_graphql::Error::new(err.to_string()).extend_with(move |_, e| {
        e.set("code", code.to_string());
        if let Some(Value::Object(entries)) = extensions {
            for (key, value) in entries {
                if let Ok(value) = GraphQLValue::from_json(value) {
                    e.set(key, value);
                }
            }
        }
    })
}

/// Resolves one object field for the executor.
pub(super) fn resolve<'a>(
    schema: &FrozenSchema,
    owner: &str,
    field_name: &str,
    ctx: &ResolverContext<'_>,
) -> Result<Option<FieldValue<'a>>, TypeSystemError> {
    let field = schema.field(owner, field_name)?;
    let invalid = |message: String| TypeSystemError::InvalidValue {
        owner: owner.to_string(),
        field: field_name.to_string(),
        message,
    };

    let parent = match ctx.parent_value.try_downcast_ref::<Value>() {
        Ok(parent) => Cow::Borrowed(parent),
        Err(_) => Cow::Owned(match ctx.parent_value.as_value() {
            Some(parent) => parent.clone().into_json().map_err(|e| invalid(e.to_string()))?,
            None => Value::Null,
        }),
    };

    let mut args = Arguments::new();
    for (name, value) in ctx.args.as_index_map() {
        let value = value.clone().into_json().map_err(|e| invalid(e.to_string()))?;
        args.insert(name.to_string(), value);
    }

    let request = ctx.ctx.data_opt::<ResolveContext>().cloned().unwrap_or_default();

    let value = schema.resolve_field(owner, field_name, &parent, &args, &request)?;

    Lowering {
        schema,
        ctx: &request,
        invalid: &invalid,
    }
    .lower(&field.ty, value)
}

struct Lowering<'s, F> {
    schema: &'s FrozenSchema,
    ctx: &'s ResolveContext,
    invalid: &'s F,
}

impl<F> Lowering<'_, F>
where
    F: Fn(String) -> TypeSystemError,
{
    fn lower<'a>(
        &self,
        ty: &TypeRef,
        value: Value,
    ) -> Result<Option<FieldValue<'a>>, TypeSystemError> {
        if value.is_null() {
            return Ok(None);
        }

        match ty {
            TypeRef::NonNull(inner) => self.lower(inner, value),
            TypeRef::List(inner) => {
                let Value::Array(items) = value else {
                    return Err((self.invalid)(format!("expected a list for `{ty}`")));
                };
                let items = items
                    .into_iter()
                    .map(|item| Ok(self.lower(inner, item)?.unwrap_or(FieldValue::NULL)))
                    .collect::<Result<Vec<_>, TypeSystemError>>()?;
                Ok(Some(FieldValue::list(items)))
            }
            TypeRef::Named(name) => self.lower_named(name, value).map(Some),
        }
    }

    fn lower_named<'a>(&self, name: &str, value: Value) -> Result<FieldValue<'a>, TypeSystemError> {
        let definition = self
            .schema
            .type_definition(name)
            .ok_or_else(|| TypeSystemError::TypeNotFound(name.to_string()))?;

        match definition {
            TypeDefinition::Scalar(_) => GraphQLValue::from_json(value)
                .map(FieldValue::value)
                .map_err(|e| (self.invalid)(e.to_string())),
            TypeDefinition::Enum(enumeration) => match value {
                Value::String(item) if enumeration.values.contains(&item) => {
                    Ok(FieldValue::value(GraphQLValue::Enum(Name::new(item))))
                }
                other => Err((self.invalid)(format!("`{other}` is not a value of enum `{name}`"))),
            },
            TypeDefinition::Object(_) => Ok(FieldValue::owned_any(value)),
            TypeDefinition::Interface(_) | TypeDefinition::Union(_) => {
                let concrete = self.schema.resolve_type(&value, name, self.ctx)?.name.clone();
                trace!(declared = %name, resolved = %concrete, "Tagging abstract value");
                Ok(FieldValue::owned_any(value).with_type(concrete))
            }
            TypeDefinition::InputObject(_) => Err((self.invalid)(format!(
                "input object `{name}` cannot be returned from a field"
            ))),
        }
    }
}

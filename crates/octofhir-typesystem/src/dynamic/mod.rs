//! Lowering of a frozen schema into an executable `async-graphql` schema.
//!
//! Only reachable types are registered. Every object field is wired to
//! [`FrozenSchema::resolve_field`], and values returned for interface or
//! union fields are tagged with the concrete type chosen by
//! [`FrozenSchema::resolve_type`]. Parsing, validation and execution are
//! left to `async-graphql`.
//!
//! Per-request data reaches field behaviors as a [`ResolveContext`] attached
//! to the request with `Request::data`. Requests without one resolve with an
//! empty context.
//!
//! [`ResolveContext`]: crate::types::ResolveContext

mod values;

use async_graphql::dynamic::{
    Enum, EnumItem, Field, FieldFuture, InputObject, InputValue, Interface, InterfaceField, Object,
    Scalar, Schema, SchemaBuilder, Union,
};
use tracing::debug;

use crate::config::SchemaConfig;
use crate::error::TypeSystemError;
use crate::schema::FrozenSchema;
use crate::types::{
    ArgumentDefinition, BUILTIN_SCALARS, FieldDefinition, InterfaceDefinition, ObjectDefinition,
    TypeDefinition,
};

pub use values::{to_dynamic_type_ref, to_graphql_error};

/// Builds an `async_graphql::dynamic::Schema` from a [`FrozenSchema`].
pub struct DynamicSchemaBuilder {
    frozen: FrozenSchema,
    config: SchemaConfig,
}

impl DynamicSchemaBuilder {
    /// Creates a builder for the given frozen schema and executor settings.
    pub fn new(frozen: FrozenSchema, config: SchemaConfig) -> Self {
        Self { frozen, config }
    }

    /// Registers all reachable types and applies the configured limits.
    ///
    /// # Errors
    ///
    /// Returns `DynamicSchema` if the configuration is invalid, the schema
    /// declares a subscription root, a default value cannot be converted, or
    /// `async-graphql` rejects the assembled schema.
    pub fn build(&self) -> Result<Schema, TypeSystemError> {
        self.config.validate().map_err(TypeSystemError::DynamicSchema)?;

        if let Some(subscription) = self.frozen.subscription_type() {
            return Err(TypeSystemError::DynamicSchema(format!(
                "subscription root `{subscription}` cannot be lowered, subscriptions are not supported"
            )));
        }

        debug!(
            types = self.frozen.reachable_types().len(),
            "Building executable schema"
        );

        let mut builder =
            Schema::build(self.frozen.query_type(), self.frozen.mutation_type(), None);

        for definition in self.frozen.reachable_types() {
            if BUILTIN_SCALARS.contains(&definition.name()) {
                continue;
            }
            builder = self.register(builder, definition)?;
        }

        let mut builder = builder.limit_depth(self.config.max_depth);
        builder = builder.limit_complexity(self.config.max_complexity);

        if !self.config.introspection {
            builder = builder.disable_introspection();
        }

        let schema = builder
            .finish()
            .map_err(|e| TypeSystemError::DynamicSchema(e.to_string()))?;

        debug!("Executable schema build complete");
        Ok(schema)
    }

    fn register(
        &self,
        builder: SchemaBuilder,
        definition: &TypeDefinition,
    ) -> Result<SchemaBuilder, TypeSystemError> {
        let builder = match definition {
            TypeDefinition::Object(object) => builder.register(self.build_object(object)?),
            TypeDefinition::Interface(interface) => {
                builder.register(self.build_interface(interface)?)
            }
            TypeDefinition::Union(union) => {
                let mut lowered = Union::new(&union.name);
                for member in &union.members {
                    lowered = lowered.possible_type(member);
                }
                if let Some(description) = &union.description {
                    lowered = lowered.description(description);
                }
                builder.register(lowered)
            }
            TypeDefinition::Scalar(scalar) => {
                let mut lowered = Scalar::new(&scalar.name);
                if let Some(description) = &scalar.description {
                    lowered = lowered.description(description);
                }
                builder.register(lowered)
            }
            TypeDefinition::Enum(enumeration) => {
                let mut lowered = Enum::new(&enumeration.name);
                for value in &enumeration.values {
                    lowered = lowered.item(EnumItem::new(value));
                }
                if let Some(description) = &enumeration.description {
                    lowered = lowered.description(description);
                }
                builder.register(lowered)
            }
            TypeDefinition::InputObject(input) => {
                let mut lowered = InputObject::new(&input.name);
                for field in &input.fields {
                    lowered = lowered.field(input_value(field)?);
                }
                if let Some(description) = &input.description {
                    lowered = lowered.description(description);
                }
                builder.register(lowered)
            }
        };
        Ok(builder)
    }

    fn build_object(&self, object: &ObjectDefinition) -> Result<Object, TypeSystemError> {
        let mut lowered = Object::new(&object.name);
        if let Some(description) = &object.description {
            lowered = lowered.description(description);
        }

        for interface in &object.implements {
            if self.frozen.is_reachable(interface) {
                lowered = lowered.implement(interface);
            }
        }

        for field in self.frozen.effective_fields(&object.name)?.values() {
            lowered = lowered.field(self.build_field(&object.name, field)?);
        }

        Ok(lowered)
    }

    fn build_field(&self, owner: &str, field: &FieldDefinition) -> Result<Field, TypeSystemError> {
        let schema = self.frozen.clone();
        let owner = owner.to_string();
        let field_name = field.name.clone();

        let mut lowered = Field::new(&field.name, to_dynamic_type_ref(&field.ty), move |ctx| {
            let schema = schema.clone();
            let owner = owner.clone();
            let field_name = field_name.clone();
            FieldFuture::new(async move {
                values::resolve(&schema, &owner, &field_name, &ctx).map_err(to_graphql_error)
            })
        });

        if let Some(description) = &field.description {
            lowered = lowered.description(description);
        }
        if let Some(reason) = &field.deprecation {
            lowered = lowered.deprecation(Some(reason.as_str()));
        }
        for argument in &field.arguments {
            lowered = lowered.argument(input_value(argument)?);
        }

        Ok(lowered)
    }

    fn build_interface(
        &self,
        interface: &InterfaceDefinition,
    ) -> Result<Interface, TypeSystemError> {
        let mut lowered = Interface::new(&interface.name);
        if let Some(description) = &interface.description {
            lowered = lowered.description(description);
        }

        for field in self.frozen.effective_fields(&interface.name)?.values() {
            let mut lowered_field =
                InterfaceField::new(&field.name, to_dynamic_type_ref(&field.ty));
            if let Some(description) = &field.description {
                lowered_field = lowered_field.description(description);
            }
            if let Some(reason) = &field.deprecation {
                lowered_field = lowered_field.deprecation(Some(reason.as_str()));
            }
            for argument in &field.arguments {
                lowered_field = lowered_field.argument(input_value(argument)?);
            }
            lowered = lowered.field(lowered_field);
        }

        Ok(lowered)
    }
}

fn input_value(argument: &ArgumentDefinition) -> Result<InputValue, TypeSystemError> {
    let mut lowered = InputValue::new(&argument.name, to_dynamic_type_ref(&argument.ty));
    if let Some(description) = &argument.description {
        lowered = lowered.description(description);
    }
    if let Some(default) = &argument.default_value {
        let default = async_graphql::Value::from_json(default.clone()).map_err(|e| {
            TypeSystemError::DynamicSchema(format!(
                "invalid default value for argument `{}`: {e}",
                argument.name
            ))
        })?;
        lowered = lowered.default_value(default);
    }
    Ok(lowered)
}

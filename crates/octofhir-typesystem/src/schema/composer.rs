//! Implementation composer.
//!
//! Folds the field and behavior sets of every interface an object declares
//! into the object's effective sets:
//!
//! 1. Interfaces in declaration order, never overwriting a name that is
//!    already present (first declared interface wins).
//! 2. The object's own declarations, always overwriting.
//!
//! The result is then checked against every interface contract. Composition
//! is a pure function of the declarations.

use indexmap::IndexMap;
use tracing::trace;

use super::field_registry::{FieldLayer, FieldRegistry};
use crate::error::SchemaError;
use crate::types::{
    FieldBehavior, FieldDefinition, InterfaceDefinition, ObjectDefinition, TypeDefinition,
};

/// A behavior together with the type that contributed it.
#[derive(Debug, Clone)]
pub struct BehaviorEntry {
    /// Name of the interface or object the behavior was declared on.
    pub origin: String,
    pub behavior: FieldBehavior,
}

impl PartialEq for BehaviorEntry {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin && self.behavior.ptr_eq(&other.behavior)
    }
}

/// Effective field and behavior sets of one object type.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub fields: IndexMap<String, FieldDefinition>,
    pub behaviors: IndexMap<String, BehaviorEntry>,
}

/// Composes `object` against the declared interfaces.
///
/// Fields and behaviors are folded independently. When the first interface
/// declares a field without a behavior and a later interface supplies one,
/// the effective field comes from the first interface and the behavior from
/// the later one.
///
/// `types` must contain every registered definition; it is used to find the
/// interfaces and to decide covariance of named return types. Interfaces
/// that are undefined or not interfaces are skipped here and reported by
/// reference validation.
///
/// # Errors
///
/// Returns every `InterfaceContractViolation` and `BehaviorWithoutField`
/// found for this object.
pub fn compose(
    object: &ObjectDefinition,
    fields: &FieldRegistry,
    types: &IndexMap<String, TypeDefinition>,
) -> Result<Composition, Vec<SchemaError>> {
    let interfaces = declared_interfaces(object, types);

    let mut effective: IndexMap<String, FieldDefinition> = IndexMap::new();
    let mut behaviors: IndexMap<String, BehaviorEntry> = IndexMap::new();

    for interface in &interfaces {
        if let Some(declared) = fields.declared(&interface.name, FieldLayer::Interface) {
            for (name, field) in declared {
                effective.entry(name.clone()).or_insert_with(|| field.clone());
            }
        }

        for (name, behavior) in layer_behaviors(
            fields.declared(&interface.name, FieldLayer::Interface),
            &interface.behaviors,
        ) {
            behaviors.entry(name).or_insert_with(|| BehaviorEntry {
                origin: interface.name.clone(),
                behavior,
            });
        }
    }

    let own = fields.declared(&object.name, FieldLayer::Object);
    if let Some(own) = own {
        for (name, field) in own {
            effective.insert(name.clone(), field.clone());
        }
    }

    for (name, behavior) in layer_behaviors(own, &object.behaviors) {
        behaviors.insert(
            name,
            BehaviorEntry {
                origin: object.name.clone(),
                behavior,
            },
        );
    }

    let mut violations = Vec::new();

    for interface in &interfaces {
        check_contract(object, interface, fields, &effective, types, &mut violations);
    }

    for (name, entry) in &behaviors {
        if !effective.contains_key(name) {
            violations.push(SchemaError::BehaviorWithoutField {
                owner: entry.origin.clone(),
                object: object.name.clone(),
                field: name.clone(),
            });
        }
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    trace!(
        type_name = %object.name,
        fields = effective.len(),
        behaviors = behaviors.len(),
        "Composed object type"
    );

    Ok(Composition {
        fields: effective,
        behaviors,
    })
}

/// Interfaces declared by `object`, deduplicated, in declaration order.
fn declared_interfaces<'a>(
    object: &ObjectDefinition,
    types: &'a IndexMap<String, TypeDefinition>,
) -> Vec<&'a InterfaceDefinition> {
    let mut interfaces: Vec<&InterfaceDefinition> = Vec::new();
    for name in &object.implements {
        if let Some(interface) = types.get(name).and_then(TypeDefinition::as_interface)
            && !interfaces.iter().any(|seen| seen.name == interface.name)
        {
            interfaces.push(interface);
        }
    }
    interfaces
}

/// Behaviors of one layer: inline field resolvers, overridden by the
/// explicit behavior map.
fn layer_behaviors(
    fields: Option<&IndexMap<String, FieldDefinition>>,
    explicit: &IndexMap<String, FieldBehavior>,
) -> IndexMap<String, FieldBehavior> {
    let mut behaviors: IndexMap<String, FieldBehavior> = fields
        .into_iter()
        .flat_map(|declared| declared.iter())
        .filter_map(|(name, field)| field.resolver.clone().map(|b| (name.clone(), b)))
        .collect();

    for (name, behavior) in explicit {
        behaviors.insert(name.clone(), behavior.clone());
    }

    behaviors
}

fn check_contract(
    object: &ObjectDefinition,
    interface: &InterfaceDefinition,
    fields: &FieldRegistry,
    effective: &IndexMap<String, FieldDefinition>,
    types: &IndexMap<String, TypeDefinition>,
    violations: &mut Vec<SchemaError>,
) {
    let Some(required) = fields.declared(&interface.name, FieldLayer::Interface) else {
        return;
    };

    let is_named_subtype = |actual: &str, expected: &str| is_possible_type(types, actual, expected);

    for (name, expected) in required {
        let mut violation = |reason: String| {
            violations.push(SchemaError::InterfaceContractViolation {
                interface: interface.name.clone(),
                object: object.name.clone(),
                field: name.clone(),
                reason,
            });
        };

        let Some(actual) = effective.get(name) else {
            violation("field is missing".to_string());
            continue;
        };

        if !actual.ty.is_valid_implementation(&expected.ty, &is_named_subtype) {
            violation(format!(
                "type `{}` is not compatible with `{}`",
                actual.ty, expected.ty
            ));
        }

        for expected_arg in &expected.arguments {
            match actual.argument_named(&expected_arg.name) {
                None => violation(format!("argument `{}` is missing", expected_arg.name)),
                Some(arg) if arg.ty != expected_arg.ty => violation(format!(
                    "argument `{}` has type `{}`, expected `{}`",
                    arg.name, arg.ty, expected_arg.ty
                )),
                Some(_) => {}
            }
        }

        for arg in &actual.arguments {
            if arg.is_required() && expected.argument_named(&arg.name).is_none() {
                violation(format!(
                    "additional argument `{}` must not be required",
                    arg.name
                ));
            }
        }
    }
}

/// Whether `actual` is a possible concrete type of the abstract `expected`:
/// an object implementing the interface, or a member of the union.
pub(crate) fn is_possible_type(
    types: &IndexMap<String, TypeDefinition>,
    actual: &str,
    expected: &str,
) -> bool {
    match types.get(expected) {
        Some(TypeDefinition::Interface(_)) => types
            .get(actual)
            .and_then(TypeDefinition::as_object)
            .is_some_and(|object| object.implements.iter().any(|name| name == expected)),
        Some(TypeDefinition::Union(union)) => {
            union.members.iter().any(|member| member == actual)
                && types.get(actual).and_then(TypeDefinition::as_object).is_some()
        }
        _ => false,
    }
}

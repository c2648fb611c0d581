//! Reachability tracker.
//!
//! Computes which registered types belong to the final schema by a
//! breadth-first walk from the root operation types and every orphan
//! declaration.
//!
//! A type is reachable when it is:
//!
//! - a root operation type,
//! - the (unwrapped) return type of a field or the type of an argument or
//!   input field of a reachable type,
//! - an interface implemented by a reachable object, or a member of a
//!   reachable union,
//! - listed in the orphan set of a reachable interface or of the schema.
//!
//! Implementing a reachable interface does NOT make an object reachable.
//! Such an object must be returned by some field or be declared orphan,
//! otherwise it is silently left out of the schema.

use std::collections::{BTreeSet, HashSet, VecDeque};

use indexmap::IndexMap;
use tracing::trace;

use super::composer::Composition;
use crate::types::{FieldDefinition, TypeDefinition};

/// Traversal queue with visited-set deduplication by type name.
#[derive(Debug, Default)]
struct Traversal {
    visited: HashSet<String>,
    pending: VecDeque<String>,
}

impl Traversal {
    /// Queues a type if it has not been seen yet.
    fn queue_if_needed(&mut self, type_name: &str) {
        if self.visited.insert(type_name.to_string()) {
            self.pending.push_back(type_name.to_string());
        }
    }

    fn pop_pending(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    fn queue_fields<'a>(&mut self, fields: impl IntoIterator<Item = &'a FieldDefinition>) {
        for field in fields {
            self.queue_if_needed(field.ty.base_name());
            for argument in &field.arguments {
                self.queue_if_needed(argument.ty.base_name());
            }
        }
    }
}

/// Returns the names of every reachable type, sorted.
///
/// `roots` and `orphans` are seeds; names not present in `types` are
/// ignored (reference validation reports them). Object types are walked
/// through their composed field sets so inherited fields count as
/// references.
pub fn compute_reachable<'a>(
    types: &IndexMap<String, TypeDefinition>,
    compositions: &IndexMap<String, Composition>,
    roots: impl IntoIterator<Item = &'a str>,
    orphans: impl IntoIterator<Item = &'a str>,
) -> BTreeSet<String> {
    let mut traversal = Traversal::default();

    for seed in roots.into_iter().chain(orphans) {
        traversal.queue_if_needed(seed);
    }

    let mut reachable = BTreeSet::new();

    while let Some(type_name) = traversal.pop_pending() {
        let Some(definition) = types.get(&type_name) else {
            continue;
        };

        trace!(type_name = %type_name, kind = %definition.kind(), "Visiting reachable type");

        match definition {
            TypeDefinition::Object(object) => {
                match compositions.get(&object.name) {
                    Some(composition) => traversal.queue_fields(composition.fields.values()),
                    None => traversal.queue_fields(&object.fields),
                }
                for interface in &object.implements {
                    traversal.queue_if_needed(interface);
                }
            }
            TypeDefinition::Interface(interface) => {
                traversal.queue_fields(&interface.fields);
                for orphan in &interface.orphan_types {
                    traversal.queue_if_needed(orphan);
                }
            }
            TypeDefinition::Union(union) => {
                for member in &union.members {
                    traversal.queue_if_needed(member);
                }
            }
            TypeDefinition::InputObject(input) => {
                for field in &input.fields {
                    traversal.queue_if_needed(field.ty.base_name());
                }
            }
            TypeDefinition::Scalar(_) | TypeDefinition::Enum(_) => {}
        }

        reachable.insert(type_name);
    }

    reachable
}

//! Schema construction and the frozen runtime view.
//!
//! [`SchemaRegistry`] collects declarations. `finalize()` runs the build
//! pipeline once:
//!
//! 1. Name and reference validation.
//! 2. Field registration per owner and layer ([`FieldRegistry`]).
//! 3. Interface composition for every object type ([`compose`]).
//! 4. Reachability from the roots and orphan declarations
//!    ([`compute_reachable`]).
//!
//! The result is a [`FrozenSchema`] that the executor reads concurrently.

mod composer;
mod field_registry;
mod frozen;
mod reachability;
mod registry;
mod resolver;

pub use composer::{BehaviorEntry, Composition, compose};
pub use field_registry::{FieldLayer, FieldRegistry};
pub use frozen::{FrozenSchema, RootOperations};
pub use reachability::compute_reachable;
pub use registry::SchemaRegistry;

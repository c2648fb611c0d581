//! Type resolver.
//!
//! Maps a runtime value known only to satisfy an interface or union to one
//! concrete object type. Sources are consulted in order and the first
//! non-empty answer wins:
//!
//! 1. the resolve-type behavior of the declared interface or union,
//! 2. the schema-level default resolve-type behavior.
//!
//! When neither answers, resolution fails with `UnresolvableType`. The
//! resolver reads frozen data only and is safe to call from any number of
//! concurrent requests.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

use super::composer::is_possible_type;
use crate::error::TypeSystemError;
use crate::types::{ObjectDefinition, ResolveContext, ResolveTypeBehavior, TypeDefinition};

/// Borrowed view of the frozen schema parts resolution needs.
#[derive(Clone, Copy)]
pub(crate) struct TypeResolver<'a> {
    pub types: &'a IndexMap<String, TypeDefinition>,
    pub reachable: &'a BTreeSet<String>,
    pub default_resolve_type: Option<&'a ResolveTypeBehavior>,
}

impl<'a> TypeResolver<'a> {
    pub fn resolve(
        &self,
        value: &Value,
        declared: &str,
        ctx: &ResolveContext,
    ) -> Result<&'a ObjectDefinition, TypeSystemError> {
        let definition = self
            .types
            .get(declared)
            .filter(|_| self.reachable.contains(declared))
            .ok_or_else(|| TypeSystemError::TypeNotFound(declared.to_string()))?;

        let custom = match definition {
            TypeDefinition::Interface(interface) => interface.resolve_type.as_ref(),
            TypeDefinition::Union(union) => union.resolve_type.as_ref(),
            _ => return Err(TypeSystemError::NotAbstractType(declared.to_string())),
        };

        let resolved = custom
            .and_then(|behavior| behavior.call(value, ctx))
            .or_else(|| {
                trace!(
                    declared = %declared,
                    "No custom resolve-type answer, trying schema default"
                );
                self.default_resolve_type
                    .and_then(|behavior| behavior.call(value, ctx))
            })
            .ok_or_else(|| TypeSystemError::UnresolvableType {
                declared: declared.to_string(),
            })?;

        let object = self
            .types
            .get(&resolved)
            .filter(|_| self.reachable.contains(&resolved));

        let Some(object) = object else {
            return Err(TypeSystemError::UnknownType {
                declared: declared.to_string(),
                resolved,
            });
        };

        match object.as_object() {
            Some(object) if is_possible_type(self.types, &object.name, declared) => {
                trace!(declared = %declared, resolved = %object.name, "Resolved concrete type");
                Ok(object)
            }
            _ => Err(TypeSystemError::NotPossibleType {
                declared: declared.to_string(),
                resolved,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::types::{InterfaceDefinition, UnionDefinition};

    fn types_of(defs: Vec<TypeDefinition>) -> IndexMap<String, TypeDefinition> {
        defs.into_iter().map(|def| (def.name().to_string(), def)).collect()
    }

    fn all_reachable(types: &IndexMap<String, TypeDefinition>) -> BTreeSet<String> {
        types.keys().cloned().collect()
    }

    fn node_types(resolve_type: Option<ResolveTypeBehavior>) -> IndexMap<String, TypeDefinition> {
        let mut node = InterfaceDefinition::new("Node");
        node.resolve_type = resolve_type;
        types_of(vec![
            node.into(),
            ObjectDefinition::new("Post").implements("Node").into(),
            ObjectDefinition::new("Comment").implements("Node").into(),
            ObjectDefinition::new("User").into(),
        ])
    }

    #[test]
    fn test_custom_behavior_is_authoritative() {
        let default_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&default_calls);
        let default = ResolveTypeBehavior::new(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some("Comment".to_string())
        });

        let types = node_types(Some(ResolveTypeBehavior::new(|_, _| Some("Post".into()))));
        let reachable = all_reachable(&types);
        let resolver = TypeResolver {
            types: &types,
            reachable: &reachable,
            default_resolve_type: Some(&default),
        };

        let object = resolver.resolve(&json!({}), "Node", &ResolveContext::new()).unwrap();
        assert_eq!(object.name, "Post");
        assert_eq!(default_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_falls_back_to_schema_default() {
        let default = ResolveTypeBehavior::discriminator("__typename");
        let types = node_types(Some(ResolveTypeBehavior::new(|_, _| Some(String::new()))));
        let reachable = all_reachable(&types);
        let resolver = TypeResolver {
            types: &types,
            reachable: &reachable,
            default_resolve_type: Some(&default),
        };

        let object = resolver
            .resolve(&json!({"__typename": "Comment"}), "Node", &ResolveContext::new())
            .unwrap();
        assert_eq!(object.name, "Comment");
    }

    #[test]
    fn test_unresolvable_without_any_behavior() {
        let types = node_types(None);
        let reachable = all_reachable(&types);
        let resolver = TypeResolver {
            types: &types,
            reachable: &reachable,
            default_resolve_type: None,
        };

        let err = resolver.resolve(&json!({}), "Node", &ResolveContext::new()).unwrap_err();
        assert_eq!(
            err,
            TypeSystemError::UnresolvableType {
                declared: "Node".into()
            }
        );
    }

    #[test]
    fn test_unknown_versus_not_possible() {
        let types = node_types(Some(ResolveTypeBehavior::discriminator("__typename")));
        let reachable = all_reachable(&types);
        let resolver = TypeResolver {
            types: &types,
            reachable: &reachable,
            default_resolve_type: None,
        };
        let ctx = ResolveContext::new();

        assert!(matches!(
            resolver.resolve(&json!({"__typename": "Ghost"}), "Node", &ctx),
            Err(TypeSystemError::UnknownType { resolved, .. }) if resolved == "Ghost"
        ));
        assert!(matches!(
            resolver.resolve(&json!({"__typename": "User"}), "Node", &ctx),
            Err(TypeSystemError::NotPossibleType { resolved, .. }) if resolved == "User"
        ));
    }

    #[test]
    fn test_unreachable_object_is_unknown() {
        let types = node_types(Some(ResolveTypeBehavior::discriminator("__typename")));
        let reachable: BTreeSet<String> = ["Node", "Post"].into_iter().map(String::from).collect();
        let resolver = TypeResolver {
            types: &types,
            reachable: &reachable,
            default_resolve_type: None,
        };

        assert!(matches!(
            resolver.resolve(&json!({"__typename": "Comment"}), "Node", &ResolveContext::new()),
            Err(TypeSystemError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_union_resolution() {
        let types = types_of(vec![
            UnionDefinition::new("SearchResult")
                .member("User")
                .resolve_type(ResolveTypeBehavior::new(|value, _| {
                    value.get("login").map(|_| "User".to_string())
                }))
                .into(),
            ObjectDefinition::new("User").into(),
        ]);
        let reachable = all_reachable(&types);
        let resolver = TypeResolver {
            types: &types,
            reachable: &reachable,
            default_resolve_type: None,
        };
        let ctx = ResolveContext::new();

        assert_eq!(
            resolver.resolve(&json!({"login": "x"}), "SearchResult", &ctx).unwrap().name,
            "User"
        );
        assert!(matches!(
            resolver.resolve(&json!({}), "User", &ctx),
            Err(TypeSystemError::NotAbstractType(_))
        ));
        assert!(matches!(
            resolver.resolve(&json!({}), "Missing", &ctx),
            Err(TypeSystemError::TypeNotFound(_))
        ));
    }
}

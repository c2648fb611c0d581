//! Application-supplied behaviors.
//!
//! Behaviors are opaque, pure functions handed to the schema at definition
//! time. The core only guarantees when and with which arguments they are
//! invoked; what they compute is application logic.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::FieldError;

/// Field arguments after defaults have been applied, in declaration order.
pub type Arguments = IndexMap<String, Value>;

type FieldFn =
    dyn Fn(&Value, &Arguments, &ResolveContext) -> Result<Value, FieldError> + Send + Sync;
type ResolveTypeFn = dyn Fn(&Value, &ResolveContext) -> Option<String> + Send + Sync;
type InstanceFn = dyn Fn(&Value) -> bool + Send + Sync;

/// Per-request data handed to every behavior.
///
/// Constructed by the executor for each request. The core never stores or
/// mutates it.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// Request ID for tracing and correlation.
    pub request_id: Option<String>,

    /// Free-form request data (viewer, tenant, feature switches, ...).
    pub data: serde_json::Map<String, Value>,
}

impl ResolveContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Returns a request data entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

/// Resolver behavior of a single field: `(parent, arguments, context)` to a
/// value or failure.
#[derive(Clone)]
pub struct FieldBehavior(Arc<FieldFn>);

impl FieldBehavior {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Arguments, &ResolveContext) -> Result<Value, FieldError>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(f))
    }

    /// Behavior that always returns the same value.
    pub fn constant(value: Value) -> Self {
        Self::new(move |_, _, _| Ok(value.clone()))
    }

    /// Invokes the behavior, propagating whatever it returns.
    pub fn call(
        &self,
        parent: &Value,
        args: &Arguments,
        ctx: &ResolveContext,
    ) -> Result<Value, FieldError> {
        (self.0)(parent, args, ctx)
    }

    /// Returns true when both handles point at the same function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FieldBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldBehavior(..)")
    }
}

/// Custom resolve-type behavior of an interface, union or schema.
///
/// Returns at most one type name. `None` or an empty name means "no opinion"
/// and lets resolution fall through to the next source.
#[derive(Clone)]
pub struct ResolveTypeBehavior(Arc<ResolveTypeFn>);

impl ResolveTypeBehavior {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &ResolveContext) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Instance checks evaluated in order; the first matching predicate
    /// names the type.
    pub fn ordered(checks: InstanceChecks) -> Self {
        Self::new(move |value, _| {
            checks
                .checks
                .iter()
                .find(|(_, is_instance)| is_instance(value))
                .map(|(name, _)| name.clone())
        })
    }

    /// Reads the type name from a string member of the value, e.g.
    /// `__typename` or `resourceType`.
    pub fn discriminator(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(move |value, _| value.get(&key).and_then(Value::as_str).map(str::to_string))
    }

    /// Invokes the behavior. Empty names are normalized to `None`.
    #[must_use]
    pub fn call(&self, value: &Value, ctx: &ResolveContext) -> Option<String> {
        (self.0)(value, ctx).filter(|name| !name.is_empty())
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ResolveTypeBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResolveTypeBehavior(..)")
    }
}

/// Ordered list of `is-instance-of` predicates for
/// [`ResolveTypeBehavior::ordered`].
#[derive(Default)]
pub struct InstanceChecks {
    checks: Vec<(String, Box<InstanceFn>)>,
}

impl InstanceChecks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a check. Earlier checks take priority.
    #[must_use]
    pub fn check<P>(mut self, type_name: impl Into<String>, is_instance: P) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.checks.push((type_name.into(), Box::new(is_instance)));
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_field_behavior_receives_arguments() {
        let behavior = FieldBehavior::new(|parent, args, ctx| {
            Ok(json!({
                "parent": parent["id"],
                "limit": args["limit"],
                "request": ctx.request_id,
            }))
        });

        let mut args = Arguments::new();
        args.insert("limit".into(), json!(10));
        let ctx = ResolveContext::new().with_request_id("req-1");

        let value = behavior.call(&json!({"id": "p1"}), &args, &ctx).unwrap();
        assert_eq!(value, json!({"parent": "p1", "limit": 10, "request": "req-1"}));
    }

    #[test]
    fn test_field_behavior_propagates_failure() {
        let behavior = FieldBehavior::new(|_, _, _| Err(FieldError::new("backend unavailable")));
        let err = behavior
            .call(&Value::Null, &Arguments::new(), &ResolveContext::new())
            .unwrap_err();
        assert_eq!(err.message, "backend unavailable");
    }

    #[test]
    fn test_ordered_checks_first_match_wins() {
        let resolve = ResolveTypeBehavior::ordered(
            InstanceChecks::new()
                .check("Individual", |v| v.get("ssn").is_some())
                .check("Company", |v| v.get("name").is_some()),
        );
        let ctx = ResolveContext::new();

        assert_eq!(
            resolve.call(&json!({"ssn": "1", "name": "x"}), &ctx).as_deref(),
            Some("Individual")
        );
        assert_eq!(resolve.call(&json!({"name": "x"}), &ctx).as_deref(), Some("Company"));
        assert_eq!(resolve.call(&json!({}), &ctx), None);
    }

    #[test]
    fn test_discriminator_ignores_empty_names() {
        let resolve = ResolveTypeBehavior::discriminator("__typename");
        let ctx = ResolveContext::new();

        assert_eq!(
            resolve.call(&json!({"__typename": "Comment"}), &ctx).as_deref(),
            Some("Comment")
        );
        assert_eq!(resolve.call(&json!({"__typename": ""}), &ctx), None);
        assert_eq!(resolve.call(&json!({"__typename": 3}), &ctx), None);
    }

    #[test]
    fn test_ptr_eq() {
        let a = FieldBehavior::constant(json!(1));
        let b = a.clone();
        let c = FieldBehavior::constant(json!(1));
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }
}

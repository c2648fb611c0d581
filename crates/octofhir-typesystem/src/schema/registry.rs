//! Schema registry: declaration API and `finalize()`.

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::composer::{self, Composition};
use super::field_registry::{FieldLayer, FieldRegistry};
use super::frozen::{FrozenParts, FrozenSchema, RootOperations};
use super::reachability::compute_reachable;
use crate::config::SchemaConfig;
use crate::error::{BuildError, SchemaError, TypeSystemError};
use crate::types::{
    ArgumentDefinition, BUILTIN_SCALARS, EnumDefinition, FieldBehavior, FieldDefinition,
    InputObjectDefinition, InterfaceDefinition, ObjectDefinition, ResolveContext,
    ResolveTypeBehavior, ScalarDefinition, TypeDefinition, TypeKind, TypeRef, UnionDefinition,
    is_valid_graphql_name,
};

/// Collects type definitions and finalizes them into a [`FrozenSchema`].
///
/// Declarations are order-independent: a type may reference, implement or
/// list as orphan a type that is registered later. Nothing is validated
/// until [`finalize`](Self::finalize), which reports every violation at once.
///
/// # Example
///
/// ```
/// use octofhir_typesystem::{
///     FieldDefinition, InterfaceDefinition, ObjectDefinition, SchemaRegistry, TypeRef,
/// };
///
/// let mut registry = SchemaRegistry::build("Query", None, None);
/// registry
///     .interface(
///         InterfaceDefinition::new("Node")
///             .field(FieldDefinition::new("id", TypeRef::named_nn("ID")))
///             .orphan_type("Comment"),
///     )
///     .object(
///         ObjectDefinition::new("Comment")
///             .implements("Node")
///             .field(FieldDefinition::new("id", TypeRef::named_nn("ID"))),
///     )
///     .object(ObjectDefinition::new("Query").field(FieldDefinition::new("node", "Node")));
///
/// let schema = registry.finalize().unwrap();
/// assert!(schema.is_reachable("Comment"));
/// ```
#[derive(Debug)]
pub struct SchemaRegistry {
    config: SchemaConfig,
    roots: RootOperations,
    definitions: Vec<TypeDefinition>,
    orphan_types: Vec<String>,
    default_resolve_type: Option<ResolveTypeBehavior>,
    frozen: Option<FrozenSchema>,
}

impl SchemaRegistry {
    /// Starts a schema with the given root operation type names.
    pub fn build(
        query: impl Into<String>,
        mutation: Option<&str>,
        subscription: Option<&str>,
    ) -> Self {
        Self {
            config: SchemaConfig::default(),
            roots: RootOperations {
                query: query.into(),
                mutation: mutation.map(str::to_string),
                subscription: subscription.map(str::to_string),
            },
            definitions: Vec::new(),
            orphan_types: Vec::new(),
            default_resolve_type: None,
            frozen: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    fn accepts_declarations(&self, what: &str) -> bool {
        if self.frozen.is_some() {
            warn!(declaration = %what, "Schema already finalized, ignoring declaration");
            return false;
        }
        true
    }

    /// Registers a type definition of any kind.
    pub fn register(&mut self, definition: impl Into<TypeDefinition>) -> &mut Self {
        let definition = definition.into();
        if self.accepts_declarations(definition.name()) {
            self.definitions.push(definition);
        }
        self
    }

    pub fn interface(&mut self, definition: InterfaceDefinition) -> &mut Self {
        self.register(definition)
    }

    pub fn object(&mut self, definition: ObjectDefinition) -> &mut Self {
        self.register(definition)
    }

    pub fn union(&mut self, definition: UnionDefinition) -> &mut Self {
        self.register(definition)
    }

    pub fn scalar(&mut self, definition: ScalarDefinition) -> &mut Self {
        self.register(definition)
    }

    pub fn enumeration(&mut self, definition: EnumDefinition) -> &mut Self {
        self.register(definition)
    }

    pub fn input_object(&mut self, definition: InputObjectDefinition) -> &mut Self {
        self.register(definition)
    }

    /// Declares types that belong to the schema regardless of reachability.
    pub fn orphan_types<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.accepts_declarations("orphan_types") {
            self.orphan_types.extend(names.into_iter().map(Into::into));
        }
        self
    }

    /// Sets the resolve-type behavior used when an interface or union has
    /// none of its own, or its own gives no answer.
    pub fn default_resolve_type(&mut self, behavior: ResolveTypeBehavior) -> &mut Self {
        if self.accepts_declarations("default_resolve_type") {
            self.default_resolve_type = Some(behavior);
        }
        self
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.frozen.is_some()
    }

    /// Returns the frozen schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaNotFinalized` before a successful `finalize()`.
    pub fn schema(&self) -> Result<&FrozenSchema, TypeSystemError> {
        self.frozen.as_ref().ok_or(TypeSystemError::SchemaNotFinalized)
    }

    pub fn effective_fields(
        &self,
        type_name: &str,
    ) -> Result<&IndexMap<String, FieldDefinition>, TypeSystemError> {
        self.schema()?.effective_fields(type_name)
    }

    pub fn effective_behavior(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Result<&FieldBehavior, TypeSystemError> {
        self.schema()?.effective_behavior(type_name, field_name)
    }

    pub fn resolve_type(
        &self,
        value: &Value,
        declared: &str,
        ctx: &ResolveContext,
    ) -> Result<&ObjectDefinition, TypeSystemError> {
        self.schema()?.resolve_type(value, declared, ctx)
    }

    pub fn reachable_types(&self) -> Result<Vec<&TypeDefinition>, TypeSystemError> {
        Ok(self.schema()?.reachable_types())
    }

    /// Validates, composes and freezes the schema.
    ///
    /// Runs name validation, field registration, reference validation and
    /// composition of every object type, then the reachability walk. The
    /// first successful result is cached; later calls return it unchanged.
    /// A failed build caches nothing, so declarations can be fixed and
    /// `finalize()` called again.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] holding every violation found.
    pub fn finalize(&mut self) -> Result<FrozenSchema, BuildError> {
        if let Some(frozen) = &self.frozen {
            trace!("Schema already finalized, returning cached result");
            return Ok(frozen.clone());
        }

        debug!(
            definitions = self.definitions.len(),
            query = %self.roots.query,
            "Finalizing schema"
        );

        let frozen = self.build_frozen()?;
        self.frozen = Some(frozen.clone());
        Ok(frozen)
    }

    fn build_frozen(&self) -> Result<FrozenSchema, BuildError> {
        let mut violations = Vec::new();

        let types = self.collect_types(&mut violations);
        let mut fields = register_fields(&types, &mut violations);
        self.validate_references(&types, &mut violations);

        let mut compositions: IndexMap<String, Composition> = IndexMap::new();
        for object in types.values().filter_map(TypeDefinition::as_object) {
            match composer::compose(object, &fields, &types) {
                Ok(composition) => {
                    if composition.fields.is_empty() {
                        violations.push(SchemaError::EmptyType {
                            name: object.name.clone(),
                            kind: TypeKind::Object,
                            member: "field",
                        });
                    }
                    compositions.insert(object.name.clone(), composition);
                }
                Err(errors) => violations.extend(errors),
            }
        }

        if !violations.is_empty() {
            debug!(count = violations.len(), "Schema build failed");
            return Err(BuildError::new(violations));
        }

        let reachable = compute_reachable(
            &types,
            &compositions,
            self.roots.names(),
            self.orphan_types.iter().map(String::as_str),
        );

        self.log_excluded(&types, &reachable);

        for interface in types.values().filter_map(TypeDefinition::as_interface) {
            let declared = fields
                .declared(&interface.name, FieldLayer::Interface)
                .cloned()
                .unwrap_or_default();
            fields.install_effective(&interface.name, declared);
        }

        let mut behaviors = IndexMap::new();
        for (name, composition) in compositions {
            fields.install_effective(&name, composition.fields);
            behaviors.insert(name, composition.behaviors);
        }

        debug!(
            types = types.len(),
            reachable = reachable.len(),
            "Schema finalized"
        );

        Ok(FrozenSchema::new(FrozenParts {
            config: self.config.clone(),
            roots: self.roots.clone(),
            types,
            fields,
            behaviors,
            reachable,
            default_resolve_type: self.default_resolve_type.clone(),
        }))
    }

    /// Built-in scalars followed by the declared definitions, rejecting
    /// duplicate and invalid names.
    fn collect_types(&self, violations: &mut Vec<SchemaError>) -> IndexMap<String, TypeDefinition> {
        let mut types: IndexMap<String, TypeDefinition> = BUILTIN_SCALARS
            .iter()
            .map(|name| (name.to_string(), ScalarDefinition::new(*name).into()))
            .collect();

        for definition in &self.definitions {
            let name = definition.name();
            if !is_valid_name(name) {
                violations.push(SchemaError::InvalidName {
                    name: name.to_string(),
                });
                continue;
            }
            if types.contains_key(name) {
                violations.push(SchemaError::DuplicateType {
                    name: name.to_string(),
                });
                continue;
            }
            types.insert(name.to_string(), definition.clone());
        }

        types
    }

    fn validate_references(
        &self,
        types: &IndexMap<String, TypeDefinition>,
        violations: &mut Vec<SchemaError>,
    ) {
        let roots = [
            ("query", Some(&self.roots.query)),
            ("mutation", self.roots.mutation.as_ref()),
            ("subscription", self.roots.subscription.as_ref()),
        ];
        for (operation, name) in roots {
            if let Some(name) = name
                && kind_of(types, name) != Some(TypeKind::Object)
            {
                violations.push(SchemaError::InvalidRootType {
                    operation,
                    type_name: name.clone(),
                });
            }
        }

        for orphan in &self.orphan_types {
            if !types.contains_key(orphan) {
                violations.push(SchemaError::UndefinedType {
                    referenced_by: "schema".to_string(),
                    type_name: orphan.clone(),
                });
            }
        }

        let mut check = References { types, violations };

        for definition in types.values() {
            match definition {
                TypeDefinition::Object(object) => {
                    for interface in &object.implements {
                        match kind_of(types, interface) {
                            Some(TypeKind::Interface) => {}
                            Some(_) => check.violations.push(SchemaError::InvalidImplements {
                                object: object.name.clone(),
                                name: interface.clone(),
                            }),
                            None => check.undefined(&object.name, interface),
                        }
                    }
                    check.fields(&object.name, &object.fields);
                }
                TypeDefinition::Interface(interface) => {
                    if interface.fields.is_empty() {
                        check.empty(&interface.name, TypeKind::Interface, "field");
                    }
                    check.fields(&interface.name, &interface.fields);
                    for orphan in &interface.orphan_types {
                        check.expect_object(&interface.name, orphan);
                    }
                }
                TypeDefinition::Union(union) => {
                    if union.members.is_empty() {
                        check.empty(&union.name, TypeKind::Union, "member");
                    }
                    let mut seen = HashSet::new();
                    for member in &union.members {
                        check.unique(&mut seen, &union.name, member);
                        check.expect_object(&union.name, member);
                    }
                }
                TypeDefinition::InputObject(input) => {
                    if input.fields.is_empty() {
                        check.empty(&input.name, TypeKind::InputObject, "field");
                    }
                    let mut seen = HashSet::new();
                    for field in &input.fields {
                        let referenced_by = format!("{}.{}", input.name, field.name);
                        check.unique(&mut seen, &input.name, &field.name);
                        check.name(&field.name, &referenced_by);
                        check.input(&referenced_by, &field.ty);
                    }
                }
                TypeDefinition::Enum(enumeration) => {
                    if enumeration.values.is_empty() {
                        check.empty(&enumeration.name, TypeKind::Enum, "value");
                    }
                    let mut seen = HashSet::new();
                    for value in &enumeration.values {
                        check.unique(&mut seen, &enumeration.name, value);
                        if matches!(value.as_str(), "true" | "false" | "null") {
                            check.violations.push(SchemaError::InvalidName {
                                name: format!("{}.{value}", enumeration.name),
                            });
                        } else {
                            check.name(value, &format!("{}.{value}", enumeration.name));
                        }
                    }
                }
                TypeDefinition::Scalar(_) => {}
            }
        }
    }

    fn log_excluded(&self, types: &IndexMap<String, TypeDefinition>, reachable: &BTreeSet<String>) {
        for definition in types.values() {
            if reachable.contains(definition.name()) {
                continue;
            }

            let implements = definition
                .as_object()
                .map(|object| object.implements.as_slice())
                .unwrap_or_default();

            if self.config.warn_unreachable && !implements.is_empty() {
                warn!(
                    type_name = %definition.name(),
                    interfaces = ?implements,
                    "Type implements an interface but is neither referenced nor declared orphan; excluded from schema"
                );
            } else {
                debug!(type_name = %definition.name(), "Type is unreachable; excluded from schema");
            }
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    is_valid_graphql_name(name) && !name.starts_with("__")
}

fn kind_of(types: &IndexMap<String, TypeDefinition>, name: &str) -> Option<TypeKind> {
    types.get(name).map(TypeDefinition::kind)
}

/// Registers every interface and object field in its layer.
fn register_fields(
    types: &IndexMap<String, TypeDefinition>,
    violations: &mut Vec<SchemaError>,
) -> FieldRegistry {
    let mut registry = FieldRegistry::new();

    for definition in types.values() {
        let (owner, layer, fields) = match definition {
            TypeDefinition::Interface(interface) => {
                (&interface.name, FieldLayer::Interface, &interface.fields)
            }
            TypeDefinition::Object(object) => (&object.name, FieldLayer::Object, &object.fields),
            _ => continue,
        };

        for field in fields {
            if !is_valid_name(&field.name) {
                violations.push(SchemaError::InvalidName {
                    name: format!("{owner}.{}", field.name),
                });
                continue;
            }
            if let Err(err) = registry.define(owner, layer, field.clone()) {
                violations.push(err);
            }
        }
    }

    registry
}

/// Reference, member name and shape checks.
struct References<'a> {
    types: &'a IndexMap<String, TypeDefinition>,
    violations: &'a mut Vec<SchemaError>,
}

impl References<'_> {
    fn undefined(&mut self, referenced_by: &str, type_name: &str) {
        self.violations.push(SchemaError::UndefinedType {
            referenced_by: referenced_by.to_string(),
            type_name: type_name.to_string(),
        });
    }

    fn expect_object(&mut self, referenced_by: &str, type_name: &str) {
        match kind_of(self.types, type_name) {
            None => self.undefined(referenced_by, type_name),
            Some(kind) if kind != TypeKind::Object => {
                self.violations.push(SchemaError::InvalidTypeUsage {
                    referenced_by: referenced_by.to_string(),
                    type_name: type_name.to_string(),
                    expected: "an object",
                });
            }
            Some(_) => {}
        }
    }

    fn fields(&mut self, owner: &str, fields: &[FieldDefinition]) {
        for field in fields {
            let referenced_by = format!("{owner}.{}", field.name);
            self.output(&referenced_by, &field.ty);
            self.arguments(&referenced_by, &field.arguments);
        }
    }

    fn arguments(&mut self, field: &str, arguments: &[ArgumentDefinition]) {
        let mut seen = HashSet::new();
        for argument in arguments {
            let referenced_by = format!("{field}({})", argument.name);
            self.unique(&mut seen, field, &argument.name);
            self.name(&argument.name, &referenced_by);
            self.input(&referenced_by, &argument.ty);
        }
    }

    /// Reports `name` if it was already seen on `owner`.
    fn unique<'n>(&mut self, seen: &mut HashSet<&'n str>, owner: &str, name: &'n str) {
        if !seen.insert(name) {
            self.violations.push(SchemaError::DuplicateMember {
                owner: owner.to_string(),
                name: name.to_string(),
            });
        }
    }

    /// Reports `name` as invalid under its qualified form.
    fn name(&mut self, name: &str, qualified: &str) {
        if !is_valid_name(name) {
            self.violations.push(SchemaError::InvalidName {
                name: qualified.to_string(),
            });
        }
    }

    fn empty(&mut self, name: &str, kind: TypeKind, member: &'static str) {
        self.violations.push(SchemaError::EmptyType {
            name: name.to_string(),
            kind,
            member,
        });
    }

    fn output(&mut self, referenced_by: &str, ty: &TypeRef) {
        let name = ty.base_name();
        match kind_of(self.types, name) {
            None => self.undefined(referenced_by, name),
            Some(kind) if !kind.is_output() => self.violations.push(SchemaError::InvalidTypeUsage {
                referenced_by: referenced_by.to_string(),
                type_name: name.to_string(),
                expected: "an output",
            }),
            Some(_) => {}
        }
    }

    fn input(&mut self, referenced_by: &str, ty: &TypeRef) {
        let name = ty.base_name();
        match kind_of(self.types, name) {
            None => self.undefined(referenced_by, name),
            Some(kind) if !kind.is_input() => self.violations.push(SchemaError::InvalidTypeUsage {
                referenced_by: referenced_by.to_string(),
                type_name: name.to_string(),
                expected: "an input",
            }),
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{ID, STRING};

    fn node_registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::build("Query", None, None);
        registry
            .interface(
                InterfaceDefinition::new("Node")
                    .field(FieldDefinition::new("id", TypeRef::named_nn(ID))),
            )
            .object(
                ObjectDefinition::new("Post")
                    .implements("Node")
                    .field(FieldDefinition::new("title", STRING)),
            )
            .object(ObjectDefinition::new("Query").field(FieldDefinition::new("post", "Post")));
        registry
    }

    #[test]
    fn test_lookups_before_finalize_fail() {
        let registry = node_registry();
        assert_eq!(
            registry.effective_fields("Post").unwrap_err(),
            TypeSystemError::SchemaNotFinalized
        );
        assert!(matches!(
            registry.effective_behavior("Post", "title"),
            Err(TypeSystemError::SchemaNotFinalized)
        ));
        assert!(matches!(
            registry.resolve_type(&json!({}), "Node", &ResolveContext::new()),
            Err(TypeSystemError::SchemaNotFinalized)
        ));
        assert!(matches!(
            registry.reachable_types(),
            Err(TypeSystemError::SchemaNotFinalized)
        ));
    }

    #[test]
    fn test_finalize_is_cached() {
        let mut registry = node_registry();
        let first = registry.finalize().unwrap();
        let second = registry.finalize().unwrap();
        assert!(first.ptr_eq(&second));
        assert!(registry.is_finalized());
    }

    #[test]
    fn test_declarations_after_finalize_are_ignored() {
        let mut registry = node_registry();
        let schema = registry.finalize().unwrap();

        registry.object(ObjectDefinition::new("Late"));
        registry.orphan_types(["Late"]);

        assert!(registry.finalize().unwrap().ptr_eq(&schema));
        assert!(schema.type_definition("Late").is_none());
    }

    #[test]
    fn test_duplicate_and_invalid_names() {
        let mut registry = node_registry();
        registry
            .object(ObjectDefinition::new("Post"))
            .object(ObjectDefinition::new("__Hidden"))
            .scalar(ScalarDefinition::new(STRING))
            .object(ObjectDefinition::new("Bad").field(FieldDefinition::new("not-valid", STRING)));

        let err = registry.finalize().unwrap_err();
        let violations = err.violations();
        assert!(violations.contains(&SchemaError::DuplicateType { name: "Post".into() }));
        assert!(violations.contains(&SchemaError::DuplicateType { name: STRING.into() }));
        assert!(violations.contains(&SchemaError::InvalidName { name: "__Hidden".into() }));
        assert!(violations.contains(&SchemaError::InvalidName {
            name: "Bad.not-valid".into()
        }));
        assert!(!registry.is_finalized());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut registry = node_registry();
        registry.object(ObjectDefinition::new("post").field(FieldDefinition::new("id", ID)));
        assert!(registry.finalize().is_ok());
    }

    #[test]
    fn test_reference_validation() {
        let mut registry = SchemaRegistry::build("Query", Some("Mutation"), None);
        registry
            .object(
                ObjectDefinition::new("Query")
                    .implements("Missing")
                    .implements("Post")
                    .field(FieldDefinition::new("post", "Post"))
                    .field(FieldDefinition::new("ghost", "Ghost"))
                    .field(
                        FieldDefinition::new("search", STRING)
                            .argument(ArgumentDefinition::new("filter", "Post")),
                    ),
            )
            .object(ObjectDefinition::new("Post"))
            .union(UnionDefinition::new("Result").member(STRING))
            .orphan_types(["Phantom"]);

        let err = registry.finalize().unwrap_err();
        let violations = err.violations();

        assert!(violations.contains(&SchemaError::InvalidRootType {
            operation: "mutation",
            type_name: "Mutation".into()
        }));
        assert!(violations.contains(&SchemaError::UndefinedType {
            referenced_by: "schema".into(),
            type_name: "Phantom".into()
        }));
        assert!(violations.contains(&SchemaError::UndefinedType {
            referenced_by: "Query".into(),
            type_name: "Missing".into()
        }));
        assert!(violations.contains(&SchemaError::InvalidImplements {
            object: "Query".into(),
            name: "Post".into()
        }));
        assert!(violations.contains(&SchemaError::UndefinedType {
            referenced_by: "Query.ghost".into(),
            type_name: "Ghost".into()
        }));
        assert!(violations.contains(&SchemaError::InvalidTypeUsage {
            referenced_by: "Query.search(filter)".into(),
            type_name: "Post".into(),
            expected: "an input"
        }));
        assert!(violations.contains(&SchemaError::InvalidTypeUsage {
            referenced_by: "Result".into(),
            type_name: STRING.into(),
            expected: "an object"
        }));
    }

    #[test]
    fn test_failed_build_can_be_fixed() {
        let mut registry = SchemaRegistry::build("Query", None, None);
        assert!(registry.finalize().is_err());

        registry
            .object(ObjectDefinition::new("Query").field(FieldDefinition::new("version", STRING)));
        let schema = registry.finalize().unwrap();
        assert_eq!(schema.query_type(), "Query");
    }

    #[test]
    fn test_effective_behavior_lookup() {
        let mut registry = SchemaRegistry::build("Query", None, None);
        registry
            .interface(
                InterfaceDefinition::new("Node")
                    .field(FieldDefinition::new("id", TypeRef::named_nn(ID)))
                    .behavior("id", FieldBehavior::constant(json!("node-id"))),
            )
            .object(
                ObjectDefinition::new("Query")
                    .implements("Node")
                    .field(FieldDefinition::new("version", STRING)),
            );

        let schema = registry.finalize().unwrap();
        let ctx = ResolveContext::new();

        let id = schema.effective_behavior("Query", "id").unwrap();
        assert_eq!(id.call(&Value::Null, &Default::default(), &ctx).unwrap(), json!("node-id"));

        assert!(matches!(
            schema.effective_behavior("Query", "version"),
            Err(TypeSystemError::BehaviorNotFound { .. })
        ));
        assert!(matches!(
            schema.effective_behavior("Query", "missing"),
            Err(TypeSystemError::FieldNotFound { .. })
        ));
        assert_eq!(
            schema
                .resolve_field(
                    "Query",
                    "version",
                    &json!({"version": "1.0"}),
                    &Default::default(),
                    &ctx,
                )
                .unwrap(),
            json!("1.0")
        );
    }

    #[test]
    fn test_member_names_are_validated() {
        let mut registry = node_registry();
        registry
            .enumeration(
                EnumDefinition::new("Status")
                    .value("DRAFT")
                    .value("not-valid")
                    .value("true"),
            )
            .input_object(
                InputObjectDefinition::new("Filter")
                    .field(ArgumentDefinition::new("status", "Status"))
                    .field(ArgumentDefinition::new("__kind", STRING)),
            )
            .object(
                ObjectDefinition::new("Search").field(
                    FieldDefinition::new("search", "Status")
                        .argument(ArgumentDefinition::new("bad-arg", STRING))
                        .argument(ArgumentDefinition::new("filter", "Filter")),
                ),
            );

        let err = registry.finalize().unwrap_err();
        let violations = err.violations();
        for name in ["Status.not-valid", "Status.true", "Filter.__kind", "Search.search(bad-arg)"] {
            assert!(
                violations.contains(&SchemaError::InvalidName { name: name.into() }),
                "{name} should be rejected"
            );
        }
        assert_eq!(violations.len(), 4);
    }

    #[test]
    fn test_duplicate_members_are_rejected() {
        let mut registry = node_registry();
        registry
            .enumeration(EnumDefinition::new("Status").value("A").value("B").value("A"))
            .input_object(
                InputObjectDefinition::new("Filter")
                    .field(ArgumentDefinition::new("status", "Status"))
                    .field(ArgumentDefinition::new("status", STRING)),
            )
            .union(UnionDefinition::new("Result").member("Post").member("Post"))
            .object(
                ObjectDefinition::new("Search")
                    .field(
                        FieldDefinition::new("s", "Status")
                            .argument(ArgumentDefinition::new("x", STRING))
                            .argument(ArgumentDefinition::new("x", "Int")),
                    )
                    .field(
                        FieldDefinition::new("filtered", "Result")
                            .argument(ArgumentDefinition::new("f", "Filter")),
                    ),
            );

        let err = registry.finalize().unwrap_err();
        let expected = [
            ("Status", "A"),
            ("Filter", "status"),
            ("Result", "Post"),
            ("Search.s", "x"),
        ];
        for (owner, name) in expected {
            assert!(
                err.violations().contains(&SchemaError::DuplicateMember {
                    owner: owner.into(),
                    name: name.into()
                }),
                "{owner}.{name} should be reported"
            );
        }
        assert_eq!(err.len(), expected.len());
    }

    #[test]
    fn test_empty_types_are_rejected() {
        let mut registry = SchemaRegistry::build("Query", None, None);
        registry
            .object(ObjectDefinition::new("Query"))
            .interface(InterfaceDefinition::new("Empty"))
            .enumeration(EnumDefinition::new("Nothing"))
            .union(UnionDefinition::new("NoMembers"))
            .input_object(InputObjectDefinition::new("NoInput"));

        let err = registry.finalize().unwrap_err();
        let expected = [
            ("Query", TypeKind::Object, "field"),
            ("Empty", TypeKind::Interface, "field"),
            ("Nothing", TypeKind::Enum, "value"),
            ("NoMembers", TypeKind::Union, "member"),
            ("NoInput", TypeKind::InputObject, "field"),
        ];
        for (name, kind, member) in expected {
            assert!(err.violations().contains(&SchemaError::EmptyType {
                name: name.into(),
                kind,
                member
            }));
        }
        assert_eq!(err.len(), expected.len());
        assert!(err.to_string().contains("OBJECT `Query` must define at least one field"));
    }

    #[test]
    fn test_inherited_fields_fill_an_object() {
        let mut registry = SchemaRegistry::build("Query", None, None);
        registry
            .interface(
                InterfaceDefinition::new("Versioned")
                    .field(FieldDefinition::new("version", STRING)),
            )
            .object(ObjectDefinition::new("Query").implements("Versioned"));

        let schema = registry.finalize().unwrap();
        assert_eq!(schema.effective_fields("Query").unwrap().len(), 1);
    }
}

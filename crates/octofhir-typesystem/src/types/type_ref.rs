//! References to named types, optionally wrapped in list and non-null.

use std::fmt;

/// Built-in `Int` scalar.
pub const INT: &str = "Int";
/// Built-in `Float` scalar.
pub const FLOAT: &str = "Float";
/// Built-in `String` scalar.
pub const STRING: &str = "String";
/// Built-in `Boolean` scalar.
pub const BOOLEAN: &str = "Boolean";
/// Built-in `ID` scalar.
pub const ID: &str = "ID";

/// Names of the scalars every schema starts with.
pub const BUILTIN_SCALARS: [&str; 5] = [INT, FLOAT, STRING, BOOLEAN, ID];

/// A type reference as it appears on a field or argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// `Name`
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// `Name!`
    pub fn named_nn(name: impl Into<String>) -> Self {
        Self::named(name).non_null()
    }

    /// `[Name]`
    pub fn named_list(name: impl Into<String>) -> Self {
        Self::named(name).list()
    }

    /// `[Name!]!`
    pub fn named_nn_list_nn(name: impl Into<String>) -> Self {
        Self::named_nn(name).list().non_null()
    }

    /// Wraps this reference in a list.
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Wraps this reference in non-null. Already non-null references are
    /// returned unchanged.
    #[must_use]
    pub fn non_null(self) -> Self {
        if self.is_non_null() {
            self
        } else {
            Self::NonNull(Box::new(self))
        }
    }

    /// Returns the innermost named type, unwrapping list and non-null.
    #[must_use]
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.base_name(),
        }
    }

    #[must_use]
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Returns the reference with one outer non-null wrapper removed.
    #[must_use]
    pub fn nullable(&self) -> &Self {
        match self {
            Self::NonNull(inner) => inner,
            other => other,
        }
    }

    /// Checks whether a field of type `self` may implement an interface field
    /// of type `expected`.
    ///
    /// Non-null may tighten a nullable expectation but never loosen it, list
    /// shape must match, and named types must be equal or related through
    /// `is_named_subtype(actual, expected)`.
    pub fn is_valid_implementation<F>(&self, expected: &Self, is_named_subtype: &F) -> bool
    where
        F: Fn(&str, &str) -> bool,
    {
        match (self, expected) {
            (Self::NonNull(actual), Self::NonNull(expected)) => {
                actual.is_valid_implementation(expected, is_named_subtype)
            }
            (_, Self::NonNull(_)) => false,
            (Self::NonNull(actual), expected) => {
                actual.is_valid_implementation(expected, is_named_subtype)
            }
            (Self::List(actual), Self::List(expected)) => {
                actual.is_valid_implementation(expected, is_named_subtype)
            }
            (Self::Named(actual), Self::Named(expected)) => {
                actual == expected || is_named_subtype(actual, expected)
            }
            _ => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

/// Checks if a string is a valid GraphQL name: `[_A-Za-z][_0-9A-Za-z]*`.
pub(crate) fn is_valid_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }

    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_subtypes(_: &str, _: &str) -> bool {
        false
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeRef::named(STRING).to_string(), "String");
        assert_eq!(TypeRef::named_nn(ID).to_string(), "ID!");
        assert_eq!(TypeRef::named_list("Node").to_string(), "[Node]");
        assert_eq!(TypeRef::named_nn_list_nn("Node").to_string(), "[Node!]!");
    }

    #[test]
    fn test_base_name_unwraps_everything() {
        let ty = TypeRef::named_nn_list_nn("Comment").list();
        assert_eq!(ty.base_name(), "Comment");
        assert!(!ty.is_non_null());
    }

    #[test]
    fn test_non_null_is_idempotent() {
        assert_eq!(TypeRef::named_nn(ID).non_null(), TypeRef::named_nn(ID));
    }

    #[test]
    fn test_stricter_nullability_is_valid() {
        let actual = TypeRef::named_nn(STRING);
        let expected = TypeRef::named(STRING);
        assert!(actual.is_valid_implementation(&expected, &no_subtypes));
    }

    #[test]
    fn test_looser_nullability_is_invalid() {
        let actual = TypeRef::named(STRING);
        let expected = TypeRef::named_nn(STRING);
        assert!(!actual.is_valid_implementation(&expected, &no_subtypes));
    }

    #[test]
    fn test_list_shape_must_match() {
        let actual = TypeRef::named(STRING);
        let expected = TypeRef::named_list(STRING);
        assert!(!actual.is_valid_implementation(&expected, &no_subtypes));
        assert!(
            TypeRef::named_nn_list_nn(STRING)
                .is_valid_implementation(&TypeRef::named_list(STRING), &no_subtypes)
        );
    }

    #[test]
    fn test_covariant_named_type() {
        let is_subtype = |actual: &str, expected: &str| actual == "Comment" && expected == "Node";
        let comment = TypeRef::named("Comment");
        let node = TypeRef::named("Node");
        assert!(comment.is_valid_implementation(&node, &is_subtype));
        assert!(!node.is_valid_implementation(&comment, &is_subtype));
        assert!(!TypeRef::named(STRING).is_valid_implementation(&TypeRef::named(INT), &is_subtype));
    }

    #[test]
    fn test_graphql_names() {
        assert!(is_valid_graphql_name("Patient"));
        assert!(is_valid_graphql_name("_private"));
        assert!(is_valid_graphql_name("Type123"));
        assert!(!is_valid_graphql_name(""));
        assert!(!is_valid_graphql_name("123Type"));
        assert!(!is_valid_graphql_name("us-core-patient"));
    }
}

//! Storage of field definitions per owner and composition layer.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{SchemaError, TypeSystemError};
use crate::types::FieldDefinition;

/// Composition layer a field was declared in.
///
/// An object may redeclare a field it inherits from an interface; that is an
/// override, not a duplicate, because the two declarations live in different
/// layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldLayer {
    Interface,
    Object,
}

/// Registry of declared and effective (post-composition) fields.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    declared: HashMap<(String, FieldLayer), IndexMap<String, FieldDefinition>>,
    effective: HashMap<String, IndexMap<String, FieldDefinition>>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a field under `owner` in `layer`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateField` if the owner already declares a field of the
    /// same name in the same layer. The first declaration is kept.
    pub fn define(
        &mut self,
        owner: &str,
        layer: FieldLayer,
        field: FieldDefinition,
    ) -> Result<(), SchemaError> {
        let fields = self
            .declared
            .entry((owner.to_string(), layer))
            .or_default();

        if fields.contains_key(&field.name) {
            return Err(SchemaError::DuplicateField {
                owner: owner.to_string(),
                field: field.name,
            });
        }

        fields.insert(field.name.clone(), field);
        Ok(())
    }

    /// Returns the fields `owner` declared in `layer`, in declaration order.
    pub fn declared(
        &self,
        owner: &str,
        layer: FieldLayer,
    ) -> Option<&IndexMap<String, FieldDefinition>> {
        self.declared.get(&(owner.to_string(), layer))
    }

    /// Installs the composed field set of `owner`.
    pub(crate) fn install_effective(
        &mut self,
        owner: &str,
        fields: IndexMap<String, FieldDefinition>,
    ) {
        self.effective.insert(owner.to_string(), fields);
    }

    /// Returns the effective field set of `owner`.
    pub fn effective(&self, owner: &str) -> Option<&IndexMap<String, FieldDefinition>> {
        self.effective.get(owner)
    }

    /// Looks up a field after composition.
    ///
    /// # Errors
    ///
    /// Returns `FieldNotFound` if the owner has no effective field of that
    /// name.
    pub fn lookup(&self, owner: &str, field: &str) -> Result<&FieldDefinition, TypeSystemError> {
        self.effective
            .get(owner)
            .and_then(|fields| fields.get(field))
            .ok_or_else(|| TypeSystemError::FieldNotFound {
                owner: owner.to_string(),
                field: field.to_string(),
            })
    }
}

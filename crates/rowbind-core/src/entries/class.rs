//! Class type entry.
//!
//! `ClassEntry` is the registration-based replacement for reflection: it
//! lists a type's constructors (in declaration order) and its settable
//! properties, plus the visibility and base class needed for assignability.
//! Entries are normally produced by [`ClassBuilder`](crate::ClassBuilder).

use crate::TypeHash;

use super::{ConstructorEntry, PropertyEntry, PropertyKind};

/// Registry entry for a class type.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    pub name: String,
    pub type_hash: TypeHash,
    /// Implicit instantiation is only allowed for public classes.
    pub is_public: bool,
    /// Single inheritance, used for assignability.
    pub base_class: Option<TypeHash>,
    /// Constructors in declaration order.
    pub constructors: Vec<ConstructorEntry>,
    pub properties: Vec<PropertyEntry>,
}

impl ClassEntry {
    /// Create a public class entry with no members.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            name,
            type_hash,
            is_public: true,
            base_class: None,
            constructors: Vec::new(),
            properties: Vec::new(),
        }
    }

    // === Query Methods ===

    /// Constructors carrying the designated-instantiator marker.
    pub fn designated_constructors(&self) -> impl Iterator<Item = &ConstructorEntry> {
        self.constructors.iter().filter(|c| c.is_designated())
    }

    /// Properties of the given kind whose name matches a column.
    pub fn find_properties(&self, column: &str, kind: PropertyKind) -> Vec<&PropertyEntry> {
        self.properties
            .iter()
            .filter(|p| p.kind == kind && p.matches_column(column))
            .collect()
    }
}

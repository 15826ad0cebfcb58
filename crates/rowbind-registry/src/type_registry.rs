//! TypeRegistry - registered classes, enums and built-in column types.
//!
//! The registry stands in for runtime reflection. Classes are registered with
//! their constructors and properties (see [`rowbind_core::ClassBuilder`]),
//! enums with their cases. Every other component queries it by [`TypeHash`].
//!
//! # Example
//!
//! ```
//! use rowbind_registry::TypeRegistry;
//! use rowbind_core::{DataType, EnumEntry};
//!
//! let mut types = TypeRegistry::with_primitives();
//! types.register_enum(EnumEntry::new("Color").with_cases(["RED", "GREEN"])).unwrap();
//!
//! assert!(types.get_enum(DataType::named("Color").type_hash().unwrap()).is_some());
//! assert!(types.is_assignable(&DataType::Any, &DataType::INT));
//! ```

use rustc_hash::FxHashMap;

use rowbind_core::{
    ClassEntry, DataType, EnumEntry, NamedTypeList, PrimitiveEntry, RegistrationError, TypeEntry,
    TypeHash, primitives,
};

/// Registry of every type the engine can reason about.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// All type entries by hash.
    types: FxHashMap<TypeHash, TypeEntry>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in column types pre-registered.
    pub fn with_primitives() -> Self {
        let mut registry = Self::new();
        for (name, type_hash) in primitives::ALL {
            let primitive = TypeEntry::Primitive(PrimitiveEntry { name, type_hash });
            registry.types.insert(type_hash, primitive);
        }
        registry
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a class. Its base class, if any, must already be registered.
    pub fn register_class(&mut self, entry: ClassEntry) -> Result<(), RegistrationError> {
        if self.types.contains_key(&entry.type_hash) {
            return Err(RegistrationError::DuplicateType(entry.name));
        }
        if let Some(base) = entry.base_class {
            if self.get_class(base).is_none() {
                return Err(RegistrationError::UnknownBaseClass {
                    class: entry.name,
                    base: self.name_of(base),
                });
            }
        }
        self.types.insert(entry.type_hash, TypeEntry::Class(entry));
        Ok(())
    }

    /// Register an enum.
    pub fn register_enum(&mut self, entry: EnumEntry) -> Result<(), RegistrationError> {
        if self.types.contains_key(&entry.type_hash) {
            return Err(RegistrationError::DuplicateType(entry.name));
        }
        self.types.insert(entry.type_hash, TypeEntry::Enum(entry));
        Ok(())
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Look up any registered type.
    pub fn get(&self, hash: TypeHash) -> Option<&TypeEntry> {
        self.types.get(&hash)
    }

    /// Look up a registered class. `None` if the hash names another kind.
    pub fn get_class(&self, hash: TypeHash) -> Option<&ClassEntry> {
        self.types.get(&hash).and_then(TypeEntry::as_class)
    }

    /// Look up a registered enum. `None` if the hash names another kind.
    pub fn get_enum(&self, hash: TypeHash) -> Option<&EnumEntry> {
        self.types.get(&hash).and_then(TypeEntry::as_enum)
    }

    /// The class entry behind a `Simple` data type, if it names one.
    pub fn class_of(&self, data_type: &DataType) -> Option<&ClassEntry> {
        data_type.type_hash().and_then(|h| self.get_class(h))
    }

    /// The enum entry behind a `Simple` data type, if it names one.
    pub fn enum_of(&self, data_type: &DataType) -> Option<&EnumEntry> {
        data_type.type_hash().and_then(|h| self.get_enum(h))
    }

    /// Check if a type with this hash is registered.
    pub fn contains(&self, hash: TypeHash) -> bool {
        self.types.contains_key(&hash)
    }

    /// Number of registered types, primitives included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // ==========================================================================
    // Assignability
    // ==========================================================================

    /// Check if a value of type `source` can be used where `target` is expected
    /// without conversion.
    ///
    /// Holds for equal types, for the `Any` target, for a class and any of
    /// its base classes, and element-wise for containers and optionals of
    /// the same kind.
    pub fn is_assignable(&self, target: &DataType, source: &DataType) -> bool {
        if target == source || *target == DataType::Any {
            return true;
        }
        match (target, source) {
            (DataType::Simple(t), DataType::Simple(s)) => self.is_derived_from(*s, *t),
            (DataType::SqlArray(t), DataType::SqlArray(s))
            | (DataType::List(t), DataType::List(s))
            | (DataType::Set(t), DataType::Set(s))
            | (DataType::Array(t), DataType::Array(s))
            | (DataType::Optional(t), DataType::Optional(s)) => self.is_assignable(t, s),
            _ => false,
        }
    }

    /// Check if class `derived` is `base` or inherits from it.
    pub fn is_derived_from(&self, derived: TypeHash, base: TypeHash) -> bool {
        let mut current = Some(derived);
        while let Some(hash) = current {
            if hash == base {
                return true;
            }
            current = self.get_class(hash).and_then(|c| c.base_class);
        }
        false
    }

    // ==========================================================================
    // Display
    // ==========================================================================

    /// Registered name of a type hash, or the hash itself when unknown.
    pub fn name_of(&self, hash: TypeHash) -> String {
        self.types
            .get(&hash)
            .map(|e| e.name().to_string())
            .unwrap_or_else(|| hash.to_string())
    }

    /// Render a data type using registered names.
    pub fn type_name(&self, data_type: &DataType) -> String {
        data_type.display_with(&|h| self.name_of(h))
    }

    /// Render a column list as `[name: type, ...]` using registered names.
    pub fn describe_columns(&self, columns: &NamedTypeList) -> String {
        columns.display_with(&|dt| self.type_name(dt))
    }
}

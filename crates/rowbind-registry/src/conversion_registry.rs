//! TypeConversionRegistry - registered conversions in both directions.
//!
//! Inbound conversions (database to application) are keyed by the
//! `(source, target)` pair. Outbound conversions (application to database)
//! are keyed by the source type only; the database side decides the target.
//!
//! Registering the same key twice replaces the earlier conversion in place,
//! so the last registration wins while the registration order used by the
//! fallback scan is kept.

use rustc_hash::FxHashMap;
use tracing::trace;

use rowbind_core::{ConversionError, DataType, Direction, TypeConversion, Value};

use crate::TypeRegistry;

#[derive(Debug)]
struct FromDbEntry {
    source: DataType,
    target: DataType,
    conversion: TypeConversion,
}

#[derive(Debug)]
struct ToDbEntry {
    source: DataType,
    conversion: TypeConversion,
}

/// Registry of inbound and outbound conversions.
#[derive(Debug, Default)]
pub struct TypeConversionRegistry {
    /// Inbound conversions in registration order.
    from_db: Vec<FromDbEntry>,
    /// Exact-pair index into `from_db`.
    from_db_index: FxHashMap<(DataType, DataType), usize>,
    /// Outbound conversions in registration order.
    to_db: Vec<ToDbEntry>,
    /// Exact-source index into `to_db`.
    to_db_index: FxHashMap<DataType, usize>,
}

impl TypeConversionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a database-to-application conversion from `source` to `target`.
    pub fn register_conversion_from_db<F>(&mut self, source: DataType, target: DataType, f: F)
    where
        F: Fn(Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        let conversion = TypeConversion::from_non_null(Direction::FromDb, f);
        let key = (source.clone(), target.clone());
        if let Some(&index) = self.from_db_index.get(&key) {
            trace!(source = %source, target = %target, "replacing inbound conversion");
            self.from_db[index].conversion = conversion;
            return;
        }
        self.from_db_index.insert(key, self.from_db.len());
        self.from_db.push(FromDbEntry {
            source,
            target,
            conversion,
        });
    }

    /// Register an application-to-database conversion for values of `source`.
    pub fn register_conversion_to_db<F>(&mut self, source: DataType, f: F)
    where
        F: Fn(Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        let conversion = TypeConversion::from_non_null(Direction::ToDb, f);
        if let Some(&index) = self.to_db_index.get(&source) {
            trace!(source = %source, "replacing outbound conversion");
            self.to_db[index].conversion = conversion;
            return;
        }
        self.to_db_index.insert(source.clone(), self.to_db.len());
        self.to_db.push(ToDbEntry { source, conversion });
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Find an inbound conversion.
    ///
    /// The exact pair wins. Otherwise the first registration, in registration
    /// order, that accepts `source` and produces something assignable to
    /// `target` is used.
    pub fn find_conversion_from_db(
        &self,
        source: &DataType,
        target: &DataType,
        types: &TypeRegistry,
    ) -> Option<TypeConversion> {
        if let Some(&index) = self.from_db_index.get(&(source.clone(), target.clone())) {
            return Some(self.from_db[index].conversion.clone());
        }
        self.from_db
            .iter()
            .find(|e| {
                types.is_assignable(&e.source, source) && types.is_assignable(target, &e.target)
            })
            .map(|e| e.conversion.clone())
    }

    /// Find an outbound conversion for a value of runtime type `source`.
    pub fn find_conversion_to_db(
        &self,
        source: &DataType,
        types: &TypeRegistry,
    ) -> Option<TypeConversion> {
        if let Some(&index) = self.to_db_index.get(source) {
            return Some(self.to_db[index].conversion.clone());
        }
        self.to_db
            .iter()
            .find(|e| types.is_assignable(&e.source, source))
            .map(|e| e.conversion.clone())
    }

    /// Number of distinct inbound registrations.
    pub fn from_db_count(&self) -> usize {
        self.from_db.len()
    }

    /// Number of distinct outbound registrations.
    pub fn to_db_count(&self) -> usize {
        self.to_db.len()
    }
}

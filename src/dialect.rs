//! Database dialects.
//!
//! A dialect gets the last word on values sent to the database that no
//! registered outbound conversion handled.

use rowbind_core::Value;

/// Database-specific value handling.
pub trait Dialect: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Adjust a value before it is bound as a statement parameter.
    fn value_to_database(&self, value: Value) -> Value {
        value
    }
}

/// A dialect that passes every value through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDialect;

impl Dialect for DefaultDialect {
    fn name(&self) -> &str {
        "default"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_passes_through() {
        let dialect = DefaultDialect;
        assert_eq!(dialect.name(), "default");
        assert_eq!(dialect.value_to_database(Value::Int(1)), Value::Int(1));
        assert_eq!(dialect.value_to_database(Value::Null), Value::Null);
    }
}

//! Conversion function values.
//!
//! A [`TypeConversion`] is a cheap-to-clone, thread-safe function from one
//! [`Value`] to another, tagged with the direction it was registered for.
//! Conversions compose, which is how optional wrapping and container element
//! mapping are built on top of simpler conversions.

use std::fmt;
use std::sync::Arc;

use crate::error::ConversionError;
use crate::value::Value;

/// Direction of a conversion relative to the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Database value to application value.
    FromDb,
    /// Application value to database value.
    ToDb,
}

type ConvertFn = dyn Fn(Value) -> Result<Value, ConversionError> + Send + Sync;

/// A conversion from one value representation to another.
#[derive(Clone)]
pub struct TypeConversion {
    direction: Direction,
    identity: bool,
    func: Arc<ConvertFn>,
}

impl TypeConversion {
    /// A conversion that returns its input unchanged.
    pub fn identity() -> Self {
        Self {
            direction: Direction::FromDb,
            identity: true,
            func: Arc::new(Ok::<Value, ConversionError>),
        }
    }

    /// Wrap a function that sees every value, including `Null`.
    pub fn from_fn<F>(direction: Direction, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        Self {
            direction,
            identity: false,
            func: Arc::new(f),
        }
    }

    /// Wrap a function that only sees non-null values. `Null` passes through.
    pub fn from_non_null<F>(direction: Direction, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        Self::from_fn(direction, move |value| match value {
            Value::Null => Ok(Value::Null),
            v => f(v),
        })
    }

    /// Run `f` on the result of this conversion.
    pub fn compose<F>(&self, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        let first = Arc::clone(&self.func);
        Self {
            direction: self.direction,
            identity: false,
            func: Arc::new(move |value: Value| f(first(value)?)),
        }
    }

    /// Apply the conversion to one value.
    pub fn convert(&self, value: Value) -> Result<Value, ConversionError> {
        (self.func)(value)
    }

    /// The direction this conversion was registered for.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Check if this is the identity conversion.
    pub fn is_identity(&self) -> bool {
        self.identity
    }
}

impl fmt::Debug for TypeConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeConversion")
            .field("direction", &self.direction)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double_long() -> TypeConversion {
        TypeConversion::from_non_null(Direction::FromDb, |v| match v {
            Value::Long(n) => Ok(Value::Long(n * 2)),
            other => Err(ConversionError::TypeMismatch {
                expected: "long",
                actual: other.type_name(),
            }),
        })
    }

    #[test]
    fn identity_returns_input() {
        let conv = TypeConversion::identity();
        assert!(conv.is_identity());
        let out = conv.convert(Value::String("a".into())).unwrap();
        assert_eq!(out, Value::String("a".into()));
    }

    #[test]
    fn non_null_passes_null_through() {
        assert_eq!(double_long().convert(Value::Null).unwrap(), Value::Null);
        let doubled = double_long().convert(Value::Long(2)).unwrap();
        assert_eq!(doubled, Value::Long(4));
    }

    #[test]
    fn compose_applies_in_order() {
        let conv = double_long().compose(|v| Ok(Value::optional_of_nullable(v)));
        assert!(!conv.is_identity());
        assert_eq!(
            conv.convert(Value::Long(3)).unwrap(),
            Value::Optional(Some(Box::new(Value::Long(6))))
        );
        assert_eq!(conv.convert(Value::Null).unwrap(), Value::Optional(None));
    }

    #[test]
    fn errors_propagate_through_compose() {
        let conv = double_long().compose(|v| Ok(Value::optional_of_nullable(v)));
        assert!(conv.convert(Value::Bool(true)).is_err());
    }

    #[test]
    fn direction_is_kept() {
        let conv = TypeConversion::from_fn(Direction::ToDb, Ok);
        assert_eq!(conv.direction(), Direction::ToDb);
        assert_eq!(conv.compose(Ok).direction(), Direction::ToDb);
    }
}

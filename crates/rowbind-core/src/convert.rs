//! Conversion traits between Rust types and [`Value`].
//!
//! - [`FromValue`]: extract a Rust value from a `Value`
//! - [`IntoValue`]: turn a Rust value into a `Value`
//!
//! These are the typed edge of the engine: constructor and property closures
//! registered through [`ClassBuilder`](crate::ClassBuilder) receive their
//! arguments through `FromValue`. They perform no implicit widening; values
//! reach them already converted to the declared parameter type.
//!
//! ## Example
//!
//! ```
//! use rowbind_core::{FromValue, IntoValue, Value};
//!
//! let value = 42i64.into_value();
//! assert_eq!(i64::from_value(value).unwrap(), 42);
//!
//! let absent: Option<String> = Option::from_value(Value::Null).unwrap();
//! assert_eq!(absent, None);
//! ```

use std::any::Any;

use crate::error::ConversionError;
use crate::value::{EnumValue, Value};

/// Extract a value from a [`Value`].
pub trait FromValue: Sized {
    /// Returns a `ConversionError` if the value has an incompatible shape.
    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

/// Convert a value into a [`Value`].
pub trait IntoValue {
    /// Wrap the value without any conversion.
    fn into_value(self) -> Value;
}

fn mismatch(expected: &'static str, value: &Value) -> ConversionError {
    ConversionError::TypeMismatch {
        expected,
        actual: value.type_name(),
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

// ============================================================================
// Scalar implementations
// ============================================================================

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident, $name:literal);* $(;)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, ConversionError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(mismatch($name, &other)),
                    }
                }
            }

            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

impl_scalar! {
    bool => Bool, "bool";
    i32 => Int, "int";
    i64 => Long, "long";
    f32 => Float, "float";
    f64 => Double, "double";
    char => Char, "char";
    String => String, "string";
    EnumValue => Enum, "enum";
}

/// Bytes read back from `Value::Bytes` one element at a time.
impl FromValue for u8 {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Int(v) => u8::try_from(v).map_err(|_| ConversionError::IntegerOverflow {
                value: v as i64,
                target_type: "u8",
            }),
            other => Err(mismatch("int", &other)),
        }
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(self.to_string())
    }
}

// ============================================================================
// Optional and collection implementations
// ============================================================================

/// `Null` and an empty optional both read as `None`.
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null | Value::Optional(None) => Ok(None),
            Value::Optional(Some(inner)) => T::from_value(*inner).map(Some),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        Value::Optional(self.map(|v| Box::new(v.into_value())))
    }
}

/// Reads any sequence shape: list, set, native array or database array.
impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::List(items)
            | Value::Set(items)
            | Value::Array(items)
            | Value::SqlArray(items) => items.into_iter().map(T::from_value).collect(),
            Value::Bytes(bytes) => bytes
                .into_iter()
                .map(|b| T::from_value(Value::Int(b as i32)))
                .collect(),
            other => Err(mismatch("sequence", &other)),
        }
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

/// Extract a registered class instance out of `Value::Object`.
pub fn object_from_value<T: Any>(value: Value) -> Result<T, ConversionError> {
    let expected = std::any::type_name::<T>();
    let obj = match value {
        Value::Object(obj) => obj,
        other => return Err(mismatch(expected, &other)),
    };
    let wrong_type = ConversionError::TypeMismatch {
        expected,
        actual: "object of another type",
    };
    obj.downcast::<T>().map_err(|_| wrong_type)
}

//! Default conversions between built-in column types.

use rowbind_core::{ConversionError, DataType, Value};
use rowbind_registry::{TypeConversionRegistry, TypeRegistry};

use super::ConversionModule;

/// Numeric, character and text conversions every provider starts with.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConversions;

impl ConversionModule for DefaultConversions {
    fn name(&self) -> &'static str {
        "defaults"
    }

    fn register(&self, _types: &mut TypeRegistry, conversions: &mut TypeConversionRegistry) {
        // Numbers
        conversions.register_conversion_from_db(DataType::INT, DataType::LONG, |v| {
            Ok(Value::Long(as_int(v)? as i64))
        });
        conversions.register_conversion_from_db(DataType::INT, DataType::DOUBLE, |v| {
            Ok(Value::Double(as_int(v)? as f64))
        });
        conversions.register_conversion_from_db(DataType::LONG, DataType::INT, |v| {
            let n = as_long(v)?;
            i32::try_from(n)
                .map(Value::Int)
                .map_err(|_| ConversionError::IntegerOverflow {
                    value: n,
                    target_type: "int",
                })
        });
        conversions.register_conversion_from_db(DataType::LONG, DataType::DOUBLE, |v| {
            Ok(Value::Double(as_long(v)? as f64))
        });
        conversions.register_conversion_from_db(DataType::FLOAT, DataType::DOUBLE, |v| match v {
            Value::Float(f) => Ok(Value::Double(f as f64)),
            other => Err(mismatch("float", &other)),
        });
        conversions.register_conversion_from_db(DataType::DOUBLE, DataType::FLOAT, |v| match v {
            Value::Double(d) => Ok(Value::Float(d as f32)),
            other => Err(mismatch("double", &other)),
        });

        // Characters
        conversions.register_conversion_from_db(DataType::STRING, DataType::CHAR, |v| match v {
            Value::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(ConversionError::InvalidValue {
                        target: "char",
                        value: s,
                        reason: "expected exactly one character".to_string(),
                    }),
                }
            }
            other => Err(mismatch("string", &other)),
        });
        conversions.register_conversion_from_db(DataType::CHAR, DataType::STRING, |v| match v {
            Value::Char(c) => Ok(Value::String(c.to_string())),
            other => Err(mismatch("char", &other)),
        });

        // Text
        for source in [DataType::INT, DataType::LONG, DataType::DOUBLE] {
            conversions.register_conversion_from_db(source, DataType::STRING, number_text);
        }
        conversions.register_conversion_from_db(DataType::BYTES, DataType::STRING, |v| match v {
            Value::Bytes(bytes) => String::from_utf8(bytes)
                .map(Value::String)
                .map_err(|e| ConversionError::InvalidValue {
                    target: "string",
                    value: format!("{} bytes", e.as_bytes().len()),
                    reason: e.utf8_error().to_string(),
                }),
            other => Err(mismatch("bytes", &other)),
        });

        // Outbound
        conversions.register_conversion_to_db(DataType::CHAR, |v| match v {
            Value::Char(c) => Ok(Value::String(c.to_string())),
            other => Err(mismatch("char", &other)),
        });
    }
}

fn mismatch(expected: &'static str, value: &Value) -> ConversionError {
    ConversionError::TypeMismatch {
        expected,
        actual: value.type_name(),
    }
}

fn number_text(value: Value) -> Result<Value, ConversionError> {
    match value.to_text() {
        Some(text) => Ok(Value::String(text)),
        None => Err(mismatch("number", &value)),
    }
}

fn as_int(value: Value) -> Result<i32, ConversionError> {
    match value {
        Value::Int(n) => Ok(n),
        other => Err(mismatch("int", &other)),
    }
}

fn as_long(value: Value) -> Result<i64, ConversionError> {
    match value {
        Value::Long(n) => Ok(n),
        other => Err(mismatch("long", &other)),
    }
}

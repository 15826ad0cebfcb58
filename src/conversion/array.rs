//! Database array conversions.
//!
//! A database array column can be read into a set, a list or a native array
//! of any element type the element column type converts to. The element
//! conversion is resolved when the outer conversion is.

use rowbind_core::{ConversionError, DataType, Direction, TypeConversion, Value};

use super::{ResolutionContext, find_conversion};

/// How converted elements are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collector {
    /// Deduplicated, first-seen order.
    Set,
    List,
    Array,
}

impl Collector {
    fn collect(self, items: Vec<Value>) -> Value {
        match self {
            Collector::Set => Value::set_of(items),
            Collector::List => Value::List(items),
            Collector::Array => Value::Array(items),
        }
    }
}

/// Find a conversion from a database array to a set, list or native array.
pub fn find_array_conversion(
    source: &DataType,
    target: &DataType,
    ctx: &ResolutionContext<'_>,
) -> Option<TypeConversion> {
    let DataType::SqlArray(source_element) = source else {
        return None;
    };

    let (collector, target_element) = match target {
        DataType::Set(e) => (Collector::Set, e),
        DataType::List(e) => (Collector::List, e),
        DataType::Array(e) => (Collector::Array, e),
        _ => return None,
    };

    let element = find_conversion(source_element, target_element, ctx)?;

    Some(TypeConversion::from_non_null(Direction::FromDb, move |value| {
        let items = match value {
            Value::SqlArray(items) => items,
            other => {
                return Err(ConversionError::TypeMismatch {
                    expected: "sql array",
                    actual: other.type_name(),
                });
            }
        };
        let converted = items
            .into_iter()
            .map(|item| element.convert(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(collector.collect(converted))
    }))
}

//! Enum conversions.
//!
//! Any value whose text form names a case converts to that case of a
//! registered enum.

use rowbind_core::{ConversionError, DataType, Direction, TypeConversion, Value};

use super::ResolutionContext;

/// Find a conversion into a registered enum.
///
/// The source value is matched by its text form (see [`Value::to_text`]).
/// Bytes qualify only when they hold valid UTF-8, and timestamps and dates
/// are matched by their numeric text. Containers, optionals and objects have
/// no text form and fail with a type mismatch.
pub fn find_enum_conversion(
    target: &DataType,
    ctx: &ResolutionContext<'_>,
) -> Option<TypeConversion> {
    let entry = ctx.types.enum_of(target)?.clone();

    Some(TypeConversion::from_non_null(Direction::FromDb, move |value| {
        let Some(text) = value.to_text() else {
            return Err(ConversionError::TypeMismatch {
                expected: "enum case name",
                actual: value.type_name(),
            });
        };
        entry
            .case_by_name(&text)
            .map(Value::Enum)
            .ok_or_else(|| ConversionError::UnknownEnumVariant {
                enum_name: entry.name.clone(),
                value: text,
            })
    }))
}

//! Conversion resolution.
//!
//! Determines whether, and how, a value of one [`DataType`] can be turned
//! into another when reading from the database.
//!
//! ## Resolution Priority
//!
//! Strategies are tried in this order, first success wins:
//! 1. Assignability (identity)
//! 2. Registered conversions
//! 3. Database arrays to sets, lists and native arrays
//! 4. Optional wrapping
//! 5. Enum lookup by case name
//!
//! Failing all of them is not an error: callers use `None` to reject a
//! candidate and try the next one.

use rowbind_core::{DataType, TypeConversion};
use rowbind_registry::{TypeConversionRegistry, TypeRegistry};

mod array;
mod enums;
mod optional;

pub use array::find_array_conversion;
pub use enums::find_enum_conversion;
pub use optional::find_optional_conversion;

/// Read-only view of the registries used during resolution.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    pub types: &'a TypeRegistry,
    pub conversions: &'a TypeConversionRegistry,
}

impl<'a> ResolutionContext<'a> {
    /// Borrow both registries for one resolution.
    pub fn new(types: &'a TypeRegistry, conversions: &'a TypeConversionRegistry) -> Self {
        Self { types, conversions }
    }
}

/// Find a database-to-application conversion from `source` to `target`.
///
/// Element and inner conversions of containers and optionals are resolved
/// here, recursively, so a returned conversion never fails to resolve later.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn find_conversion(
    source: &DataType,
    target: &DataType,
    ctx: &ResolutionContext<'_>,
) -> Option<TypeConversion> {
    // 1. Assignable types need no conversion
    if ctx.types.is_assignable(target, source) {
        return Some(TypeConversion::identity());
    }

    // 2. Registered conversions
    let registry = ctx.conversions;
    if let Some(conv) = registry.find_conversion_from_db(source, target, ctx.types) {
        return Some(conv);
    }

    // 3. Database arrays
    if let Some(conv) = find_array_conversion(source, target, ctx) {
        return Some(conv);
    }

    // 4. Optional wrapping
    if let Some(conv) = find_optional_conversion(source, target, ctx) {
        return Some(conv);
    }

    // 5. Enums by name
    if let Some(conv) = find_enum_conversion(target, ctx) {
        return Some(conv);
    }

    None
}

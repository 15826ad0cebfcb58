//! Constructor and property resolution.
//!
//! Builds an [`Instantiator`] for a target type and a column shape.
//!
//! ## Algorithm
//!
//! 1. One column that converts directly to the target: use that conversion
//! 2. The target must be a registered class
//! 3. A designated constructor, if any, is used as is: its arity must match
//!    the column count and every parameter must convert
//! 4. Otherwise the class must be public. Public, non-ignored constructors
//!    are tried by descending parameter count, ties in declaration order.
//!    Columns beyond a candidate's parameters must name properties.
//!    The first candidate whose columns all convert wins.

use tracing::trace;

use rowbind_core::{
    ClassEntry, ConstructorEntry, DataType, NamedTypeList, PropertyEntry, PropertyKind,
    ResolutionError, TypeConversion,
};

use crate::conversion::{ResolutionContext, find_conversion};
use crate::instantiator::{Instantiator, PropertyAccessor};

/// Resolve an instantiator for `target` from rows shaped like `columns`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn resolve_instantiator(
    target: &DataType,
    columns: &NamedTypeList,
    ctx: &ResolutionContext<'_>,
) -> Result<Instantiator, ResolutionError> {
    // Single column that converts straight to the target
    if columns.len() == 1 {
        if let Some(conversion) = find_conversion(columns.data_type(0), target, ctx) {
            trace!(type_name = %ctx.types.type_name(target), "using single-column conversion");
            return Ok(Instantiator::single(columns.clone(), conversion));
        }
    }

    let Some(class) = ctx.types.class_of(target) else {
        return Err(ResolutionError::UnknownType {
            type_name: ctx.types.type_name(target),
            columns: ctx.types.describe_columns(columns),
        });
    };

    if let Some(instantiator) = resolve_designated(class, columns, ctx)? {
        return Ok(instantiator);
    }

    if !class.is_public {
        return Err(ResolutionError::NotPublic {
            type_name: class.name.clone(),
        });
    }

    for constructor in candidate_constructors(class) {
        if let Some(instantiator) = resolve_implicit(class, constructor, columns, ctx)? {
            trace!(
                class = %class.name,
                params = constructor.param_count(),
                "resolved instantiator"
            );
            return Ok(instantiator);
        }
        trace!(
            class = %class.name,
            params = constructor.param_count(),
            "rejected constructor candidate"
        );
    }

    Err(ResolutionError::NoMatchingConstructor {
        type_name: class.name.clone(),
        columns: ctx.types.describe_columns(columns),
    })
}

/// Public, non-ignored constructors, most parameters first.
///
/// The sort is stable, so equal arities keep declaration order.
pub fn candidate_constructors(class: &ClassEntry) -> Vec<&ConstructorEntry> {
    let mut candidates: Vec<&ConstructorEntry> = class
        .constructors
        .iter()
        .filter(|c| c.is_public() && !c.is_ignored())
        .collect();
    candidates.sort_by(|a, b| b.param_count().cmp(&a.param_count()));
    candidates
}

/// Use the designated constructor, if the class has exactly one.
fn resolve_designated(
    class: &ClassEntry,
    columns: &NamedTypeList,
    ctx: &ResolutionContext<'_>,
) -> Result<Option<Instantiator>, ResolutionError> {
    let designated: Vec<&ConstructorEntry> = class.designated_constructors().collect();
    let constructor = match designated.as_slice() {
        [] => return Ok(None),
        [single] => *single,
        many => {
            return Err(ResolutionError::AmbiguousInstantiator {
                type_name: class.name.clone(),
                count: many.len(),
            });
        }
    };

    if constructor.param_count() != columns.len() {
        return Err(ResolutionError::ParameterCountMismatch {
            type_name: class.name.clone(),
            expected: constructor.param_count(),
            actual: columns.len(),
        });
    }

    let Some(conversions) = resolve_conversions(columns, &constructor.params, ctx) else {
        return Err(ResolutionError::NoMatchingConstructor {
            type_name: class.name.clone(),
            columns: ctx.types.describe_columns(columns),
        });
    };

    trace!(class = %class.name, "using designated constructor");
    Ok(Some(Instantiator::construct(
        columns.clone(),
        class.name.clone(),
        class.type_hash,
        constructor.clone(),
        conversions,
        Vec::new(),
    )))
}

/// Try one implicit candidate. `Ok(None)` rejects it without failing the
/// whole resolution.
fn resolve_implicit(
    class: &ClassEntry,
    constructor: &ConstructorEntry,
    columns: &NamedTypeList,
    ctx: &ResolutionContext<'_>,
) -> Result<Option<Instantiator>, ResolutionError> {
    let param_count = constructor.param_count();
    if param_count > columns.len() {
        return Ok(None);
    }

    let mut properties = Vec::with_capacity(columns.len() - param_count);
    for index in param_count..columns.len() {
        match find_property(class, columns.name(index)) {
            Ok(property) => properties.push(property),
            Err(ResolutionError::UnknownProperty { .. }) => return Ok(None),
            Err(err) => return Err(err),
        }
    }

    let targets: Vec<DataType> = constructor
        .params
        .iter()
        .chain(properties.iter().map(|p| &p.data_type))
        .cloned()
        .collect();

    let Some(mut conversions) = resolve_conversions(columns, &targets, ctx) else {
        return Ok(None);
    };

    let accessors = properties
        .into_iter()
        .zip(conversions.split_off(param_count))
        .map(|(property, conversion)| PropertyAccessor::new(property.clone(), conversion))
        .collect();

    Ok(Some(Instantiator::construct(
        columns.clone(),
        class.name.clone(),
        class.type_hash,
        constructor.clone(),
        conversions,
        accessors,
    )))
}

/// Conversions from each column to the target at the same position, or
/// `None` if any of them is missing.
fn resolve_conversions(
    columns: &NamedTypeList,
    targets: &[DataType],
    ctx: &ResolutionContext<'_>,
) -> Option<Vec<TypeConversion>> {
    if targets.len() != columns.len() {
        return None;
    }
    columns
        .iter()
        .zip(targets)
        .map(|(column, target)| find_conversion(&column.data_type, target, ctx))
        .collect()
}

/// Find the property a column writes to. Setters are preferred over fields.
pub fn find_property<'a>(
    class: &'a ClassEntry,
    column: &str,
) -> Result<&'a PropertyEntry, ResolutionError> {
    for kind in [PropertyKind::Setter, PropertyKind::Field] {
        match class.find_properties(column, kind).as_slice() {
            [] => continue,
            [single] => return Ok(*single),
            many => {
                let candidates: Vec<&str> = many.iter().map(|p| p.name.as_str()).collect();
                return Err(ResolutionError::AmbiguousProperty {
                    type_name: class.name.clone(),
                    property: column.to_string(),
                    candidates: candidates.join(", "),
                });
            }
        }
    }
    Err(ResolutionError::UnknownProperty {
        type_name: class.name.clone(),
        property: column.to_string(),
    })
}

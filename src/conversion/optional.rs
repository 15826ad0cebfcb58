//! Optional wrapping.
//!
//! `Optional(U)` resolves the conversion to `U` and wraps its result; the
//! primitive-specialised optionals do the same for `int`, `long` and
//! `double`. A null result becomes an empty optional.

use rowbind_core::{DataType, TypeConversion, Value};

use super::{ResolutionContext, find_conversion};

/// Find a conversion into an optional target.
pub fn find_optional_conversion(
    source: &DataType,
    target: &DataType,
    ctx: &ResolutionContext<'_>,
) -> Option<TypeConversion> {
    let inner = match target {
        DataType::Optional(inner) => inner.as_ref().clone(),
        DataType::OptionalInt => DataType::INT,
        DataType::OptionalLong => DataType::LONG,
        DataType::OptionalDouble => DataType::DOUBLE,
        _ => return None,
    };

    let conv = find_conversion(source, &inner, ctx)?;
    Some(conv.compose(|v| Ok(Value::optional_of_nullable(v))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowbind_core::ConversionError;
    use rowbind_registry::{TypeConversionRegistry, TypeRegistry};

    fn registries() -> (TypeRegistry, TypeConversionRegistry) {
        let mut conversions = TypeConversionRegistry::new();
        conversions.register_conversion_from_db(DataType::INT, DataType::LONG, int_to_long);
        (TypeRegistry::with_primitives(), conversions)
    }

    fn int_to_long(v: Value) -> Result<Value, ConversionError> {
        match v {
            Value::Int(n) => Ok(Value::Long(n as i64)),
            other => Err(ConversionError::TypeMismatch {
                expected: "int",
                actual: other.type_name(),
            }),
        }
    }

    fn present(value: Value) -> Value {
        Value::Optional(Some(Box::new(value)))
    }

    #[test]
    fn null_is_empty_value_is_present() {
        let (types, conversions) = registries();
        let ctx = ResolutionContext::new(&types, &conversions);
        let target = DataType::optional(DataType::STRING);
        let conv = find_optional_conversion(&DataType::STRING, &target, &ctx).unwrap();

        assert_eq!(conv.convert(Value::Null).unwrap(), Value::Optional(None));
        let out = conv.convert(Value::String("x".into())).unwrap();
        assert_eq!(out, present(Value::String("x".into())));
    }

    #[test]
    fn specialised_optionals_convert_inner() {
        let (types, conversions) = registries();
        let ctx = ResolutionContext::new(&types, &conversions);

        let target = DataType::OptionalLong;
        let long = find_optional_conversion(&DataType::INT, &target, &ctx).unwrap();
        let out = long.convert(Value::Int(5)).unwrap();
        assert_eq!(out, present(Value::Long(5)));
        assert_eq!(long.convert(Value::Null).unwrap(), Value::Optional(None));

        let target = DataType::OptionalInt;
        let int = find_optional_conversion(&DataType::INT, &target, &ctx).unwrap();
        assert_eq!(int.convert(Value::Int(5)).unwrap(), present(Value::Int(5)));
    }

    #[test]
    fn unresolvable_inner_is_none() {
        let (types, conversions) = registries();
        let ctx = ResolutionContext::new(&types, &conversions);
        let target = DataType::OptionalDouble;
        assert!(find_optional_conversion(&DataType::STRING, &target, &ctx).is_none());
        assert!(find_optional_conversion(&DataType::INT, &DataType::INT, &ctx).is_none());
    }
}

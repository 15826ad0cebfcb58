//! Conversions between database timestamps and dates and `chrono` types.
//!
//! Only functional with the `chrono` cargo feature; without it
//! `is_available` reports the module as unavailable.

use rowbind_core::TypeHash;
use rowbind_registry::{TypeConversionRegistry, TypeRegistry};

use super::ConversionModule;

/// `chrono::DateTime<Utc>`.
pub const DATE_TIME_UTC: TypeHash = TypeHash::from_name("DateTime<Utc>");
/// `chrono::NaiveDateTime`.
pub const NAIVE_DATE_TIME: TypeHash = TypeHash::from_name("NaiveDateTime");
/// `chrono::NaiveDate`.
pub const NAIVE_DATE: TypeHash = TypeHash::from_name("NaiveDate");

/// Timestamp and date conversions for `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoConversions;

impl ConversionModule for ChronoConversions {
    fn name(&self) -> &'static str {
        "chrono"
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "chrono")
    }

    #[cfg(feature = "chrono")]
    fn register(&self, types: &mut TypeRegistry, conversions: &mut TypeConversionRegistry) {
        imp::register(types, conversions);
    }

    #[cfg(not(feature = "chrono"))]
    fn register(&self, _types: &mut TypeRegistry, _conversions: &mut TypeConversionRegistry) {}
}

#[cfg(feature = "chrono")]
mod imp {
    use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
    use rowbind_core::{ClassBuilder, ConversionError, DataType, Object, Value};
    use rowbind_registry::{TypeConversionRegistry, TypeRegistry};

    use super::{DATE_TIME_UTC, NAIVE_DATE, NAIVE_DATE_TIME};

    /// Days from 0001-01-01 to 1970-01-01.
    const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

    pub(super) fn register(types: &mut TypeRegistry, conversions: &mut TypeConversionRegistry) {
        register_type::<DateTime<Utc>>(types, "DateTime<Utc>");
        register_type::<NaiveDateTime>(types, "NaiveDateTime");
        register_type::<NaiveDate>(types, "NaiveDate");

        let date_time = DataType::simple(DATE_TIME_UTC);
        let naive_date_time = DataType::simple(NAIVE_DATE_TIME);
        let naive_date = DataType::simple(NAIVE_DATE);

        conversions.register_conversion_from_db(DataType::TIMESTAMP, date_time.clone(), |v| {
            Ok(Value::Object(Object::new(DATE_TIME_UTC, timestamp(v)?)))
        });
        conversions.register_conversion_from_db(DataType::TIMESTAMP, naive_date_time.clone(), |v| {
            Ok(Value::Object(Object::new(NAIVE_DATE_TIME, timestamp(v)?.naive_utc())))
        });
        conversions.register_conversion_from_db(DataType::DATE, naive_date.clone(), |v| {
            Ok(Value::Object(Object::new(NAIVE_DATE, date(v)?)))
        });

        conversions.register_conversion_to_db(date_time, |v| {
            let dt: DateTime<Utc> = object(v)?;
            Ok(Value::Timestamp(dt.timestamp_micros()))
        });
        conversions.register_conversion_to_db(naive_date_time, |v| {
            let dt: NaiveDateTime = object(v)?;
            Ok(Value::Timestamp(dt.and_utc().timestamp_micros()))
        });
        conversions.register_conversion_to_db(naive_date, |v| {
            let d: NaiveDate = object(v)?;
            Ok(Value::Date(d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE))
        });
    }

    /// Names the type for messages. Already registered types are left alone.
    fn register_type<T: std::any::Any + Send + Sync>(types: &mut TypeRegistry, name: &str) {
        let entry = ClassBuilder::<T>::new(name).build();
        if !types.contains(entry.type_hash) {
            // cannot fail: the name is free and the entry has no base class
            let _ = types.register_class(entry);
        }
    }

    fn timestamp(value: Value) -> Result<DateTime<Utc>, ConversionError> {
        match value {
            Value::Timestamp(micros) => match DateTime::<Utc>::from_timestamp_micros(micros) {
                Some(dt) => Ok(dt),
                None => Err(ConversionError::InvalidValue {
                    target: "DateTime<Utc>",
                    value: micros.to_string(),
                    reason: "timestamp out of range".to_string(),
                }),
            },
            other => Err(ConversionError::TypeMismatch {
                expected: "timestamp",
                actual: other.type_name(),
            }),
        }
    }

    fn date(value: Value) -> Result<NaiveDate, ConversionError> {
        match value {
            Value::Date(days) => days
                .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
                .and_then(NaiveDate::from_num_days_from_ce_opt)
                .ok_or_else(|| ConversionError::InvalidValue {
                    target: "NaiveDate",
                    value: days.to_string(),
                    reason: "date out of range".to_string(),
                }),
            other => Err(ConversionError::TypeMismatch {
                expected: "date",
                actual: other.type_name(),
            }),
        }
    }

    fn object<T: std::any::Any>(value: Value) -> Result<T, ConversionError> {
        rowbind_core::object_from_value(value)
    }
}

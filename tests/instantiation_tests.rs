//! Integration tests for rowbind using InstantiatorProvider as the entry point.
//!
//! These tests register application types, resolve instantiators for column
//! shapes and apply them to rows, end to end.

use rowbind::{
    ClassBuilder, ConversionError, DataType, DefaultDialect, EnumEntry, EnumValue,
    InstantiationError, InstantiatorProvider, NamedTypeList, Object, ResolutionError, TypeHash,
    Value,
};

/// Route engine logs to the test output. Set `RUST_LOG=rowbind=trace` to see
/// candidate rejections.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Default, PartialEq)]
struct Employee {
    id: i64,
    name: String,
    department: Option<String>,
    salary: f64,
    via: &'static str,
}

fn set_name(e: &mut Employee, v: String) {
    e.name = v;
}

fn set_department(e: &mut Employee, v: Option<String>) {
    e.department = v;
}

fn provider() -> InstantiatorProvider {
    init_tracing();
    let full = vec![DataType::LONG, DataType::STRING, DataType::DOUBLE];
    let class = ClassBuilder::<Employee>::new("Employee")
        .constructor(vec![DataType::LONG], |args| {
            Ok(Employee {
                id: args.next()?,
                via: "id",
                ..Default::default()
            })
        })
        .constructor(full, |args| {
            Ok(Employee {
                id: args.next()?,
                name: args.next()?,
                salary: args.next()?,
                via: "full",
                ..Default::default()
            })
        })
        .setter("name", DataType::STRING, set_name)
        .setter("department", DataType::STRING, set_department)
        .build();
    let status = EnumEntry::new("Status").with_cases(["ACTIVE", "RETIRED"]);

    let mut provider = InstantiatorProvider::new(DefaultDialect);
    provider.register_class(class).unwrap();
    provider.register_enum(status).unwrap();
    provider
}

fn employee() -> DataType {
    DataType::named("Employee")
}

fn present(value: Value) -> Value {
    Value::Optional(Some(Box::new(value)))
}

// =============================================================================
// Conversion resolution
// =============================================================================

#[test]
fn assignable_types_read_back_unchanged() {
    let provider = provider();
    let conv = provider
        .find_conversion_from_db(&DataType::STRING, &DataType::STRING)
        .unwrap();
    assert!(conv.is_identity());
    let out = conv.convert(Value::String("same".into())).unwrap();
    assert_eq!(out, Value::String("same".into()));
}

fn yes_no(v: Value) -> Result<Value, ConversionError> {
    match v {
        Value::String(s) => Ok(Value::Bool(s == "Y")),
        other => Err(ConversionError::TypeMismatch {
            expected: "string",
            actual: other.type_name(),
        }),
    }
}

#[test]
fn registered_conversion_is_used() {
    let mut provider = provider();
    let conversions = provider.conversions_mut();
    conversions.register_conversion_from_db(DataType::STRING, DataType::BOOL, yes_no);

    let conv = provider
        .get_conversion_from_db(&DataType::STRING, &DataType::BOOL)
        .unwrap();
    let yes = conv.convert(Value::String("Y".into())).unwrap();
    assert_eq!(yes, Value::Bool(true));
    let no = conv.convert(Value::String("N".into())).unwrap();
    assert_eq!(no, Value::Bool(false));
}

#[test]
fn sql_array_to_collections() {
    let provider = provider();
    let source = DataType::sql_array(DataType::INT);
    let row = || Value::SqlArray(vec![Value::Int(3), Value::Int(1), Value::Int(3), Value::Int(2)]);

    let set = provider
        .find_conversion_from_db(&source, &DataType::set(DataType::LONG))
        .unwrap();
    assert_eq!(
        set.convert(row()).unwrap(),
        Value::Set(vec![Value::Long(3), Value::Long(1), Value::Long(2)])
    );

    let list = provider
        .find_conversion_from_db(&source, &DataType::list(DataType::INT))
        .unwrap();
    assert_eq!(
        list.convert(row()).unwrap(),
        Value::List(vec![Value::Int(3), Value::Int(1), Value::Int(3), Value::Int(2)])
    );

    let array = provider
        .find_conversion_from_db(&source, &DataType::array(DataType::STRING))
        .unwrap();
    let Value::Array(items) = array.convert(row()).unwrap() else {
        panic!("expected native array");
    };
    assert_eq!(items.len(), 4);
    assert_eq!(items[0], Value::String("3".into()));
}

#[test]
fn sql_array_to_double_set_compares_bit_patterns() {
    let provider = provider();
    let source = DataType::sql_array(DataType::DOUBLE);
    let set = provider
        .find_conversion_from_db(&source, &DataType::set(DataType::DOUBLE))
        .unwrap();
    let row = Value::SqlArray(vec![
        Value::Double(f64::NAN),
        Value::Double(f64::NAN),
        Value::Double(0.0),
        Value::Double(-0.0),
    ]);

    let Value::Set(items) = set.convert(row).unwrap() else {
        panic!("expected set");
    };
    assert_eq!(items.len(), 3);
    assert!(matches!(items[0], Value::Double(d) if d.is_nan()));
    assert!(matches!(items[1], Value::Double(d) if d == 0.0 && d.is_sign_positive()));
    assert!(matches!(items[2], Value::Double(d) if d == 0.0 && d.is_sign_negative()));
}

#[test]
fn optional_targets() {
    let provider = provider();
    let optional = provider
        .find_conversion_from_db(&DataType::STRING, &DataType::optional(DataType::STRING))
        .unwrap();
    let empty = optional.convert(Value::Null).unwrap();
    assert_eq!(empty, Value::Optional(None));
    let out = optional.convert(Value::String("v".into())).unwrap();
    assert_eq!(out, present(Value::String("v".into())));

    let optional_double = provider
        .find_conversion_from_db(&DataType::INT, &DataType::OptionalDouble)
        .unwrap();
    let out = optional_double.convert(Value::Int(2)).unwrap();
    assert_eq!(out, present(Value::Double(2.0)));
    let empty = optional_double.convert(Value::Null).unwrap();
    assert_eq!(empty, Value::Optional(None));
}

#[test]
fn enum_by_name() {
    let provider = provider();
    let status = DataType::named("Status");
    let conv = provider
        .find_conversion_from_db(&DataType::STRING, &status)
        .unwrap();

    assert_eq!(
        conv.convert(Value::String("RETIRED".into())).unwrap(),
        Value::Enum(EnumValue::new(status.type_hash().unwrap(), "RETIRED", 1))
    );
    let err = conv.convert(Value::String("FIRED".into())).unwrap_err();
    assert!(err.to_string().contains("FIRED"));
    assert!(err.to_string().contains("Status"));
}

#[test]
fn enum_from_utf8_bytes() {
    let provider = provider();
    let status = DataType::named("Status");
    let conv = provider
        .find_conversion_from_db(&DataType::BYTES, &status)
        .unwrap();

    let out = conv.convert(Value::Bytes(b"ACTIVE".to_vec())).unwrap();
    let active = EnumValue::new(TypeHash::from_name("Status"), "ACTIVE", 0);
    assert_eq!(out, Value::Enum(active));
}

#[test]
fn missing_conversion_is_an_error() {
    let provider = provider();
    let err = provider
        .get_conversion_from_db(&DataType::BOOL, &employee())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "could not find a conversion from bool to Employee"
    );
}

// =============================================================================
// Constructor selection
// =============================================================================

#[test]
fn widest_fitting_constructor_wins() {
    let provider = provider();
    let columns = NamedTypeList::new()
        .with("id", DataType::LONG)
        .with("name", DataType::STRING)
        .with("salary", DataType::DOUBLE);

    let instantiator = provider.find_instantiator(&employee(), &columns).unwrap();
    assert_eq!(instantiator.constructor().map(|c| c.param_count()), Some(3));
    assert!(instantiator.property_accessors().is_empty());

    let row = vec![
        Value::Long(1),
        Value::String("Ada".into()),
        Value::Double(10.5),
    ];
    let e: Employee = instantiator.instantiate_object(row).unwrap();
    assert_eq!(e.via, "full");
    assert_eq!(e.salary, 10.5);
}

#[test]
fn leftover_columns_fall_back_to_setters() {
    let provider = provider();
    let columns = NamedTypeList::new()
        .with("id", DataType::INT)
        .with("name", DataType::STRING)
        .with("department", DataType::STRING);

    let instantiator = provider.find_instantiator(&employee(), &columns).unwrap();
    assert_eq!(instantiator.constructor().map(|c| c.param_count()), Some(1));
    assert_eq!(instantiator.property_accessors().len(), 2);

    let e: Employee = instantiator
        .instantiate_object(vec![Value::Int(2), Value::String("Alan".into()), Value::Null])
        .unwrap();
    assert_eq!(
        e,
        Employee {
            id: 2,
            name: "Alan".into(),
            department: None,
            salary: 0.0,
            via: "id",
        }
    );
}

#[test]
fn instantiator_is_reusable() {
    let provider = provider();
    let columns = NamedTypeList::new()
        .with("id", DataType::LONG)
        .with("department", DataType::STRING);
    let instantiator = provider.find_instantiator(&employee(), &columns).unwrap();

    let departments: Vec<Option<String>> = (0..3)
        .map(|i| {
            let row = vec![Value::Long(i), Value::String(format!("d{i}"))];
            let e: Employee = instantiator.instantiate_object(row).unwrap();
            e.department
        })
        .collect();
    assert_eq!(
        departments,
        vec![Some("d0".into()), Some("d1".into()), Some("d2".into())]
    );
}

#[test]
fn no_matching_constructor_lists_columns() {
    let provider = provider();
    let columns = NamedTypeList::new()
        .with("id", DataType::BOOL)
        .with("nickname", DataType::STRING);

    let err = provider
        .find_instantiator(&employee(), &columns)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "could not find a way to instantiate Employee with parameters [id: bool, nickname: string]"
    );
}

#[test]
fn designated_arity_mismatch() {
    struct Pair;

    let pair = vec![DataType::INT, DataType::INT];
    let class = ClassBuilder::<Pair>::new("Pair")
        .designated_constructor(pair, |_| Ok(Pair))
        .build();
    let mut provider = provider();
    provider.register_class(class).unwrap();

    let columns = NamedTypeList::new()
        .with("a", DataType::INT)
        .with("b", DataType::INT)
        .with("c", DataType::INT);
    let err = provider
        .find_instantiator(&DataType::named("Pair"), &columns)
        .unwrap_err();
    let expected = ResolutionError::ParameterCountMismatch {
        type_name: "Pair".into(),
        expected: 2,
        actual: 3,
    };
    assert_eq!(err, expected);
    assert!(err.to_string().contains("expected 2, got 3"));
}

#[test]
fn non_public_class_needs_designated_constructor() {
    struct Hidden;

    let class = ClassBuilder::<Hidden>::new("Hidden")
        .non_public()
        .constructor(vec![DataType::INT], |_| Ok(Hidden))
        .build();
    let mut provider = provider();
    provider.register_class(class).unwrap();

    let columns = NamedTypeList::new()
        .with("a", DataType::INT)
        .with("b", DataType::INT);
    let err = provider
        .find_instantiator(&DataType::named("Hidden"), &columns)
        .unwrap_err();
    assert_eq!(
        err,
        ResolutionError::NotPublic {
            type_name: "Hidden".into()
        }
    );
}

// =============================================================================
// Single-column shortcut
// =============================================================================

#[test]
fn single_column_bypasses_constructors() {
    let provider = provider();
    let columns = NamedTypeList::new().with("n", DataType::INT);

    let instantiator = provider
        .find_instantiator(&DataType::STRING, &columns)
        .unwrap();
    assert!(instantiator.is_single_column());
    let text: String = instantiator.instantiate_as(vec![Value::Int(42)]).unwrap();
    assert_eq!(text, "42");
}

#[test]
fn single_column_into_constructorless_class() {
    struct Token(String);

    fn to_token(v: Value) -> Result<Value, ConversionError> {
        match v {
            Value::String(s) => {
                let hash = TypeHash::from_name("Token");
                Ok(Value::Object(Object::new(hash, Token(s))))
            }
            other => Err(ConversionError::TypeMismatch {
                expected: "string",
                actual: other.type_name(),
            }),
        }
    }

    let mut provider = provider();
    let class = ClassBuilder::<Token>::new("Token").build();
    provider.register_class(class).unwrap();
    let token = DataType::named("Token");
    let conversions = provider.conversions_mut();
    conversions.register_conversion_from_db(DataType::STRING, token.clone(), to_token);

    let columns = NamedTypeList::new().with("token", DataType::STRING);
    let instantiator = provider.find_instantiator(&token, &columns).unwrap();
    let t: Token = instantiator
        .instantiate_object(vec![Value::String("abc".into())])
        .unwrap();
    assert_eq!(t.0, "abc");
}

// =============================================================================
// Row application errors
// =============================================================================

#[test]
fn constructor_and_row_length_failures() {
    let provider = provider();
    let columns = NamedTypeList::new()
        .with("id", DataType::LONG)
        .with("name", DataType::STRING)
        .with("salary", DataType::DOUBLE);
    let instantiator = provider.find_instantiator(&employee(), &columns).unwrap();

    let err = instantiator
        .instantiate(vec![Value::Long(1), Value::Int(5), Value::Double(1.0)])
        .unwrap_err();
    match err {
        InstantiationError::Construct { type_name, .. } => assert_eq!(type_name, "Employee"),
        other => panic!("unexpected error: {other:?}"),
    }

    let err = instantiator
        .instantiate(vec![Value::Long(1), Value::String("x".into())])
        .unwrap_err();
    let expected = InstantiationError::RowLength {
        expected: 3,
        actual: 2,
    };
    assert_eq!(err, expected);
}

#[test]
fn narrowing_overflow_names_value() {
    struct Small(i32);

    let class = ClassBuilder::<Small>::new("Small")
        .constructor(vec![DataType::INT], |args| Ok(Small(args.next()?)))
        .build();
    let mut provider = provider();
    provider.register_class(class).unwrap();
    let columns = NamedTypeList::new().with("v", DataType::LONG);
    let instantiator = provider
        .find_instantiator(&DataType::named("Small"), &columns)
        .unwrap();

    let small: Small = instantiator
        .instantiate_object(vec![Value::Long(7)])
        .unwrap();
    assert_eq!(small.0, 7);

    let err = instantiator
        .instantiate(vec![Value::Long(1 << 40)])
        .unwrap_err();
    assert_eq!(
        err,
        InstantiationError::Conversion {
            index: 0,
            column: "v".into(),
            source: ConversionError::IntegerOverflow {
                value: 1 << 40,
                target_type: "int"
            },
        }
    );
}

// =============================================================================
// Outbound values
// =============================================================================

#[test]
fn enum_values_go_out_by_name() {
    let provider = provider();
    let status = DataType::named("Status").type_hash().unwrap();
    let active = Value::Enum(EnumValue::new(status, "ACTIVE", 0));
    let out = provider.value_to_database(active).unwrap();
    assert_eq!(out, Value::String("ACTIVE".into()));
    let null = provider.value_to_database(Value::Null).unwrap();
    assert_eq!(null, Value::Null);
}

#[test]
fn instantiators_are_shared_across_threads() {
    let provider = provider();
    let columns = NamedTypeList::new().with("id", DataType::LONG);
    let instantiator = provider.find_instantiator(&employee(), &columns).unwrap();

    std::thread::scope(|scope| {
        for i in 0..4i64 {
            let instantiator = &instantiator;
            scope.spawn(move || {
                let row = vec![Value::Long(i)];
                let e: Employee = instantiator.instantiate_object(row).unwrap();
                assert_eq!(e.id, i);
            });
        }
    });
}

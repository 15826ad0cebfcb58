//! Performance benchmarks for instantiator resolution and row application.
//!
//! Resolution is meant to happen once per query shape and application once
//! per row, so the two are measured separately:
//! - Resolution: widest constructor, property fallback, single column
//! - Application: constructor only, constructor plus setters and an array column
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use rowbind::{ClassBuilder, DataType, DefaultDialect, InstantiatorProvider, NamedTypeList, Value};

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

#[allow(dead_code)]
#[derive(Default)]
struct Order {
    id: i64,
    customer: String,
    total: f64,
    note: Option<String>,
    tags: Vec<String>,
}

fn set_customer(o: &mut Order, v: String) {
    o.customer = v;
}

fn set_note(o: &mut Order, v: Option<String>) {
    o.note = v;
}

fn set_tags(o: &mut Order, v: Vec<String>) {
    o.tags = v;
}

fn set_total(o: &mut Order, v: f64) {
    o.total = v;
}

fn provider() -> InstantiatorProvider {
    let full = vec![DataType::LONG, DataType::STRING, DataType::DOUBLE];
    let class = ClassBuilder::<Order>::new("Order")
        .constructor(vec![DataType::LONG], |args| {
            Ok(Order {
                id: args.next()?,
                ..Default::default()
            })
        })
        .constructor(full, |args| {
            Ok(Order {
                id: args.next()?,
                customer: args.next()?,
                total: args.next()?,
                ..Default::default()
            })
        })
        .setter("customer", DataType::STRING, set_customer)
        .setter("note", DataType::optional(DataType::STRING), set_note)
        .setter("tags", DataType::list(DataType::STRING), set_tags)
        .field("total", DataType::DOUBLE, set_total)
        .build();

    let mut provider = InstantiatorProvider::new(DefaultDialect);
    provider.register_class(class).expect("register Order");
    provider
}

fn full_columns() -> NamedTypeList {
    NamedTypeList::new()
        .with("id", DataType::INT)
        .with("customer", DataType::STRING)
        .with("total", DataType::FLOAT)
}

fn fallback_columns() -> NamedTypeList {
    NamedTypeList::new()
        .with("id", DataType::LONG)
        .with("customer", DataType::STRING)
        .with("note", DataType::STRING)
        .with("tags", DataType::sql_array(DataType::STRING))
}

fn bench_resolution(c: &mut Criterion) {
    setup_profiler();
    let provider = provider();
    let order = DataType::named("Order");
    let full = full_columns();
    let fallback = fallback_columns();
    let single = NamedTypeList::new().with("n", DataType::LONG);

    let mut group = c.benchmark_group("resolution");
    group.bench_function("widest_constructor", |b| {
        b.iter(|| {
            let instantiator = provider.find_instantiator(black_box(&order), black_box(&full));
            end_profiling_frame();
            instantiator
        })
    });
    group.bench_function("property_fallback", |b| {
        b.iter(|| provider.find_instantiator(black_box(&order), black_box(&fallback)))
    });
    group.bench_function("single_column", |b| {
        b.iter(|| provider.find_instantiator(black_box(&DataType::STRING), black_box(&single)))
    });
    group.finish();
}

fn bench_application(c: &mut Criterion) {
    let provider = provider();
    let order = DataType::named("Order");
    let full = provider
        .find_instantiator(&order, &full_columns())
        .expect("resolve full");
    let fallback = provider
        .find_instantiator(&order, &fallback_columns())
        .expect("resolve fallback");

    let mut group = c.benchmark_group("application");
    group.throughput(Throughput::Elements(1));
    group.bench_function("constructor_only", |b| {
        b.iter(|| {
            full.instantiate(black_box(vec![
                Value::Int(1),
                Value::String("acme".into()),
                Value::Float(9.5),
            ]))
        })
    });
    group.bench_function("constructor_and_setters", |b| {
        b.iter(|| {
            fallback.instantiate(black_box(vec![
                Value::Long(1),
                Value::String("acme".into()),
                Value::Null,
                Value::SqlArray(vec![Value::String("a".into()), Value::String("b".into())]),
            ]))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_resolution, bench_application);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ferrous_autowire::*;
use std::sync::Arc;

#[derive(Default)]
struct Leaf;

struct Branch {
    left: Arc<Leaf>,
    right: Arc<Leaf>,
}

struct Root {
    branch: Arc<Branch>,
    label: String,
}

fn types() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    types
        .register(Class::plain::<Leaf>())
        .register(
            Class::new(|args| Ok(Branch { left: args.get("left")?, right: args.get("right")? }))
                .param(Parameter::typed::<Leaf>("left"))
                .param(Parameter::typed::<Leaf>("right")),
        )
        .register(
            Class::new(|args| Ok(Root { branch: args.get("branch")?, label: args.cloned("label")? }))
                .param(Parameter::typed::<Branch>("branch"))
                .param(Parameter::builtin::<String>("label").with_default(String::from("root"))),
        );
    types
}

// ===== Micro Benchmarks =====

fn bench_singleton_hit(c: &mut Criterion) {
    let container = Container::default();
    container.set_instance(42u64);

    // Prime the singleton
    let _ = container.resolve::<u64>().unwrap();

    c.bench_function("singleton_hit_u64", |b| {
        b.iter(|| {
            let v = container.resolve::<u64>().unwrap();
            black_box(v);
        })
    });
}

fn bench_singleton_cold(c: &mut Criterion) {
    struct ExpensiveToCreate {
        data: Vec<u64>,
    }

    c.bench_function("singleton_cold_expensive", |b| {
        b.iter_batched(
            || {
                let container = Container::default();
                container.singleton_of::<ExpensiveToCreate>(Callable::new(|_| {
                    Ok(ExpensiveToCreate { data: (0..1000).collect() })
                }));
                container
            },
            |container| {
                let v = container.resolve::<ExpensiveToCreate>().unwrap();
                black_box(v.data.len());
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_autowire_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("autowire_graph");

    let container = Container::new(types());
    group.bench_function("unbound", |b| {
        b.iter(|| black_box(container.resolve::<Root>().unwrap().label.len()))
    });

    let shared = Container::new(types());
    shared.singleton_of::<Leaf>(Callable::new(|_| Ok(Leaf)));
    group.bench_function("shared_leaf", |b| {
        b.iter(|| {
            let root = shared.resolve::<Root>().unwrap();
            black_box(Arc::ptr_eq(&root.branch.left, &root.branch.right))
        })
    });

    group.finish();
}

fn bench_overrides(c: &mut Criterion) {
    let container = Container::new(types());
    let leaf = Arc::new(Leaf);

    c.bench_function("assemble_with_override", |b| {
        b.iter(|| {
            let overrides = Overrides::new().with("left", Override::shared(leaf.clone()));
            black_box(container.assemble_as::<Branch>(overrides).unwrap())
        })
    });
}

fn bench_parent_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("parent_chain");

    for depth in [1usize, 4, 16] {
        let root = Container::new(types());
        root.set_instance(7u32);
        let mut leaf = root.clone();
        for _ in 0..depth {
            leaf = Container::with_parent(&leaf);
        }

        group.bench_with_input(BenchmarkId::from_parameter(depth), &leaf, |b, container| {
            b.iter(|| black_box(container.resolve::<u32>().unwrap()))
        });
    }

    group.finish();
}

// ===== Macro Benchmarks =====

fn bench_large_registry(c: &mut Criterion) {
    let container = Container::new(types());
    for i in 0..1000u32 {
        container.set(format!("value.{}", i), Service::instance(i));
    }

    c.bench_function("large_registry_lookup", |b| {
        b.iter(|| black_box(container.get(&Key::from("value.500")).unwrap()))
    });
}

criterion_group!(
    micro_benches,
    bench_singleton_hit,
    bench_singleton_cold,
    bench_autowire_graph,
    bench_overrides
);

criterion_group!(macro_benches, bench_parent_chain, bench_large_registry);

criterion_main!(micro_benches, macro_benches);

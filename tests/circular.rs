use ferrous_autowire::{
    key_of, Callable, Class, Container, ContainerConfig, DiError, Overrides, Parameter, Resolver, TypeRegistry,
};
use std::sync::Arc;

#[allow(dead_code)]
struct Ping {
    pong: Arc<Pong>,
}

#[allow(dead_code)]
struct Pong {
    ping: Arc<Ping>,
}

#[allow(dead_code)]
struct Narcissus {
    me: Arc<Narcissus>,
}

#[derive(Default)]
struct Leaf;

struct Node {
    next: Option<Arc<Node>>,
}

#[allow(dead_code)]
struct Diamond {
    left: Arc<Leaf>,
    right: Arc<Leaf>,
}

fn types() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    types
        .register(
            Class::new(|args| Ok(Ping { pong: args.get::<Pong>("pong")? })).param(Parameter::typed::<Pong>("pong")),
        )
        .register(
            Class::new(|args| Ok(Pong { ping: args.get::<Ping>("ping")? })).param(Parameter::typed::<Ping>("ping")),
        )
        .register(
            Class::new(|args| Ok(Narcissus { me: args.get::<Narcissus>("me")? }))
                .param(Parameter::typed::<Narcissus>("me")),
        )
        .register(Class::plain::<Leaf>())
        .register(
            Class::new(|args| Ok(Node { next: Some(args.get::<Node>("next")?) }))
                .param(Parameter::typed::<Node>("next").with_default(Node { next: None })),
        )
        .register(
            Class::new(|args| Ok(Diamond { left: args.get::<Leaf>("left")?, right: args.get::<Leaf>("right")? }))
                .param(Parameter::typed::<Leaf>("left"))
                .param(Parameter::typed::<Leaf>("right")),
        );
    types
}

fn circular_path(err: &DiError) -> Vec<String> {
    match err.root_cause() {
        DiError::Circular(path) => path.clone(),
        other => panic!("expected circular dependency, got {:?}", other),
    }
}

#[test]
fn test_two_class_cycle() {
    let container = Container::new(types());
    let err = container.resolve::<Ping>().err().unwrap();

    assert!(err.is_circular());
    let path = circular_path(&err);
    assert_eq!(path.len(), 3);
    assert_eq!(path.first(), path.last());
    assert!(path[0].ends_with("Ping"));
    assert!(path[1].ends_with("Pong"));
}

#[test]
fn test_self_dependency() {
    let container = Container::new(types());
    let err = container.resolve::<Narcissus>().err().unwrap();
    assert_eq!(circular_path(&err).len(), 2);
}

#[test]
fn test_cycle_through_factory() {
    let container = Container::new(types());
    container.factory(
        "loop",
        Callable::erased(|args| Ok(args.raw("again")?.clone())).param(Parameter::named("again", "loop")),
    );

    let err = container.get(&"loop".into()).err().unwrap();
    assert_eq!(circular_path(&err), vec!["loop".to_string(), "loop".to_string()]);
}

#[test]
fn test_repeated_dependency_is_not_a_cycle() {
    let container = Container::new(types());
    let diamond = container.resolve::<Diamond>().unwrap();
    assert!(!Arc::ptr_eq(&diamond.left, &diamond.right));
}

#[test]
fn test_container_recovers_after_cycle() {
    let container = Container::new(types());
    assert!(container.resolve::<Ping>().is_err());
    assert!(container.resolve::<Diamond>().is_ok());
}

#[test]
fn test_depth_limit_without_cycle_detection() {
    let config = ContainerConfig { max_depth: 32, detect_cycles: false };
    let container = Container::builder(types()).config(config).build();

    let err = container.resolve::<Narcissus>().err().unwrap();
    assert!(matches!(err.root_cause(), DiError::DepthExceeded(32)));
}

#[test]
fn test_assemble_participates_in_detection() {
    let container = Container::new(types());
    let err = container
        .assemble(&key_of::<Narcissus>(), Default::default())
        .err()
        .unwrap();
    assert!(err.is_circular());
}

#[test]
fn test_default_depth_limit_without_cycle_detection() {
    let config = ContainerConfig { detect_cycles: false, ..Default::default() };
    let container = Container::builder(types()).config(config).build();

    let err = container.resolve::<Narcissus>().err().unwrap();
    assert!(matches!(
        err.root_cause(),
        DiError::DepthExceeded(depth) if *depth == ContainerConfig::default().max_depth
    ));
}

#[test]
fn test_assemble_override_resolving_same_class_is_not_a_cycle() {
    let container = Container::new(types());
    let overrides = Overrides::new().with("next", container.lazy(key_of::<Node>()));

    let node = container.assemble_as::<Node>(overrides).unwrap();
    let inner = node.next.as_ref().unwrap();
    let terminal = inner.next.as_ref().unwrap();
    assert!(terminal.next.is_none());
    assert!(container.resolve::<Node>().is_ok());
}

//! Default values and partial overrides.
//!
//! Parameters with a default are never autowired unless an override names
//! them; `with` and `needs` seed overrides on a registered partial.

mod common;

use common::*;
use ferrous_autowire::{key_of, Callable, Container, DiError, Override, Parameter, Resolver};
use std::sync::Arc;

#[test]
fn test_builtin_default_before_class_parameter() {
    let container = Container::new(types());
    let g = container.resolve::<G>().unwrap();
    assert_eq!(g.t, "hello");
    assert_eq!(g.a.value(), "");
}

#[test]
fn test_builtin_default_through_class_binding() {
    let container = Container::new(types());
    container.bind::<G, G>();

    let g = container.resolve::<G>().unwrap();
    assert_eq!(g.t, "hello");
}

#[test]
fn test_untyped_default() {
    let container = Container::new(types());
    let h = container.resolve::<H>().unwrap();
    assert_eq!(h.t, "hello");
}

#[test]
fn test_injecting_defaults() {
    let container = Container::new(types());
    container
        .service(key_of::<H>())
        .unwrap()
        .with("t", Override::value(String::from("test")));

    let h = container.resolve::<H>().unwrap();
    assert_eq!(h.t, "test");
}

#[test]
fn test_injecting_defaults_by_type() {
    let a = Arc::new(A::with("hello"));

    let container = Container::new(types());
    container
        .service(key_of::<B>())
        .unwrap()
        .needs(&key_of::<A>(), Override::shared(a.clone()))
        .unwrap();

    let b = container.resolve::<B>().unwrap();
    let c = container.resolve::<C>().unwrap();

    assert_eq!(b.a.value(), "hello");
    // Every B sees the override, including the one nested in C
    assert_eq!(c.b.a.value(), "hello");
    assert!(Arc::ptr_eq(&c.b.a, &a));
    // C's own A is unaffected
    assert_eq!(c.a.value(), "");
}

#[test]
fn test_needs_without_matching_parameter() {
    let container = Container::new(types());
    let err = container
        .service(key_of::<B>())
        .unwrap()
        .needs(&key_of::<C>(), Override::value(A::default()))
        .err()
        .unwrap();

    assert!(matches!(err, DiError::NotFound(ref msg) if msg.contains("does not depend on")));
}

#[test]
fn test_needs_with_unknown_type_sets_by_name() {
    let container = Container::new(types());
    let partial = container.service(key_of::<F>()).unwrap();
    partial.needs(&"hello".into(), Override::value(String::from("by name"))).unwrap();

    assert!(partial.overrides().contains("hello"));
    assert_eq!(container.resolve::<F>().unwrap().a.value(), "by name");
}

#[test]
fn test_override_beats_default() {
    let container = Container::new(types());
    container
        .service(key_of::<G>())
        .unwrap()
        .with("t", Override::value(String::from("override")));

    assert_eq!(container.resolve::<G>().unwrap().t, "override");
}

#[test]
fn test_default_class_value_skips_container() {
    let fallback = Arc::new(A::with("default"));
    let container = Container::new(types());
    container.set_instance(A::with("bound"));

    let callable = Callable::new(|args| Ok(args.get::<A>("a")?.value()))
        .param(Parameter::typed::<A>("a").with_default_shared(fallback));

    let out = ferrous_autowire::downcast::<String>(container.call(&callable).unwrap()).unwrap();
    assert_eq!(*out, "default");
}

#[test]
fn test_builtin_without_default_is_unresolved() {
    let container = Container::new(types());
    let err = container.resolve::<F>().err().unwrap();

    assert!(err.is_unresolved());
    match err {
        DiError::Dependency { parameter, .. } => assert_eq!(parameter, "hello"),
        other => panic!("expected dependency error, got {:?}", other),
    }
}

#[test]
fn test_untyped_without_default_is_unresolved() {
    let container = Container::new(types());
    let callable = Callable::new(|_| Ok(())).param(Parameter::untyped("anything"));
    assert!(container.call(&callable).err().unwrap().is_unresolved());
}

#[test]
fn test_anonymous_type_is_unresolved() {
    let container = Container::new(types());
    let callable = Callable::new(|_| Ok(())).param(Parameter::anonymous("either", "A|B"));
    let err = container.call(&callable).err().unwrap();
    assert!(err.is_unresolved());
    assert!(err.to_string().contains("A|B"));
}

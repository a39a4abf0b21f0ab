//! Shared fixture classes for the integration tests.

#![allow(dead_code)]

use ferrous_autowire::{Class, Interface, Method, Parameter, TypeRegistry};
use std::sync::{Arc, Mutex};

/// Leaf class with a mutable value, so tests can tell instances apart.
#[derive(Debug, Default)]
pub struct A {
    pub a: Mutex<String>,
}

impl A {
    pub fn with(value: &str) -> Self {
        Self { a: Mutex::new(value.to_string()) }
    }

    pub fn value(&self) -> String {
        self.a.lock().unwrap().clone()
    }
}

pub struct B {
    pub a: Arc<A>,
}

impl B {
    /// Compares `self.a.a + s` with `other.a`.
    pub fn method(&self, other: &A, s: &str) -> bool {
        format!("{}{}", self.a.value(), s) == other.value()
    }
}

pub struct C {
    pub a: Arc<A>,
    pub b: Arc<B>,
}

/// Depends on a class that does not exist.
pub struct E;

/// Writes its `hello` argument into the injected `A`.
pub struct F {
    pub a: Arc<A>,
}

/// Built-in parameter with a default, followed by a class parameter.
pub struct G {
    pub t: String,
    pub a: Arc<A>,
}

/// Untyped parameter with a default, followed by a class parameter.
pub struct H {
    pub t: String,
}

pub trait Greeter: Send + Sync {
    fn greet(&self, name: &str) -> String;
}

#[derive(Default)]
pub struct English;

impl Greeter for English {
    fn greet(&self, name: &str) -> String {
        format!("Hello {}", name)
    }
}

#[derive(Default)]
pub struct Spanish;

impl Greeter for Spanish {
    fn greet(&self, name: &str) -> String {
        format!("Hola {}", name)
    }
}

/// Interface without a default implementation.
pub trait Storage: Send + Sync {
    fn name(&self) -> &'static str;
}

#[derive(Default)]
pub struct Memory;

impl Storage for Memory {
    fn name(&self) -> &'static str {
        "memory"
    }
}

pub struct Welcome {
    pub greeter: Arc<dyn Greeter>,
}

pub struct Archive {
    pub storage: Arc<dyn Storage>,
}

pub fn types() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    types
        .register(Class::plain::<A>())
        .register(
            Class::new(|args| Ok(B { a: args.get::<A>("a")? }))
                .param(Parameter::typed::<A>("a"))
                .method(
                    Method::new("method", |this: &B, args| {
                        let other = args.get::<A>("a")?;
                        Ok(this.method(&other, &args.cloned::<String>("str")?))
                    })
                    .param(Parameter::typed::<A>("a"))
                    .param(Parameter::builtin::<String>("str")),
                ),
        )
        .register(
            Class::new(|args| Ok(C { a: args.get::<A>("a")?, b: args.get::<B>("b")? }))
                .param(Parameter::typed::<A>("a"))
                .param(Parameter::typed::<B>("b")),
        )
        .register(Class::new(|_| Ok(E)).param(Parameter::named("d", "D")))
        .register(
            Class::new(|args| {
                let a = args.get::<A>("a")?;
                *a.a.lock().unwrap() = args.cloned::<String>("hello")?;
                Ok(F { a })
            })
            .param(Parameter::typed::<A>("a"))
            .param(Parameter::builtin::<String>("hello")),
        )
        .register(
            Class::new(|args| Ok(G { t: args.cloned::<String>("t")?, a: args.get::<A>("a")? }))
                .param(Parameter::builtin::<String>("t").with_default(String::from("hello")))
                .param(Parameter::typed::<A>("a")),
        )
        .register(
            Class::new(|args| Ok(H { t: args.cloned::<String>("t")? }))
                .param(Parameter::untyped("t").with_default(String::from("hello")))
                .param(Parameter::typed::<A>("a")),
        )
        .register(Class::plain::<English>())
        .register(Class::plain::<Spanish>())
        .register(Class::plain::<Memory>())
        .register(
            Class::new(|args| Ok(Welcome { greeter: args.interface::<dyn Greeter>("greeter")? }))
                .param(Parameter::typed::<dyn Greeter>("greeter")),
        )
        .register(
            Class::new(|args| Ok(Archive { storage: args.interface::<dyn Storage>("storage")? }))
                .param(Parameter::typed::<dyn Storage>("storage")),
        )
        .register_interface(
            Interface::<dyn Greeter>::new()
                .default_implementation(|c: Arc<English>| c as Arc<dyn Greeter>)
                .implemented_by(|c: Arc<Spanish>| c as Arc<dyn Greeter>),
        )
        .register_interface(Interface::<dyn Storage>::new().implemented_by(|c: Arc<Memory>| c as Arc<dyn Storage>));
    types
}

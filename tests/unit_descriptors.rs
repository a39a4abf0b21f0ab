/// Unit tests for BindingDescriptor and Container::descriptors

use ferrous_autowire::{key_of, BindingDescriptor, BindingKind, Callable, Container, Key, Service};

#[test]
fn test_descriptor_accessors() {
    let descriptor = BindingDescriptor::new(Key::from("app.port"), BindingKind::Singleton);
    assert_eq!(descriptor.name(), "app.port");
    assert!(descriptor.is_shared());

    let descriptor = BindingDescriptor::new(Key::from("app.now"), BindingKind::Factory);
    assert!(!descriptor.is_shared());
}

#[test]
fn test_new_container_only_describes_itself() {
    let container = Container::default();
    assert_eq!(
        container.descriptors(),
        vec![BindingDescriptor::new(key_of::<Container>(), BindingKind::Container)]
    );
}

#[test]
fn test_descriptor_kinds() {
    let container = Container::default();
    container
        .set("instance", Service::instance(1u8))
        .set("class", Service::class("app::Thing"))
        .factory("factory", Callable::new(|_| Ok(1u8)))
        .singleton("singleton", Callable::new(|_| Ok(1u8)))
        .set("reference", container.reference("instance"));

    let kinds: Vec<(String, BindingKind)> = container
        .descriptors()
        .into_iter()
        .filter(|d| d.kind != BindingKind::Container)
        .map(|d| (d.name().to_string(), d.kind))
        .collect();

    assert_eq!(
        kinds,
        vec![
            ("class".to_string(), BindingKind::Partial),
            ("factory".to_string(), BindingKind::Factory),
            ("instance".to_string(), BindingKind::Singleton),
            ("reference".to_string(), BindingKind::Reference),
            ("singleton".to_string(), BindingKind::Singleton),
        ]
    );
}

#[test]
fn test_descriptors_exclude_parent_bindings() {
    let parent = Container::default();
    parent.set("parent.only", Service::instance(1u8));
    let child = Container::with_parent(&parent);

    assert!(child.descriptors().iter().all(|d| d.name() != "parent.only"));
}

#[cfg(feature = "diagnostics")]
#[test]
fn test_debug_string_lists_bindings() {
    let container = Container::default();
    container.set("port", Service::instance(80u16));
    let debug = container.to_debug_string();
    assert!(debug.contains("port: Singleton"));
}

use apphost_kernel::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

#[derive(Debug)]
struct English;

impl Greeter for English {
    fn greet(&self) -> String {
        "hello".to_owned()
    }
}

#[derive(Debug)]
struct Ping;
#[derive(Debug)]
struct Pong;

#[test]
fn trait_objects_are_valid_keys() {
    let mut builder = Container::builder();
    let greeter: Arc<dyn Greeter> = Arc::new(English);
    builder.instance::<dyn Greeter>(greeter);
    let container = builder.build().unwrap();

    assert_eq!(container.resolve::<dyn Greeter>().unwrap().greet(), "hello");
    assert!(container.is_registered::<dyn Greeter>());
    assert!(!container.is_registered::<English>());
}

#[test]
fn singleton_is_built_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut builder = Container::builder();
    builder.singleton::<String, _>(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new("shared".to_owned()))
    });
    let container = builder.build().unwrap();

    let first = container.resolve::<String>().unwrap();
    let second = container.resolve::<String>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(container.lifetime_of::<String>(), Some(Lifetime::Singleton));
}

#[test]
fn transient_is_built_every_time() {
    let mut builder = Container::builder();
    builder.transient::<Vec<u8>, _>(|_| Ok(Arc::new(vec![1, 2, 3])));
    let container = builder.build().unwrap();

    let first = container.resolve::<Vec<u8>>().unwrap();
    let second = container.resolve::<Vec<u8>>().unwrap();

    assert_eq!(first, second);
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn factories_resolve_dependencies_regardless_of_registration_order() {
    let mut builder = Container::builder();
    builder.singleton::<usize, _>(|resolver| Ok(Arc::new(resolver.resolve::<String>()?.len())));
    builder.instance::<String>(Arc::new("four".to_owned()));
    let container = builder.build().unwrap();

    assert_eq!(*container.resolve::<usize>().unwrap(), 4);
}

#[test]
fn unregistered_service_is_an_error() {
    let container = Container::builder().build().unwrap();

    let err = container.resolve::<String>().unwrap_err();
    assert!(matches!(err, ContainerError::Unregistered { .. }));
    assert!(err.to_string().contains("String"));
}

#[test]
fn missing_dependency_names_the_requester() {
    let mut builder = Container::builder();
    builder.singleton::<usize, _>(|resolver| Ok(Arc::new(resolver.resolve::<String>()?.len())));
    let container = builder.build().unwrap();

    let err = container.resolve::<usize>().unwrap_err();
    assert!(matches!(err, ContainerError::Unregistered { .. }));
    assert!(err.to_string().contains("required by usize"));
}

#[test]
fn duplicate_registration_fails_the_build() {
    let mut builder = Container::builder();
    builder.instance::<String>(Arc::new("a".to_owned()));
    builder.singleton::<String, _>(|_| Ok(Arc::new("b".to_owned())));

    let err = builder.build().unwrap_err();
    assert!(matches!(err, ContainerError::DuplicateRegistration { .. }));
}

#[test]
fn circular_dependency_is_detected() {
    let mut builder = Container::builder();
    builder.singleton::<Ping, _>(|resolver| {
        resolver.resolve::<Pong>()?;
        Ok(Arc::new(Ping))
    });
    builder.singleton::<Pong, _>(|resolver| {
        resolver.resolve::<Ping>()?;
        Ok(Arc::new(Pong))
    });
    let container = builder.build().unwrap();

    let err = container.resolve::<Ping>().unwrap_err();
    assert!(matches!(err, ContainerError::CircularDependency { .. }));
    assert!(err.to_string().contains("Ping -> "));
}

#[test]
fn failed_singletons_are_retried() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut builder = Container::builder();
    builder.singleton::<String, _>(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(ContainerError::activation("not ready"));
        }
        Ok(Arc::new("ready".to_owned()))
    });
    let container = builder.build().unwrap();

    let err = container.resolve::<String>().unwrap_err();
    assert!(matches!(err, ContainerError::Activation { .. }));
    assert_eq!(*container.resolve::<String>().unwrap(), "ready");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn concurrent_resolutions_share_one_singleton() {
    let mut builder = Container::builder();
    builder.singleton::<String, _>(|_| Ok(Arc::new("shared".to_owned())));
    let container = builder.build().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let container = container.clone();
            thread::spawn(move || container.resolve::<String>().unwrap())
        })
        .collect();
    let resolved: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();

    assert!(resolved.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[test]
fn services_lists_every_registration() {
    let mut builder = Container::builder();
    builder.instance::<String>(Arc::new(String::new()));
    builder.transient::<usize, _>(|_| Ok(Arc::new(0)));
    let container = builder.build().unwrap();

    let mut names: Vec<_> = container.services().map(|key| key.name()).collect();
    names.sort_unstable();
    assert_eq!(names, ["alloc::string::String", "usize"]);
    assert_eq!(container.len(), 2);
}

use fibre_inject::{resolve, Container, Injectable, Lifetime, ResolveError, ServiceDescriptor};
use std::sync::Arc;

// --- Test Fixtures ---

// The trait must be Send + Sync for the container to accept it.
trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

struct EnglishGreeter;
impl Greeter for EnglishGreeter {
  fn greet(&self) -> String {
    "Hello!".to_string()
  }
}
impl Injectable for EnglishGreeter {
  type Dependencies = ();
  fn construct(_: ()) -> Self {
    EnglishGreeter
  }
}

// A simple struct for testing.
#[derive(Debug, PartialEq, Eq)]
struct SimpleService {
  id: u32,
}
impl Injectable for SimpleService {
  type Dependencies = ();
  fn construct(_: ()) -> Self {
    SimpleService { id: 101 }
  }
}

// --- Basic Tests ---

#[test]
fn test_singleton_resolves_to_the_same_instance() {
  // Arrange
  let mut container = Container::new();
  container.register(ServiceDescriptor::of::<SimpleService>().singleton());

  // Act
  let r1 = container.resolve::<SimpleService>().unwrap();
  let r2 = container.resolve::<SimpleService>().unwrap();

  // Assert
  assert_eq!(r1.id, 101);
  // Ensure it's a singleton by checking pointer equality.
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_transient_resolves_to_distinct_instances() {
  // Arrange
  let mut container = Container::new();
  container.register(ServiceDescriptor::of::<SimpleService>());

  // Act
  let r1 = container.resolve::<SimpleService>().unwrap();
  let r2 = container.resolve::<SimpleService>().unwrap();

  // Assert
  assert_eq!(*r1, *r2);
  // Ensure it's a transient by checking the pointers are different.
  assert!(!Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_lifetime_defaults_to_transient() {
  let mut container = Container::new();
  container.register(ServiceDescriptor::of::<SimpleService>());

  assert_eq!(container.lifetime_of::<SimpleService>(), Some(Lifetime::Transient));
  assert_eq!(container.lifetime_of::<EnglishGreeter>(), None);
}

#[test]
fn test_trait_resolution() {
  // Arrange
  let mut container = Container::new();
  container.register(
    ServiceDescriptor::bind::<dyn Greeter, EnglishGreeter>(|svc| svc as Arc<dyn Greeter>).singleton(),
  );

  // Act
  let greeter = container.resolve::<dyn Greeter>().unwrap();

  // Assert
  assert_eq!(greeter.greet(), "Hello!");
  assert!(container.contains::<dyn Greeter>());
  // Bound to the trait only; the implementation's own identity stays unregistered.
  assert!(!container.contains::<EnglishGreeter>());
}

#[test]
fn test_registered_instance_is_shared() {
  let mut container = Container::new();
  let shared = Arc::new(String::from("shared config data"));
  container.register(ServiceDescriptor::instance(shared.clone()));

  let resolved = container.resolve::<String>().unwrap();

  assert!(Arc::ptr_eq(&shared, &resolved));
  assert_eq!(container.lifetime_of::<String>(), Some(Lifetime::Singleton));
}

#[test]
fn test_unregistered_contract_is_an_error() {
  struct MissingService;
  let container = Container::new();

  let result = container.resolve::<MissingService>();

  assert_eq!(
    result.err(),
    Some(ResolveError::NotRegistered {
      contract: std::any::type_name::<MissingService>(),
    })
  );
}

#[test]
fn test_macro_resolves_concrete_and_trait_services() {
  let mut container = Container::new();
  container.register_discovered([
    ServiceDescriptor::of::<SimpleService>(),
    ServiceDescriptor::bind::<dyn Greeter, EnglishGreeter>(|svc| svc as Arc<dyn Greeter>),
  ]);

  let service = resolve!(container, SimpleService);
  let greeter = resolve!(container, trait Greeter);

  assert_eq!(service.id, 101);
  assert_eq!(greeter.greet(), "Hello!");
}

#[test]
#[should_panic(expected = "Failed to resolve required service")]
fn test_resolve_panics_on_missing_concrete_service() {
  struct MissingService;
  let container = Container::new();
  resolve!(container, MissingService);
}

#[test]
#[should_panic(expected = "Failed to resolve required trait service")]
fn test_resolve_panics_on_missing_trait_service() {
  // The test trait must also be Send + Sync to be a valid contract.
  trait MissingTrait: Send + Sync {}
  let container = Container::new();
  resolve!(container, trait MissingTrait);
}

#[test]
fn test_introspection() {
  let mut container = Container::new();
  assert!(container.is_empty());

  container.register(ServiceDescriptor::of::<SimpleService>());
  container.register(ServiceDescriptor::of::<EnglishGreeter>().singleton());

  assert_eq!(container.len(), 2);
  let mut expected = vec![
    std::any::type_name::<SimpleService>(),
    std::any::type_name::<EnglishGreeter>(),
  ];
  expected.sort_unstable();
  assert_eq!(container.contracts(), expected);
}

//! Public macros for ergonomic service resolution.

/// Resolves a service from a container, panicking on failure.
///
/// Meant for bootstrap code where a missing or broken registration aborts
/// start-up anyway. Use `Container::resolve` to handle the error instead.
///
/// # Panics
///
/// Panics with the `ResolveError` message if the service cannot be resolved.
///
/// # Examples
///
/// ```
/// use fibre_inject::{resolve, Container, Injectable, ServiceDescriptor};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///   fn greet(&self) -> String;
/// }
///
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter {
///   fn greet(&self) -> String {
///     "Hello!".to_string()
///   }
/// }
/// impl Injectable for EnglishGreeter {
///   type Dependencies = ();
///   fn construct(_: ()) -> Self {
///     EnglishGreeter
///   }
/// }
///
/// let mut container = Container::new();
/// container.register(ServiceDescriptor::of::<EnglishGreeter>());
/// container.register(ServiceDescriptor::bind::<dyn Greeter, EnglishGreeter>(|svc| svc as Arc<dyn Greeter>));
///
/// let concrete = resolve!(container, EnglishGreeter);
/// let greeter = resolve!(container, trait Greeter);
/// assert_eq!(concrete.greet(), greeter.greet());
/// ```
#[macro_export]
macro_rules! resolve {
  // Arm for resolving a trait object: resolve!(container, trait MyTrait)
  ($container:expr, trait $trait_ident:ident) => {
    $container
      .resolve::<dyn $trait_ident>()
      .unwrap_or_else(|err| panic!("Failed to resolve required trait service: {}", err))
  };

  // Arm for resolving a concrete type: resolve!(container, MyService)
  ($container:expr, $type:ty) => {
    $container
      .resolve::<$type>()
      .unwrap_or_else(|err| panic!("Failed to resolve required service: {}", err))
  };
}

use fibre_inject::{resolve, Container, ResolveError};
use std::panic;

struct UnregisteredService;

fn main() {
  let container = Container::new();

  // --- Using the fallible `resolve()` method ---
  println!("Attempting to resolve a service that was never registered...");

  match container.resolve::<UnregisteredService>() {
    Ok(_) => panic!("Should not have found the service!"),
    Err(err @ ResolveError::NotRegistered { .. }) => println!("Correctly received an error: {err}"),
    Err(other) => panic!("Unexpected error: {other}"),
  }

  // --- Using the panicking `resolve!` macro ---
  println!("\nNow, attempting the same with the `resolve!` macro...");

  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
    // This line will panic!
    let _service = resolve!(container, UnregisteredService);
  }));

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");
}

use fibre_inject::{resolve, Container, ServiceDescriptor};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// Two contracts sharing one construction routine.
struct SessionTracker {
  id: usize,
}

struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  let mut container = Container::new();

  // --- Singleton Registration ---
  // This factory will only be called ONCE.
  container.register(
    ServiceDescriptor::builder::<SessionTracker>()
      .singleton()
      .constructor(|()| {
        println!("Creating SINGLETON SessionTracker...");
        Arc::new(SessionTracker {
          id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
        })
      })
      .build(),
  );

  // --- Transient Registration ---
  // This factory will be called EVERY time the service is resolved.
  container.register(
    ServiceDescriptor::builder::<RequestTracker>()
      .constructor(|()| {
        println!("Creating TRANSIENT RequestTracker...");
        Arc::new(RequestTracker {
          id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
        })
      })
      .build(),
  );

  println!("--- Resolving Singletons ---");
  let s1 = resolve!(container, SessionTracker);
  let s2 = resolve!(container, SessionTracker);
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert_eq!(s2.id, 0);
  assert!(
    Arc::ptr_eq(&s1, &s2),
    "Singleton instances should be identical"
  );
  println!("Singleton instances are the same pointer, as expected.\n");

  println!("--- Resolving Transients ---");
  let t1 = resolve!(container, RequestTracker);
  let t2 = resolve!(container, RequestTracker);
  println!("Transient 1 ID: {}, Transient 2 ID: {}", t1.id, t2.id);
  assert_eq!(t1.id, 1);
  assert_eq!(t2.id, 2);
  assert!(
    !Arc::ptr_eq(&t1, &t2),
    "Transient instances should be different"
  );
  println!("Transient instances are different pointers, as expected.");
}

use fibre_inject::{resolve, Container, Injectable, ServiceDescriptor};
use std::sync::Arc;

// 1. Define a trait (interface) for our service.
// It must be `Send + Sync` to be safely shared across threads.
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Create two different concrete implementations of the trait.
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[Console]: {}", message);
  }
}
impl Injectable for ConsoleLogger {
  type Dependencies = ();
  fn construct(_: ()) -> Self {
    ConsoleLogger
  }
}

struct FileLogger;
impl Logger for FileLogger {
  fn log(&self, message: &str) {
    println!("[File]: Writing '{}' to log.txt", message);
  }
}
impl Injectable for FileLogger {
  type Dependencies = ();
  fn construct(_: ()) -> Self {
    FileLogger
  }
}

// 3. A service that only knows about the `Logger` contract.
struct Checkout {
  logger: Arc<dyn Logger>,
}
impl Checkout {
  fn complete(&self, order: u32) {
    self.logger.log(&format!("order {} completed", order));
  }
}
impl Injectable for Checkout {
  type Dependencies = Arc<dyn Logger>;
  fn construct(logger: Arc<dyn Logger>) -> Self {
    Checkout { logger }
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::new("fibre_inject=info"))
    .init();

  // 4. Offer both implementations for the same contract. The first one wins;
  // the second is skipped with a warning.
  let mut container = Container::new();
  let report = container.register_discovered([
    ServiceDescriptor::bind::<dyn Logger, ConsoleLogger>(|svc| svc as Arc<dyn Logger>).singleton(),
    ServiceDescriptor::bind::<dyn Logger, FileLogger>(|svc| svc as Arc<dyn Logger>),
    ServiceDescriptor::of::<Checkout>(),
  ]);
  println!("Discovery: {:?}", report);

  // 5. Resolve the consumer; its logger is injected by contract.
  let checkout = resolve!(container, Checkout);
  checkout.complete(7);

  let logger = resolve!(container, trait Logger);
  logger.log("resolved directly by trait");
}

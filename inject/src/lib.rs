//! # Fibre Inject
//!
//! A dependency-injection container that maps service contracts to
//! implementations and builds object graphs by recursively resolving each
//! constructor's declared dependencies.
//!
//! ## Core Concepts
//!
//! - **Descriptor**: declares which contract an implementation satisfies, its
//!   lifetime, and how to construct it. Implementations usually declare their
//!   constructor through the [`Injectable`] trait.
//! - **Discovery**: a pass over candidate types that registers every marked
//!   candidate. The first registration for a contract wins.
//! - **Lifetime**: `Transient` builds a new instance per resolution,
//!   `Singleton` builds one and shares it.
//! - **Resolution**: depth-first construction of a contract and everything it
//!   depends on. Missing registrations and dependency cycles are reported as
//!   [`ResolveError`]s.
//!
//! There is no global container. Build one at program entry and pass it (or
//! an `Arc` of it) to the code that resolves services.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_inject::{Container, Injectable, ServiceDescriptor};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!   fn greet(&self) -> String;
//! }
//!
//! struct Message(String);
//! impl Injectable for Message {
//!   type Dependencies = ();
//!   fn construct(_: ()) -> Self {
//!     Message("Hello, World!".to_string())
//!   }
//! }
//!
//! struct EnglishGreeter {
//!   message: Arc<Message>,
//! }
//! impl Greeter for EnglishGreeter {
//!   fn greet(&self) -> String {
//!     self.message.0.clone()
//!   }
//! }
//! impl Injectable for EnglishGreeter {
//!   type Dependencies = Arc<Message>;
//!   fn construct(message: Arc<Message>) -> Self {
//!     EnglishGreeter { message }
//!   }
//! }
//!
//! let mut container = Container::new();
//! container.register_discovered([
//!   ServiceDescriptor::of::<Message>().singleton(),
//!   ServiceDescriptor::bind::<dyn Greeter, EnglishGreeter>(|svc| svc as Arc<dyn Greeter>),
//! ]);
//!
//! let greeter = container.resolve::<dyn Greeter>().unwrap();
//! assert_eq!(greeter.greet(), "Hello, World!");
//! ```

mod config;
mod container;
mod core;
mod dependencies;
mod descriptor;
#[cfg(feature = "discovery")]
mod discovery;
mod error;
mod macros;

pub use config::ContainerConfig;
pub use container::{Container, DiscoveryReport};
pub use crate::core::{ContractKey, Instance};
pub use dependencies::Dependencies;
pub use descriptor::{Candidate, DescriptorBuilder, Injectable, Lifetime, ServiceDescriptor};
#[cfg(feature = "discovery")]
pub use discovery::{discovered, INJECTABLES};
pub use error::{ConfigError, ResolveError, Result};

#[cfg(feature = "discovery")]
#[doc(hidden)]
pub mod __private {
  pub use linkme;
}

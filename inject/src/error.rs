use thiserror::Error;

/// Errors raised while resolving a service.
///
/// Every variant is a configuration problem: it is reported to the caller of
/// `resolve` and never retried. Failures of nested dependencies reach the
/// top-level caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  #[error("service `{contract}` is not registered")]
  NotRegistered { contract: &'static str },

  #[error("implementation `{implementation}` of service `{contract}` has no constructor")]
  NoConstructor {
    contract: &'static str,
    implementation: &'static str,
  },

  /// The path runs from the first occurrence of the repeated contract back to itself.
  #[error("cyclic dependency detected: {}", .path.join(" -> "))]
  CyclicDependency { path: Vec<&'static str> },

  #[error("resolved instance does not have the declared type `{contract}`")]
  TypeMismatch { contract: &'static str },
}

/// Errors raised while loading a `ContainerConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to read configuration file: {0}")]
  Io(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  Parse(String),
}

/// A specialized `Result` type for resolution.
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;

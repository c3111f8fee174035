//! Container configuration, loaded from YAML.
//!
//! ```yaml
//! lifetime_overrides:
//!   "my_app::services::Mailer": singleton
//!   "dyn my_app::services::Clock": transient
//! ```

use crate::descriptor::Lifetime;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerConfig {
  /// Lifetimes that replace the declared ones during discovery, keyed by the
  /// contract's `std::any::type_name`.
  #[serde(default)]
  pub lifetime_overrides: HashMap<String, Lifetime>,
}

impl ContainerConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
    serde_yaml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
  }

  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let source = fs::read_to_string(path)?;
    Self::from_yaml_str(&source)
  }

  /// Overrides the lifetime of the contract with the given type name.
  pub fn with_override(mut self, contract: impl Into<String>, lifetime: Lifetime) -> Self {
    self.lifetime_overrides.insert(contract.into(), lifetime);
    self
  }

  /// Overrides the lifetime of contract `C`.
  pub fn with_override_for<C: ?Sized + Any>(self, lifetime: Lifetime) -> Self {
    self.with_override(std::any::type_name::<C>(), lifetime)
  }

  pub(crate) fn lifetime_for(&self, contract: &str) -> Option<Lifetime> {
    self.lifetime_overrides.get(contract).copied()
  }
}

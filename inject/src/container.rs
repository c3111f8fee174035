//! The main `Container` struct and its associated methods.

use crate::config::ContainerConfig;
use crate::core::{downcast, ContractKey, Instance, ResolutionPath};
use crate::descriptor::{Candidate, Constructor, Lifetime, ServiceDescriptor};
use crate::error::{ResolveError, Result};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// The implementation bound to one contract.
struct Implementation {
  key: ContractKey,
  constructors: Vec<Constructor>,
}

impl Implementation {
  /// The constructor used for `contract`: always the first one declared.
  fn constructor(&self, contract: ContractKey) -> Result<&Constructor> {
    self.constructors.first().ok_or(ResolveError::NoConstructor {
      contract: contract.name(),
      implementation: self.key.name(),
    })
  }
}

/// What a discovery pass did with each candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
  /// Contracts registered by this pass, in candidate order.
  pub registered: Vec<&'static str>,
  /// Contracts that were already bound; these candidates were skipped.
  pub duplicates: Vec<&'static str>,
  /// Implementations without an injectable marker.
  pub unmarked: Vec<&'static str>,
}

/// The dependency-injection container.
///
/// Registration takes `&mut self` and resolution takes `&self`, so once the
/// container is shared (behind `&Container` or `Arc<Container>`) its bindings
/// are read-only and every discovery pass has happened before any resolution.
/// The only state written during resolution is the singleton cache, which
/// builds each singleton at most once even under concurrent first access.
#[derive(Default)]
pub struct Container {
  type_bindings: HashMap<ContractKey, Implementation>,
  lifetime_bindings: HashMap<ContractKey, Lifetime>,
  singletons: HashMap<ContractKey, OnceCell<Instance>>,
  config: ContainerConfig,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty container whose discovery applies `config`.
  pub fn with_config(config: ContainerConfig) -> Self {
    Self {
      config,
      ..Self::default()
    }
  }

  pub fn config(&self) -> &ContainerConfig {
    &self.config
  }

  // --- Discovery ---

  /// Registers every marked candidate, in the order supplied.
  ///
  /// The first registration for a contract wins; later candidates for the
  /// same contract are skipped with a warning. Unmarked candidates are
  /// ignored. Since the outcome depends on candidate order, callers that
  /// need a stable result should sort their input.
  pub fn register_discovered<I>(&mut self, candidates: I) -> DiscoveryReport
  where
    I: IntoIterator,
    I::Item: Into<Candidate>,
  {
    let mut report = DiscoveryReport::default();
    for candidate in candidates {
      let candidate = candidate.into();
      let implementation = candidate.implementation();
      let Some(descriptor) = candidate.into_descriptor() else {
        debug!(
          implementation = implementation.name(),
          "Skipping candidate without an injectable marker"
        );
        report.unmarked.push(implementation.name());
        continue;
      };

      let contract = descriptor.contract();
      if self.register(descriptor) {
        report.registered.push(contract.name());
      } else {
        report.duplicates.push(contract.name());
      }
    }
    report
  }

  /// Registers a single descriptor. Returns `false` if its contract was
  /// already bound, in which case the existing binding is kept.
  pub fn register(&mut self, descriptor: ServiceDescriptor) -> bool {
    let contract = descriptor.contract();
    let implementation = descriptor.implementation();

    if let Some(existing) = self.type_bindings.get(&contract) {
      warn!(
        contract = contract.name(),
        implementation = implementation.name(),
        existing = existing.key.name(),
        "Service contract is already registered; keeping the first registration"
      );
      return false;
    }

    let lifetime = match self.config.lifetime_for(contract.name()) {
      Some(lifetime) => {
        debug!(
          contract = contract.name(),
          declared = %descriptor.lifetime(),
          configured = %lifetime,
          "Applying configured lifetime override"
        );
        lifetime
      }
      None => descriptor.lifetime(),
    };

    if lifetime == Lifetime::Singleton {
      self.singletons.insert(contract, OnceCell::new());
    }
    self.lifetime_bindings.insert(contract, lifetime);
    self.type_bindings.insert(
      contract,
      Implementation {
        key: implementation,
        constructors: descriptor.into_constructors(),
      },
    );

    info!(
      contract = contract.name(),
      implementation = implementation.name(),
      %lifetime,
      "Registered service"
    );
    true
  }

  // --- Introspection ---

  pub fn contains<C: ?Sized + Any>(&self) -> bool {
    self.type_bindings.contains_key(&ContractKey::of::<C>())
  }

  pub fn lifetime_of<C: ?Sized + Any>(&self) -> Option<Lifetime> {
    self.lifetime_bindings.get(&ContractKey::of::<C>()).copied()
  }

  /// Names of all registered contracts, sorted.
  pub fn contracts(&self) -> Vec<&'static str> {
    let mut names: Vec<_> = self.type_bindings.keys().map(ContractKey::name).collect();
    names.sort_unstable();
    names
  }

  pub fn len(&self) -> usize {
    self.type_bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.type_bindings.is_empty()
  }

  // --- Resolution ---

  /// Resolves contract `C`, building its dependencies first.
  ///
  /// Singletons are built once and shared; transients are built fresh on
  /// every call. No partially built graph is ever returned: the first
  /// failing dependency aborts the whole resolution.
  pub fn resolve<C: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<C>> {
    let contract = ContractKey::of::<C>();
    let instance = self
      .check_graph(contract)
      .and_then(|()| self.resolve_key(contract, &mut ResolutionPath::default()))
      .map_err(|err| {
        debug!(contract = contract.name(), error = %err, "Service resolution failed");
        err
      })?;
    downcast::<C>(Some(instance))
  }

  fn binding(&self, contract: ContractKey) -> Result<&Implementation> {
    self
      .type_bindings
      .get(&contract)
      .ok_or(ResolveError::NotRegistered {
        contract: contract.name(),
      })
  }

  fn is_cached(&self, contract: ContractKey) -> bool {
    self
      .singletons
      .get(&contract)
      .is_some_and(|cell| cell.get().is_some())
  }

  /// Walks the declared dependency graph below `contract` without building
  /// anything or touching a singleton cell.
  ///
  /// Reports the same first error the resolver would hit, in the same
  /// depth-first order. Cycles are caught here, before any thread can block
  /// on a cell that another thread holds.
  fn check_graph(&self, contract: ContractKey) -> Result<()> {
    let mut finished = HashSet::new();
    self.walk(contract, &mut ResolutionPath::default(), &mut finished)
  }

  fn walk(
    &self,
    contract: ContractKey,
    path: &mut ResolutionPath,
    finished: &mut HashSet<ContractKey>,
  ) -> Result<()> {
    if finished.contains(&contract) {
      return Ok(());
    }
    let implementation = self.binding(contract)?;
    // Built singletons are never reconstructed, so nothing below them is visited.
    if self.is_cached(contract) {
      return Ok(());
    }

    let mut path = path.enter(contract)?;
    for dependency in implementation.constructor(contract)?.dependencies() {
      self.walk(*dependency, &mut path, finished)?;
    }
    finished.insert(contract);
    Ok(())
  }

  fn resolve_key(&self, contract: ContractKey, path: &mut ResolutionPath) -> Result<Instance> {
    let implementation = self.binding(contract)?;

    match self.singletons.get(&contract) {
      Some(cell) => {
        if let Some(instance) = cell.get() {
          trace!(contract = contract.name(), "Singleton cache hit");
          return Ok(instance.clone());
        }
        let mut path = path.enter(contract)?;
        let instance = cell.get_or_try_init(|| {
          debug!(
            contract = contract.name(),
            implementation = implementation.key.name(),
            "Constructing singleton"
          );
          self.construct(contract, implementation, &mut path)
        })?;
        Ok(instance.clone())
      }
      None => {
        let mut path = path.enter(contract)?;
        trace!(
          contract = contract.name(),
          depth = path.depth(),
          "Constructing transient"
        );
        self.construct(contract, implementation, &mut path)
      }
    }
  }

  fn construct(
    &self,
    contract: ContractKey,
    implementation: &Implementation,
    path: &mut ResolutionPath,
  ) -> Result<Instance> {
    let constructor = implementation.constructor(contract)?;

    let dependencies = constructor.dependencies();
    let instances = if dependencies.is_empty() {
      Vec::new()
    } else {
      dependencies
        .iter()
        .map(|dependency| self.resolve_key(*dependency, path))
        .collect::<Result<Vec<_>>>()?
    };

    constructor.invoke(instances)
  }
}

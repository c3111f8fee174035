//! Service descriptors: the injectable marker and the lifetime it declares.

use crate::core::{ContractKey, Instance};
use crate::dependencies::Dependencies;
use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Policy governing instance reuse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
  /// A new instance for every resolution.
  #[default]
  Transient,
  /// One instance, built on first resolution and shared afterwards.
  Singleton,
}

impl fmt::Display for Lifetime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Lifetime::Transient => f.write_str("transient"),
      Lifetime::Singleton => f.write_str("singleton"),
    }
  }
}

/// A type that can be built by the container from its declared dependencies.
///
/// # Examples
///
/// ```
/// use fibre_inject::Injectable;
/// use std::sync::Arc;
///
/// struct Settings;
/// impl Injectable for Settings {
///   type Dependencies = ();
///   fn construct(_: ()) -> Self {
///     Settings
///   }
/// }
///
/// struct Mailer {
///   settings: Arc<Settings>,
/// }
/// impl Injectable for Mailer {
///   type Dependencies = Arc<Settings>;
///   fn construct(settings: Arc<Settings>) -> Self {
///     Mailer { settings }
///   }
/// }
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
  type Dependencies: Dependencies;

  fn construct(dependencies: Self::Dependencies) -> Self;
}

type ConstructFn = dyn Fn(Vec<Instance>) -> Result<Instance, ResolveError> + Send + Sync;

/// A factory together with the contracts of its parameters.
pub(crate) struct Constructor {
  dependencies: Vec<ContractKey>,
  invoke: Box<ConstructFn>,
}

impl Constructor {
  fn new<C, D, F>(factory: F) -> Self
  where
    C: ?Sized + Any + Send + Sync,
    D: Dependencies,
    F: Fn(D) -> Arc<C> + Send + Sync + 'static,
  {
    Self {
      dependencies: D::contracts(),
      invoke: Box::new(move |instances| {
        let dependencies = D::from_instances(instances)?;
        Ok(Arc::new(factory(dependencies)) as Instance)
      }),
    }
  }

  pub(crate) fn dependencies(&self) -> &[ContractKey] {
    &self.dependencies
  }

  /// Builds the instance from dependencies resolved for `dependencies()`.
  pub(crate) fn invoke(&self, instances: Vec<Instance>) -> Result<Instance, ResolveError> {
    (self.invoke)(instances)
  }
}

/// Declares which contract an implementation satisfies, under which lifetime,
/// and how it is constructed.
pub struct ServiceDescriptor {
  contract: ContractKey,
  implementation: ContractKey,
  lifetime: Lifetime,
  constructors: Vec<Constructor>,
}

impl ServiceDescriptor {
  /// Registers `T` under its own identity, built by `Injectable::construct`.
  pub fn of<T: Injectable>() -> Self {
    Self {
      contract: ContractKey::of::<T>(),
      implementation: ContractKey::of::<T>(),
      lifetime: Lifetime::default(),
      constructors: vec![Constructor::new(|deps| Arc::new(T::construct(deps)))],
    }
  }

  /// Registers `T` under the contract `C`, usually a trait object.
  ///
  /// `upcast` converts the built implementation into the contract, which for
  /// trait objects is a plain unsizing cast: `|svc| svc as Arc<dyn Greeter>`.
  pub fn bind<C, T>(upcast: fn(Arc<T>) -> Arc<C>) -> Self
  where
    C: ?Sized + Any + Send + Sync,
    T: Injectable,
  {
    Self {
      contract: ContractKey::of::<C>(),
      implementation: ContractKey::of::<T>(),
      lifetime: Lifetime::default(),
      constructors: vec![Constructor::new(move |deps| upcast(Arc::new(T::construct(deps))))],
    }
  }

  /// Registers an already-built value as a singleton for `C`.
  pub fn instance<C: ?Sized + Any + Send + Sync>(instance: Arc<C>) -> Self {
    Self {
      contract: ContractKey::of::<C>(),
      implementation: ContractKey::of::<C>(),
      lifetime: Lifetime::Singleton,
      constructors: vec![Constructor::new(move |()| instance.clone())],
    }
  }

  /// Starts a descriptor for `C` with hand-written factories.
  pub fn builder<C: ?Sized + Any + Send + Sync>() -> DescriptorBuilder<C> {
    DescriptorBuilder::new()
  }

  pub fn singleton(self) -> Self {
    self.with_lifetime(Lifetime::Singleton)
  }

  pub fn transient(self) -> Self {
    self.with_lifetime(Lifetime::Transient)
  }

  pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
    self.lifetime = lifetime;
    self
  }

  pub fn contract(&self) -> ContractKey {
    self.contract
  }

  pub fn implementation(&self) -> ContractKey {
    self.implementation
  }

  pub fn lifetime(&self) -> Lifetime {
    self.lifetime
  }

  /// Parameter contracts of the constructor the container will use.
  pub fn dependencies(&self) -> &[ContractKey] {
    self
      .constructors
      .first()
      .map(Constructor::dependencies)
      .unwrap_or(&[])
  }

  pub(crate) fn into_constructors(self) -> Vec<Constructor> {
    self.constructors
  }
}

impl fmt::Debug for ServiceDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ServiceDescriptor")
      .field("contract", &self.contract)
      .field("implementation", &self.implementation)
      .field("lifetime", &self.lifetime)
      .field("dependencies", &self.dependencies())
      .field("constructors", &self.constructors.len())
      .finish()
  }
}

/// Builds a `ServiceDescriptor` for `C` from factory closures.
///
/// When several constructors are added the first one is used. A descriptor
/// without any constructor registers fine and fails at resolution with
/// `ResolveError::NoConstructor`.
pub struct DescriptorBuilder<C: ?Sized> {
  implementation: ContractKey,
  lifetime: Lifetime,
  constructors: Vec<Constructor>,
  _contract: PhantomData<fn() -> Arc<C>>,
}

impl<C: ?Sized + Any + Send + Sync> DescriptorBuilder<C> {
  fn new() -> Self {
    Self {
      implementation: ContractKey::of::<C>(),
      lifetime: Lifetime::default(),
      constructors: Vec::new(),
      _contract: PhantomData,
    }
  }

  /// Records the concrete type behind the contract, for logs and errors.
  pub fn implemented_by<T: ?Sized + Any>(mut self) -> Self {
    self.implementation = ContractKey::of::<T>();
    self
  }

  pub fn lifetime(mut self, lifetime: Lifetime) -> Self {
    self.lifetime = lifetime;
    self
  }

  pub fn singleton(self) -> Self {
    self.lifetime(Lifetime::Singleton)
  }

  /// Adds a factory whose parameters are resolved from the container.
  pub fn constructor<D, F>(mut self, factory: F) -> Self
  where
    D: Dependencies,
    F: Fn(D) -> Arc<C> + Send + Sync + 'static,
  {
    self.constructors.push(Constructor::new(factory));
    self
  }

  pub fn build(self) -> ServiceDescriptor {
    ServiceDescriptor {
      contract: ContractKey::of::<C>(),
      implementation: self.implementation,
      lifetime: self.lifetime,
      constructors: self.constructors,
    }
  }
}

/// An implementation type offered to discovery.
///
/// Only candidates carrying a descriptor (the injectable marker) are
/// registered; the rest are skipped.
#[derive(Debug)]
pub struct Candidate {
  implementation: ContractKey,
  descriptor: Option<ServiceDescriptor>,
}

impl Candidate {
  /// A candidate for `T` without an injectable marker.
  pub fn unmarked<T: ?Sized + Any>() -> Self {
    Self {
      implementation: ContractKey::of::<T>(),
      descriptor: None,
    }
  }

  pub fn implementation(&self) -> ContractKey {
    self.implementation
  }

  pub fn descriptor(&self) -> Option<&ServiceDescriptor> {
    self.descriptor.as_ref()
  }

  pub(crate) fn into_descriptor(self) -> Option<ServiceDescriptor> {
    self.descriptor
  }
}

impl From<ServiceDescriptor> for Candidate {
  fn from(descriptor: ServiceDescriptor) -> Self {
    Self {
      implementation: descriptor.implementation,
      descriptor: Some(descriptor),
    }
  }
}

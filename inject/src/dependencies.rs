//! Typed constructor parameter lists.

use crate::core::{downcast, ContractKey, Instance};
use crate::error::ResolveError;
use std::any::Any;
use std::sync::Arc;

/// The parameters a constructor needs, in declared order.
///
/// Implemented for `()` (no dependencies), for a single `Arc<D>`, and for
/// tuples of up to eight `Arc<_>` values. Each element names the contract to
/// resolve; `D` may be a trait object such as `dyn Clock`.
pub trait Dependencies: Sized + Send + 'static {
  /// The contracts to resolve, in parameter order.
  fn contracts() -> Vec<ContractKey>;

  /// Rebuilds the typed parameter list from instances resolved for
  /// `contracts()`, in the same order.
  fn from_instances(instances: Vec<Instance>) -> Result<Self, ResolveError>;
}

impl Dependencies for () {
  fn contracts() -> Vec<ContractKey> {
    Vec::new()
  }

  fn from_instances(_instances: Vec<Instance>) -> Result<Self, ResolveError> {
    Ok(())
  }
}

impl<D> Dependencies for Arc<D>
where
  D: ?Sized + Any + Send + Sync,
{
  fn contracts() -> Vec<ContractKey> {
    vec![ContractKey::of::<D>()]
  }

  fn from_instances(instances: Vec<Instance>) -> Result<Self, ResolveError> {
    downcast::<D>(instances.into_iter().next())
  }
}

macro_rules! impl_dependencies {
  ($($dep:ident),+) => {
    impl<$($dep),+> Dependencies for ($(Arc<$dep>,)+)
    where
      $($dep: ?Sized + Any + Send + Sync,)+
    {
      fn contracts() -> Vec<ContractKey> {
        vec![$(ContractKey::of::<$dep>()),+]
      }

      fn from_instances(instances: Vec<Instance>) -> Result<Self, ResolveError> {
        let mut instances = instances.into_iter();
        Ok(($(downcast::<$dep>(instances.next())?,)+))
      }
    }
  };
}

impl_dependencies!(A);
impl_dependencies!(A, B);
impl_dependencies!(A, B, C);
impl_dependencies!(A, B, C, D);
impl_dependencies!(A, B, C, D, E);
impl_dependencies!(A, B, C, D, E, F);
impl_dependencies!(A, B, C, D, E, F, G);
impl_dependencies!(A, B, C, D, E, F, G, H);

//! Core data structures shared by the container, descriptors and dependency lists.

use crate::error::ResolveError;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// A type-erased service instance.
///
/// The erased value is always an `Arc<C>` for the contract `C` it was built
/// for, which lets trait-object contracts (`dyn Trait`) travel through the
/// resolver the same way concrete types do.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Identity of a service contract or implementation type.
///
/// Equality and hashing use only the `TypeId`; the name is carried along for
/// logs, errors and configuration lookups.
#[derive(Clone, Copy)]
pub struct ContractKey {
  type_id: TypeId,
  name: &'static str,
}

impl ContractKey {
  /// The key for `T`, which may be a trait object such as `dyn Greeter`.
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  /// The type name as reported by `std::any::type_name`.
  pub fn name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for ContractKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for ContractKey {}

impl Hash for ContractKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

impl fmt::Debug for ContractKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key({})", self.name)
  }
}

impl fmt::Display for ContractKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name)
  }
}

/// Recovers the typed `Arc<C>` from an erased instance.
pub(crate) fn downcast<C: ?Sized + Any + Send + Sync>(
  instance: Option<Instance>,
) -> Result<Arc<C>, ResolveError> {
  instance
    .as_deref()
    .and_then(|erased| erased.downcast_ref::<Arc<C>>())
    .cloned()
    .ok_or(ResolveError::TypeMismatch {
      contract: std::any::type_name::<C>(),
    })
}

/// The contracts currently being resolved by one top-level `resolve` call,
/// outermost first.
///
/// Each call owns its own path, so detection is independent per thread and
/// per container.
#[derive(Debug, Default)]
pub(crate) struct ResolutionPath {
  stack: Vec<ContractKey>,
}

impl ResolutionPath {
  /// Pushes `key` onto the active path.
  ///
  /// Fails with `CyclicDependency` if `key` is already being resolved further
  /// up the same path. The returned guard pops the key again when dropped.
  pub(crate) fn enter(&mut self, key: ContractKey) -> Result<PathGuard<'_>, ResolveError> {
    if let Some(start) = self.stack.iter().position(|active| *active == key) {
      let mut path: Vec<&'static str> = self.stack[start..].iter().map(ContractKey::name).collect();
      path.push(key.name());
      return Err(ResolveError::CyclicDependency { path });
    }
    self.stack.push(key);
    Ok(PathGuard { path: self })
  }

  pub(crate) fn depth(&self) -> usize {
    self.stack.len()
  }
}

/// An RAII guard for one frame of the resolution path.
pub(crate) struct PathGuard<'a> {
  path: &'a mut ResolutionPath,
}

impl Deref for PathGuard<'_> {
  type Target = ResolutionPath;

  fn deref(&self) -> &ResolutionPath {
    self.path
  }
}

impl DerefMut for PathGuard<'_> {
  fn deref_mut(&mut self) -> &mut ResolutionPath {
    self.path
  }
}

impl Drop for PathGuard<'_> {
  fn drop(&mut self) {
    self.path.stack.pop();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct First;
  struct Second;

  #[test]
  fn guard_pops_its_frame_on_drop() {
    let mut path = ResolutionPath::default();
    {
      let mut outer = path.enter(ContractKey::of::<First>()).unwrap();
      assert_eq!(outer.depth(), 1);
      {
        let inner = outer.enter(ContractKey::of::<Second>()).unwrap();
        assert_eq!(inner.depth(), 2);
      }
      assert_eq!(outer.depth(), 1);
    }
    assert_eq!(path.depth(), 0);
  }

  #[test]
  fn reentering_an_active_key_reports_the_cycle() {
    let mut path = ResolutionPath::default();
    let mut outer = path.enter(ContractKey::of::<First>()).unwrap();
    let mut inner = outer.enter(ContractKey::of::<Second>()).unwrap();

    let err = inner.enter(ContractKey::of::<First>()).err().unwrap();
    assert_eq!(
      err,
      ResolveError::CyclicDependency {
        path: vec![
          std::any::type_name::<First>(),
          std::any::type_name::<Second>(),
          std::any::type_name::<First>(),
        ],
      }
    );
    // The failed attempt leaves the path untouched.
    assert_eq!(inner.depth(), 2);
  }

  #[test]
  fn keys_compare_by_type_identity() {
    assert_eq!(ContractKey::of::<First>(), ContractKey::of::<First>());
    assert_ne!(ContractKey::of::<First>(), ContractKey::of::<Second>());
    assert_eq!(format!("{:?}", ContractKey::of::<u8>()), "Key(u8)");
  }

  #[test]
  fn downcast_rejects_a_foreign_instance() {
    let erased: Instance = Arc::new(Arc::new(7_u32));
    assert_eq!(*downcast::<u32>(Some(erased.clone())).unwrap(), 7);
    assert!(matches!(
      downcast::<String>(Some(erased)),
      Err(ResolveError::TypeMismatch { .. })
    ));
    assert!(downcast::<u32>(None).is_err());
  }
}

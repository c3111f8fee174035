//! Link-time discovery of injectable types.
//!
//! Types submitted with [`submit_injectable!`](crate::submit_injectable) are
//! collected into one table across the whole binary, so a host can register
//! everything with a single `register_discovered(discovered())` call. The
//! table has no defined order.

use crate::descriptor::Candidate;
use linkme::distributed_slice;

/// Every candidate submitted with `submit_injectable!`.
#[distributed_slice]
pub static INJECTABLES: [fn() -> Candidate] = [..];

/// Builds the candidates submitted anywhere in the binary.
pub fn discovered() -> impl Iterator<Item = Candidate> {
  INJECTABLES.iter().map(|build| build())
}

/// Adds a candidate to the link-time discovery table.
///
/// The argument is a function (or non-capturing closure) returning anything
/// convertible into a `Candidate`, usually a `ServiceDescriptor`.
///
/// ```ignore
/// fibre_inject::submit_injectable!(|| ServiceDescriptor::of::<Mailer>().singleton().into());
/// ```
#[macro_export]
macro_rules! submit_injectable {
  ($build:expr) => {
    const _: () = {
      #[$crate::__private::linkme::distributed_slice($crate::INJECTABLES)]
      #[linkme(crate = $crate::__private::linkme)]
      static CANDIDATE: fn() -> $crate::Candidate = $build;
    };
  };
}

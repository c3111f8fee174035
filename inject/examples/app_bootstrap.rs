//! A host application start-up: managers declare themselves injectable,
//! the host discovers them, resolves the top-level handles and initialises
//! them. Any resolution failure aborts the boot.

use fibre_inject::{
  discovered, submit_injectable, Container, ContainerConfig, Injectable, ServiceDescriptor,
};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiKind {
  InitialLoading,
  Main,
}

#[derive(Debug, Clone)]
struct UserData {
  nickname: String,
  level: u32,
  gold: u64,
}

// --- Contracts ---

trait DataManager: Send + Sync {
  fn set_user_data(&self, data: UserData);
  fn current_user(&self) -> Option<UserData>;
}

trait AuthManager: Send + Sync {
  fn sign_in(&self, uid: &str) -> bool;
}

trait UiManager: Send + Sync {
  fn init(&self);
  fn show(&self, kind: UiKind);
}

// --- Implementations ---

#[derive(Default)]
struct InMemoryData {
  current: Mutex<Option<UserData>>,
}
impl DataManager for InMemoryData {
  fn set_user_data(&self, data: UserData) {
    println!("User data set. level: {}, gold: {}", data.level, data.gold);
    *self.current.lock().unwrap() = Some(data);
  }

  fn current_user(&self) -> Option<UserData> {
    self.current.lock().unwrap().clone()
  }
}
impl Injectable for InMemoryData {
  type Dependencies = ();
  fn construct(_: ()) -> Self {
    InMemoryData::default()
  }
}

struct StubAuth {
  data: Arc<dyn DataManager>,
}
impl AuthManager for StubAuth {
  fn sign_in(&self, uid: &str) -> bool {
    self.data.set_user_data(UserData {
      nickname: uid.to_string(),
      level: 1,
      gold: 100,
    });
    true
  }
}
impl Injectable for StubAuth {
  type Dependencies = Arc<dyn DataManager>;
  fn construct(data: Arc<dyn DataManager>) -> Self {
    StubAuth { data }
  }
}

struct ConsoleUi {
  active: Mutex<Option<UiKind>>,
}
impl UiManager for ConsoleUi {
  fn init(&self) {
    self.show(UiKind::InitialLoading);
  }

  fn show(&self, kind: UiKind) {
    for candidate in [UiKind::InitialLoading, UiKind::Main] {
      let state = if candidate == kind { "shown" } else { "hidden" };
      println!("{:?}: {}", candidate, state);
    }
    *self.active.lock().unwrap() = Some(kind);
  }
}
impl Injectable for ConsoleUi {
  type Dependencies = ();
  fn construct(_: ()) -> Self {
    ConsoleUi {
      active: Mutex::new(None),
    }
  }
}

// A helper that lives in the same binary but is not a service.
struct PhoneNumberFormatter;

submit_injectable!(|| {
  ServiceDescriptor::bind::<dyn DataManager, InMemoryData>(|svc| svc as Arc<dyn DataManager>)
    .singleton()
    .into()
});
submit_injectable!(|| {
  ServiceDescriptor::bind::<dyn AuthManager, StubAuth>(|svc| svc as Arc<dyn AuthManager>)
    .singleton()
    .into()
});
submit_injectable!(|| {
  ServiceDescriptor::bind::<dyn UiManager, ConsoleUi>(|svc| svc as Arc<dyn UiManager>)
    .singleton()
    .into()
});
submit_injectable!(fibre_inject::Candidate::unmarked::<PhoneNumberFormatter>);

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::new("fibre_inject=debug"))
    .init();

  // Deployments may pin lifetimes without recompiling.
  let config = ContainerConfig::from_yaml_str("lifetime_overrides: {}")?;

  let mut container = Container::with_config(config);
  let report = container.register_discovered(discovered());
  println!(
    "Registered {} services, skipped {} unmarked types",
    report.registered.len(),
    report.unmarked.len()
  );

  let ui = container.resolve::<dyn UiManager>()?;
  let auth = container.resolve::<dyn AuthManager>()?;
  let data = container.resolve::<dyn DataManager>()?;

  ui.init();
  println!("--- All Managers Initialized ---");

  if auth.sign_in("player-1") {
    let user = data.current_user().ok_or("sign-in did not store user data")?;
    println!("Signed in as {}", user.nickname);
    ui.show(UiKind::Main);
  }
  Ok(())
}

use fibre_inject::{Container, Injectable, ServiceDescriptor};
use std::sync::Arc;

// Auth needs the user store and the user store needs auth: a cycle.
struct AuthService {
  _users: Arc<UserStore>,
}
impl Injectable for AuthService {
  type Dependencies = Arc<UserStore>;
  fn construct(users: Arc<UserStore>) -> Self {
    AuthService { _users: users }
  }
}

struct UserStore {
  _auth: Arc<AuthService>,
}
impl Injectable for UserStore {
  type Dependencies = Arc<AuthService>;
  fn construct(auth: Arc<AuthService>) -> Self {
    UserStore { _auth: auth }
  }
}

fn main() {
  let mut container = Container::new();
  container.register_discovered([
    ServiceDescriptor::of::<AuthService>().singleton(),
    ServiceDescriptor::of::<UserStore>().singleton(),
  ]);

  match container.resolve::<AuthService>() {
    Ok(_) => panic!("A cyclic graph should not resolve"),
    Err(err) => println!("Resolution stopped: {err}"),
  }
}

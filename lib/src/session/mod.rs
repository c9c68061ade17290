// lib/src/session/mod.rs
pub mod login;
pub mod resolver;
pub mod store;

pub use login::{authenticate, login_failure_message, LOGIN_FAILED_MESSAGE};
pub use resolver::{SessionResolver, SessionSnapshot};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

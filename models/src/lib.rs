// models/src/lib.rs

// Declare all top-level modules within the 'models' crate
pub mod errors;
pub mod menu;
pub mod session;

// Records fetched from the hospital backend
pub mod medical;

// Re-export common core types for convenience when other crates use 'models::*'
pub use errors::{HospitalError, HospitalResult};
pub use menu::{menu_for, menu_for_role, MenuIcon, MenuItem};
pub use session::{Credentials, LoginResponse, Role, Session, UserProfile};

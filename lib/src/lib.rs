// lib/src/lib.rs
// Client core for the MediCare hospital console.

pub mod api;
pub mod app;
pub mod config;
pub mod ordering;
pub mod refresh;
pub mod router;
pub mod session;
pub mod views;

pub use api::{ApiClient, HospitalApi, HospitalBackend, HttpMethod, SessionGuardedBackend};
pub use app::AppContext;
pub use config::{load_client_config, save_client_config, ClientConfig};
pub use refresh::{RefreshCoordinator, Resource};
pub use router::{dispatch, Route, Router, Screen, View};
pub use session::{SessionResolver, SessionSnapshot};

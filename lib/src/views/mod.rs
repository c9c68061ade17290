// lib/src/views/mod.rs
//! Screen controllers. Each one loads what its screen shows, applies the
//! client-side ordering and filtering, and turns mutations into [`Notice`]s.

pub mod admissions;
pub mod appointments;
pub mod billing;
pub mod dashboards;
pub mod directory;
pub mod er;
pub mod feedback;
pub mod inventory;
pub mod maintenance;
pub mod prescriptions;
pub mod state;

pub use dashboards::{AdminHome, DoctorHome, PatientHome};
pub use er::{spawn_er_poller, ErBoard, PollHandle};
pub use state::{load_list, LoadIssue, Loaded, MountGuard, Notice};

pub mod app;
pub mod client;
pub mod controller;
pub mod controls;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod projection;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use client::{ContributionApi, HttpContributionApi};
pub use controller::{ContributionController, FormSnapshot, FormView, ValueSource};
pub use state::AppState;
pub use storage::{load_record, resolve_data_path};

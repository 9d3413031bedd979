pub mod app;
pub mod breathing;
pub mod checkin;
pub mod config;
pub mod entitlement;
pub mod errors;
pub mod handlers;
pub mod library;
pub mod models;
pub mod prompts;
pub mod quotes;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use storage::{load_data, load_quotes};

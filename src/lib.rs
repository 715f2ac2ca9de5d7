pub mod app;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod targets;
pub mod validation;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::Store;

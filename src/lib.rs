pub mod app;
pub mod errors;
pub mod grid;
pub mod handlers;
pub mod models;
pub mod roster;
pub mod sheets;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use sheets::SheetsConfig;
pub use state::{AppState, Board};
pub use storage::{load_documents, load_store, resolve_data_dir, resolve_state_path};

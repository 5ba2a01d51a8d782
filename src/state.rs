use crate::models::{MemberRoster, RosterSource};
use crate::sheets::SheetsConfig;
use crate::storage::{Documents, LocalStore};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Everything mutable lives behind one lock, so each user action is a single
/// validate-persist-mutate sequence.
#[derive(Debug)]
pub struct Board {
    pub roster: MemberRoster,
    pub source: RosterSource,
    pub store: LocalStore,
}

#[derive(Clone)]
pub struct AppState {
    pub docs: Arc<Documents>,
    pub state_path: PathBuf,
    pub sheets: SheetsConfig,
    pub http: reqwest::Client,
    pub board: Arc<Mutex<Board>>,
}

impl AppState {
    pub fn new(
        docs: Documents,
        state_path: PathBuf,
        sheets: SheetsConfig,
        http: reqwest::Client,
        board: Board,
    ) -> Self {
        Self {
            docs: Arc::new(docs),
            state_path,
            sheets,
            http,
            board: Arc::new(Mutex::new(board)),
        }
    }
}

use crate::models::AppData;
use crate::quotes::Quote;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared handle to the single check-in store and the loaded quote pool.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub quotes: Arc<Vec<Quote>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData, quotes: Vec<Quote>) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            quotes: Arc::new(quotes),
        }
    }
}

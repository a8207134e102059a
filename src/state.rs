use crate::models::ContributionRecord;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub record: Arc<Mutex<ContributionRecord>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, record: ContributionRecord) -> Self {
        Self {
            data_path,
            record: Arc::new(Mutex::new(record)),
        }
    }
}

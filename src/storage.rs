use crate::errors::AppError;
use crate::models::ContributionRecord;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info};

pub fn resolve_data_path() -> PathBuf {
    match env::var("APP_DATA_PATH") {
        Ok(path) => PathBuf::from(path),
        Err(_) => PathBuf::from("data/contribution.json"),
    }
}

pub async fn load_record(path: &Path) -> ContributionRecord {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(record) => record,
            Err(err) => {
                error!("failed to parse data file: {err}");
                ContributionRecord::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no data file at {}, starting from defaults", path.display());
            ContributionRecord::default()
        }
        Err(err) => {
            error!("failed to read data file: {err}");
            ContributionRecord::default()
        }
    }
}

pub async fn persist_record(path: &Path, record: &ContributionRecord) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(record).map_err(AppError::internal)?;
    fs::write(path, payload).await?;
    Ok(())
}

use crate::errors::CheckInError;
use crate::models::AppData;
use crate::quotes::{Quote, default_pool};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, warn};

/// Reads the check-in document. Any failure falls back to the empty default.
pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

/// Writes the whole document through a sibling temp file and a rename, so a
/// reader never sees a half-written file.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), CheckInError> {
    let payload = serde_json::to_vec_pretty(data).map_err(unavailable)?;
    let tmp = temp_path(path);
    fs::write(&tmp, payload).await.map_err(unavailable)?;
    fs::rename(&tmp, path).await.map_err(unavailable)?;
    Ok(())
}

fn unavailable(err: impl std::error::Error) -> CheckInError {
    CheckInError::StorageUnavailable(err.to_string())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Loads the quote pool from a JSON array, or the built-in pool when no
/// path is configured or the file cannot be used.
pub async fn load_quotes(path: Option<&Path>) -> Vec<Quote> {
    let Some(path) = path else {
        return default_pool();
    };
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<Vec<Quote>>(&bytes) {
            Ok(quotes) if !quotes.is_empty() => quotes,
            Ok(_) => {
                warn!("quote file {} is empty, using built-in quotes", path.display());
                default_pool()
            }
            Err(err) => {
                error!("failed to parse quote file: {err}");
                default_pool()
            }
        },
        Err(err) => {
            error!("failed to read quote file: {err}");
            default_pool()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayCheckIn, StreakState};

    fn unique_path(label: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("zenvibe_{label}_{}_{}.json", std::process::id(), nanos));
        path
    }

    #[tokio::test]
    async fn missing_file_loads_default() {
        let data = load_data(&unique_path("missing")).await;
        assert_eq!(data, AppData::default());
    }

    #[tokio::test]
    async fn persisted_data_reloads() {
        let path = unique_path("persist");
        let mut data = AppData::default();
        data.days.insert(
            "2024-01-01".to_string(),
            DayCheckIn {
                morning: true,
                evening: false,
                reflection: "[Morning] hello".to_string(),
            },
        );
        data.streak = StreakState {
            streak: 1,
            last_check_in_date: "2024-01-01".to_string(),
        };

        persist_data(&path, &data).await.unwrap();
        assert!(!temp_path(&path).exists());
        assert_eq!(load_data(&path).await, data);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn corrupt_file_loads_default() {
        let path = unique_path("corrupt");
        std::fs::write(&path, b"{ not json").unwrap();
        assert_eq!(load_data(&path).await, AppData::default());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn partial_document_fills_defaults() {
        let path = unique_path("partial");
        std::fs::write(&path, br#"{"days":{"2024-02-02":{"morning":true}}}"#).unwrap();
        let data = load_data(&path).await;
        let day = &data.days["2024-02-02"];
        assert!(day.morning);
        assert!(!day.evening);
        assert_eq!(day.reflection, "");
        assert_eq!(data.streak, StreakState::default());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn unwritable_path_reports_storage_unavailable() {
        let path = unique_path("dir").join("missing").join("state.json");
        let err = persist_data(&path, &AppData::default()).await.unwrap_err();
        assert!(matches!(err, CheckInError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn quotes_fall_back_to_builtin() {
        assert_eq!(load_quotes(None).await, default_pool());
        let missing = unique_path("quotes");
        assert_eq!(load_quotes(Some(missing.as_path())).await, default_pool());
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::envelope::MapExportData;
use super::error::DocumentError;
use super::import::{import_map_str, ImportResult};
use crate::grid::GRID_SIZE;

/// File extension for map documents.
pub const MAP_FILE_EXTENSION: &str = "json";

/// Summary of a map document read without full validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFileInfo {
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub created: Option<String>,
    pub version: String,
    pub grid_size: i64,
    pub feature_count: usize,
}

/// A map document found on disk.
#[derive(Debug, Clone)]
pub struct MapFileEntry {
    pub path: PathBuf,
    pub file_size: u64,
    pub info: ExportFileInfo,
}

/// Write a document to `path`, creating parent directories.
///
/// The JSON goes to a hidden temporary file first and is renamed into
/// place, so an interrupted write never leaves a truncated map behind.
pub fn export_map_to_file(
    doc: &MapExportData,
    path: &Path,
    pretty: bool,
) -> Result<(), DocumentError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let encoded = if pretty {
        serde_json::to_vec_pretty(doc)?
    } else {
        serde_json::to_vec(doc)?
    };

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| DocumentError::InvalidFormat(path.to_path_buf()))?;
    let tmp = path.with_file_name(format!(".{}.tmp", filename));

    if let Err(e) = fs::write(&tmp, &encoded) {
        let _ = fs::remove_file(&tmp);
        return Err(DocumentError::Io(e));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(DocumentError::Io(e));
    }

    info!(path = %path.display(), bytes = encoded.len(), "Map exported");
    Ok(())
}

/// Read and import a map document. An unreadable file is reported as an
/// import error, like any other bad input.
pub fn import_map_from_file(path: &Path) -> ImportResult {
    match fs::read_to_string(path) {
        Ok(text) => {
            let result = import_map_str(&text);
            info!(
                path = %path.display(),
                success = result.success,
                errors = result.errors.len(),
                warnings = result.warnings.len(),
                "Map file imported"
            );
            result
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read map file");
            ImportResult::failed(format!("Failed to read {}: {}", path.display(), e))
        }
    }
}

/// Check a map file without keeping the document.
pub fn validate_export_file(path: &Path) -> ImportResult {
    let mut result = import_map_from_file(path);
    result.data = None;
    result
}

pub fn get_export_file_info(path: &Path) -> Result<ExportFileInfo, DocumentError> {
    let text = fs::read_to_string(path)?;
    let doc: Value = serde_json::from_str(&text)?;

    let invalid = || DocumentError::InvalidFormat(path.to_path_buf());
    let metadata = doc.get("metadata").and_then(Value::as_object).ok_or_else(invalid)?;
    let map = doc.get("map").and_then(Value::as_object).ok_or_else(invalid)?;

    let text_field = |key: &str| metadata.get(key).and_then(Value::as_str).map(str::to_string);

    Ok(ExportFileInfo {
        name: text_field("name").unwrap_or_default(),
        description: text_field("description"),
        author: text_field("author"),
        created: text_field("created"),
        version: doc
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string(),
        grid_size: map
            .get("gridSize")
            .and_then(Value::as_i64)
            .unwrap_or(i64::from(GRID_SIZE)),
        feature_count: map
            .get("features")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
    })
}

/// List map documents in a directory, newest first by creation time.
///
/// Hidden files (including in-flight temporary writes) are skipped, as are
/// files that cannot be summarised. A missing directory yields an empty list.
pub fn list_map_files(dir: &Path) -> Result<Vec<MapFileEntry>, DocumentError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_none_or(|n| n.starts_with('.'));
        if hidden || path.extension().and_then(|e| e.to_str()) != Some(MAP_FILE_EXTENSION) {
            continue;
        }

        match get_export_file_info(&path) {
            Ok(info) => {
                let file_size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                entries.push(MapFileEntry {
                    path,
                    file_size,
                    info,
                });
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable map file");
            }
        }
    }

    entries.sort_by(|a, b| {
        created_at(b)
            .cmp(&created_at(a))
            .then_with(|| a.path.cmp(&b.path))
    });

    Ok(entries)
}

fn created_at(entry: &MapFileEntry) -> Option<DateTime<Utc>> {
    entry
        .info
        .created
        .as_deref()
        .and_then(|c| DateTime::parse_from_rfc3339(c).ok())
        .map(|c| c.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::envelope::{export_map, ExportOptions};
    use crate::grid::create_default_regions;
    use crate::map::{FeatureType, MapFeature};
    use serde_json::json;
    use tempfile::TempDir;

    fn doc(name: &str) -> MapExportData {
        export_map(
            "game-1",
            name,
            &create_default_regions(),
            &[MapFeature::new(FeatureType::Island, "Isle", 3, 3)],
            ExportOptions {
                author: Some("Anne".to_string()),
                ..ExportOptions::default()
            },
        )
    }

    #[test]
    fn export_then_import_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/charts/map.json");
        let original = doc("Chart");

        export_map_to_file(&original, &path, true).unwrap();
        let result = import_map_from_file(&path);

        assert!(result.success, "errors: {:?}", result.errors);
        assert_eq!(result.data.unwrap().map, original.map);
    }

    #[test]
    fn export_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("map.json");
        export_map_to_file(&doc("Chart"), &path, false).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["map.json"]);
    }

    #[test]
    fn missing_file_is_an_import_error() {
        let dir = TempDir::new().unwrap();
        let result = import_map_from_file(&dir.path().join("absent.json"));
        assert!(!result.success);
        assert!(result.errors[0].starts_with("Failed to read"));
    }

    #[test]
    fn validate_drops_the_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("map.json");
        export_map_to_file(&doc("Chart"), &path, true).unwrap();
        let result = validate_export_file(&path);
        assert!(result.success);
        assert!(result.data.is_none());
    }

    #[test]
    fn file_info_summarises_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("map.json");
        export_map_to_file(&doc("Chart"), &path, true).unwrap();

        let info = get_export_file_info(&path).unwrap();
        assert_eq!(info.name, "Chart");
        assert_eq!(info.author.as_deref(), Some("Anne"));
        assert_eq!(info.version, "1.0.0");
        assert_eq!(info.grid_size, 20);
        assert_eq!(info.feature_count, 1);
        assert!(info.created.is_some());
    }

    #[test]
    fn file_info_defaults_and_rejections() {
        let dir = TempDir::new().unwrap();
        let sparse = dir.path().join("sparse.json");
        fs::write(&sparse, json!({"metadata": {"name": "Bare"}, "map": {}}).to_string()).unwrap();
        let info = get_export_file_info(&sparse).unwrap();
        assert_eq!(info.version, "Unknown");
        assert_eq!(info.grid_size, 20);
        assert_eq!(info.feature_count, 0);

        let no_map = dir.path().join("no_map.json");
        fs::write(&no_map, json!({"metadata": {"name": "Bare"}}).to_string()).unwrap();
        assert!(matches!(
            get_export_file_info(&no_map),
            Err(DocumentError::InvalidFormat(_))
        ));

        let garbage = dir.path().join("garbage.json");
        fs::write(&garbage, "not json").unwrap();
        assert!(matches!(
            get_export_file_info(&garbage),
            Err(DocumentError::Json(_))
        ));
    }

    #[test]
    fn listing_sorts_newest_first_and_skips_junk() {
        let dir = TempDir::new().unwrap();

        let mut older = doc("Older");
        older.metadata.created = "2024-01-01T00:00:00Z".parse().unwrap();
        let mut newer = doc("Newer");
        newer.metadata.created = "2025-06-01T00:00:00Z".parse().unwrap();

        export_map_to_file(&older, &dir.path().join("older.json"), true).unwrap();
        export_map_to_file(&newer, &dir.path().join("newer.json"), true).unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();
        fs::write(dir.path().join(".hidden.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ahoy").unwrap();

        let entries = list_map_files(dir.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.info.name.as_str()).collect();
        assert_eq!(names, vec!["Newer", "Older"]);
        assert!(entries[0].file_size > 0);
    }

    #[test]
    fn listing_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let entries = list_map_files(&dir.path().join("nowhere")).unwrap();
        assert!(entries.is_empty());
    }
}

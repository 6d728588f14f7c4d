//! The versioned map document: export, import, merge, diff and file
//! storage.

pub mod diff;
pub mod envelope;
pub mod error;
pub mod file;
pub mod import;
pub mod merge;

pub use diff::{generate_map_diff, FeatureChange, FeatureDiff, FieldChange, MapDiff};
pub use envelope::{
    export_map, export_to_template, template_to_export, timestamp_now, ExportOptions,
    MapContent, MapExportData, MapMetadata, MapSettings, CURRENT_VERSION, SUPPORTED_VERSIONS,
};
pub use error::DocumentError;
pub use file::{
    export_map_to_file, get_export_file_info, import_map_from_file, list_map_files,
    validate_export_file, ExportFileInfo, MapFileEntry,
};
pub use import::{import_map, import_map_str, ImportResult};
pub use merge::{merge_maps, MergeOptions};

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::ToolConfig;
use crate::document::{
    export_map_to_file, generate_map_diff, get_export_file_info, import_map_from_file,
    list_map_files, merge_maps, template_to_export, validate_export_file, MapExportData,
    MergeOptions,
};
use crate::grid::{
    create_default_regions, create_grid, get_region_bounds, validate_grid, GridPosition,
};
use crate::map::Difficulty;
use crate::templates::{
    all_templates, create_custom_template, get_template, FeatureDensity, WeatherIntensity,
};
use crate::validation::{validate_movement_path, validate_template, ValidationReport};

/// Parse a `x,y` grid position from the command line.
pub fn parse_position(s: &str) -> Result<GridPosition, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", s))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad x in '{}': {}", s, e))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad y in '{}': {}", s, e))?;
    Ok(GridPosition::new(x, y))
}

/// Import a document from disk, failing with every import error when it is
/// not accepted.
pub fn load_document(path: &Path) -> Result<MapExportData> {
    let result = import_map_from_file(path);
    for warning in &result.warnings {
        eprintln!("Warning ({}): {}", path.display(), warning);
    }
    match result.data {
        Some(doc) if result.success => Ok(doc),
        _ => bail!(
            "{} is not a valid map:\n  {}",
            path.display(),
            result.errors.join("\n  ")
        ),
    }
}

/// Write to `output` when given, otherwise print the JSON to stdout.
fn write_or_print(doc: &MapExportData, output: Option<&Path>, pretty: bool) -> Result<()> {
    match output {
        Some(path) => {
            export_map_to_file(doc, path, pretty)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            println!("Map '{}' written to {}", doc.metadata.name, path.display());
        }
        None => {
            let text = if pretty {
                serde_json::to_string_pretty(doc)?
            } else {
                serde_json::to_string(doc)?
            };
            println!("{}", text);
        }
    }
    Ok(())
}

fn print_report(report: &ValidationReport) {
    for error in &report.errors {
        println!("  error: {}", error);
    }
    for warning in &report.warnings {
        println!("  warning: {}", warning);
    }
}

pub fn list_templates() {
    let templates = all_templates();
    println!(
        "{:<20} {:<24} {:<14} {:>8}",
        "Id", "Name", "Difficulty", "Features"
    );
    println!("{}", "-".repeat(69));
    for t in &templates {
        println!(
            "{:<20} {:<24} {:<14} {:>8}",
            t.id,
            t.name,
            t.difficulty,
            t.default_features.len()
        );
    }
    println!("\n{} template(s)", templates.len());
}

pub fn show_template(id: &str) -> Result<()> {
    let template = get_template(id).with_context(|| format!("Unknown template '{}'", id))?;

    println!("=== {} ({}) ===", template.name, template.id);
    println!("{}", template.description);
    println!("Difficulty: {}", template.difficulty);
    println!();
    println!("--- Regions ---");
    for region in &template.regions {
        let w = &region.weather;
        let conditions: Vec<String> = w.conditions.iter().map(|c| c.to_string()).collect();
        println!(
            "  {} {:<16} wind {} {}  visibility {:>3}  [{}]",
            region.id,
            region.name,
            w.wind_direction,
            w.wind_strength,
            w.visibility,
            conditions.join(", ")
        );
    }
    println!();
    println!("--- Features ---");
    for f in &template.default_features {
        println!("  {:<14} {:<20} {}", f.feature_type, f.name, f.position);
    }

    let report = validate_template(&template);
    println!();
    println!(
        "Validation: {} ({} error(s), {} warning(s))",
        if report.is_valid { "ok" } else { "FAILED" },
        report.errors.len(),
        report.warnings.len()
    );
    print_report(&report);
    Ok(())
}

pub fn export_template(
    config: &ToolConfig,
    id: &str,
    output: Option<&Path>,
    author: Option<&str>,
    game_id: Option<&str>,
) -> Result<()> {
    let template = get_template(id).with_context(|| format!("Unknown template '{}'", id))?;
    let author = author.or(config.default_author.as_deref());
    let doc = template_to_export(&template, author, game_id);
    write_or_print(&doc, output, config.pretty_json)
}

pub fn create_custom(
    config: &ToolConfig,
    name: &str,
    difficulty: Difficulty,
    weather: WeatherIntensity,
    density: FeatureDensity,
    output: Option<&Path>,
) -> Result<()> {
    let template = create_custom_template(name, difficulty, weather, density);
    let report = validate_template(&template);
    if !report.is_valid {
        print_report(&report);
        bail!("Generated template '{}' failed validation", template.id);
    }
    let doc = template_to_export(&template, config.default_author.as_deref(), None);
    write_or_print(&doc, output, config.pretty_json)
}

/// Print the import report for a file. Returns whether it was accepted.
pub fn validate_file(path: &Path) -> bool {
    let result = validate_export_file(path);
    println!(
        "{}: {}",
        path.display(),
        if result.success { "valid" } else { "INVALID" }
    );
    for error in &result.errors {
        println!("  error: {}", error);
    }
    for warning in &result.warnings {
        println!("  warning: {}", warning);
    }
    result.success
}

pub fn show_info(path: &Path) -> Result<()> {
    let info = get_export_file_info(path)
        .with_context(|| format!("Cannot read map info from {}", path.display()))?;
    println!("Name:        {}", info.name);
    println!(
        "Description: {}",
        info.description.as_deref().unwrap_or("-")
    );
    println!("Author:      {}", info.author.as_deref().unwrap_or("-"));
    println!("Created:     {}", info.created.as_deref().unwrap_or("-"));
    println!("Version:     {}", info.version);
    println!("Grid size:   {}", info.grid_size);
    println!("Features:    {}", info.feature_count);
    Ok(())
}

pub fn list_files(dir: &Path) -> Result<()> {
    let entries =
        list_map_files(dir).with_context(|| format!("Cannot list {}", dir.display()))?;

    if entries.is_empty() {
        println!("No maps found in {}", dir.display());
        return Ok(());
    }

    println!(
        "{:<28} {:<24} {:<26} {:>8}",
        "File", "Name", "Created", "Size"
    );
    println!("{}", "-".repeat(89));
    for e in &entries {
        let file = e
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("?");
        println!(
            "{:<28} {:<24} {:<26} {:>5} KB",
            file,
            e.info.name,
            e.info.created.as_deref().unwrap_or("-"),
            e.file_size / 1024
        );
    }
    println!("\n{} map(s) in {}", entries.len(), dir.display());
    Ok(())
}

pub fn diff_files(original: &Path, modified: &Path) -> Result<()> {
    let a = load_document(original)?;
    let b = load_document(modified)?;
    let diff = generate_map_diff(&a, &b);
    if diff.is_empty() {
        eprintln!("No differences");
    }
    println!("{}", serde_json::to_string_pretty(&diff)?);
    Ok(())
}

pub fn merge_files(
    config: &ToolConfig,
    base: &Path,
    overlay: &Path,
    output: &Path,
    options: &MergeOptions,
) -> Result<()> {
    let base_doc = load_document(base)?;
    let overlay_doc = load_document(overlay)?;
    let merged = merge_maps(&base_doc, &overlay_doc, options);
    write_or_print(&merged, Some(output), config.pretty_json)
}

/// Check a movement path against a document. Returns whether the path is
/// legal.
pub fn check_path(path: &Path, steps: &[GridPosition]) -> Result<bool> {
    let doc = load_document(path)?;
    let report = validate_movement_path(steps, &doc.map.regions, &doc.map.features);
    println!(
        "Path of {} step(s): {}",
        steps.len(),
        if report.is_valid { "legal" } else { "ILLEGAL" }
    );
    print_report(&report);
    Ok(report.is_valid)
}

pub fn show_grid() -> Result<()> {
    println!("{:<4} {:<16} {:<22} {:<6}", "Id", "Name", "Bounds", "Wind");
    println!("{}", "-".repeat(50));
    for region in create_default_regions() {
        let b = get_region_bounds(region.id)?;
        println!(
            "{:<4} {:<16} {:<22} {:<6}",
            region.id,
            region.name,
            format!("({}, {}) {}x{}", b.x, b.y, b.width, b.height),
            region.weather.wind_direction
        );
    }

    let validation = validate_grid(&create_grid());
    println!();
    if validation.is_valid {
        println!("Grid layout is consistent");
    } else {
        for error in &validation.errors {
            println!("  error: {}", error);
        }
        bail!("Grid layout is inconsistent");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{export_map, ExportOptions};
    use crate::map::{FeatureType, MapFeature};
    use tempfile::TempDir;

    fn write_doc(dir: &Path, file: &str, name: &str, features: &[MapFeature]) -> std::path::PathBuf {
        let doc = export_map("game-1", name, &create_default_regions(), features, ExportOptions::default());
        let path = dir.join(file);
        export_map_to_file(&doc, &path, true).unwrap();
        path
    }

    #[test]
    fn positions_parse() {
        assert_eq!(parse_position("3,4"), Ok(GridPosition::new(3, 4)));
        assert_eq!(parse_position(" 10 , 0 "), Ok(GridPosition::new(10, 0)));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a,4").is_err());
    }

    #[test]
    fn load_document_rejects_invalid_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"version": "9.9.9"}"#).unwrap();
        let err = load_document(&path).unwrap_err().to_string();
        assert!(err.contains("Unsupported version"));
    }

    #[test]
    fn template_export_writes_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("war.json");
        export_template(&ToolConfig::default(), "war-zone", Some(path.as_path()), Some("Anne"), None).unwrap();
        assert!(validate_file(&path));
        let doc = load_document(&path).unwrap();
        assert_eq!(doc.metadata.author.as_deref(), Some("Anne"));
    }

    #[test]
    fn unknown_template_is_an_error() {
        assert!(show_template("atlantis").is_err());
        assert!(export_template(&ToolConfig::default(), "atlantis", None, None, None).is_err());
    }

    #[test]
    fn custom_map_uses_default_author() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.json");
        let config = ToolConfig {
            default_author: Some("Mary Read".to_string()),
            ..ToolConfig::default()
        };
        create_custom(
            &config,
            "Skirmish",
            Difficulty::Advanced,
            WeatherIntensity::Stormy,
            FeatureDensity::Dense,
            Some(path.as_path()),
        )
        .unwrap();
        let doc = load_document(&path).unwrap();
        assert_eq!(doc.metadata.name, "Skirmish");
        assert_eq!(doc.metadata.author.as_deref(), Some("Mary Read"));
    }

    #[test]
    fn merge_writes_combined_map() {
        let dir = TempDir::new().unwrap();
        let base = write_doc(dir.path(), "base.json", "Base", &[MapFeature::new(FeatureType::Island, "A", 2, 2)]);
        let overlay = write_doc(dir.path(), "overlay.json", "Overlay", &[MapFeature::new(FeatureType::FogBank, "B", 9, 9)]);
        let output = dir.path().join("merged.json");

        merge_files(&ToolConfig::default(), &base, &overlay, &output, &MergeOptions::default()).unwrap();
        let merged = load_document(&output).unwrap();
        assert_eq!(merged.metadata.name, "Base + Overlay");
        assert_eq!(merged.map.features.len(), 2);
        diff_files(&base, &output).unwrap();
    }

    #[test]
    fn path_check_reports_islands() {
        let dir = TempDir::new().unwrap();
        let map = write_doc(dir.path(), "map.json", "Isles", &[MapFeature::new(FeatureType::Island, "Rock", 1, 1)]);
        let legal = check_path(&map, &[GridPosition::new(0, 0), GridPosition::new(1, 0)]).unwrap();
        assert!(legal);
        let blocked = check_path(&map, &[GridPosition::new(0, 0), GridPosition::new(1, 1)]).unwrap();
        assert!(!blocked);
    }

    #[test]
    fn grid_layout_is_consistent() {
        show_grid().unwrap();
    }
}

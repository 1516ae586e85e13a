use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Size;
use crate::units::{to_cells, validate_cell_size};

/// Settings shared by every placement call on one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Container size in pixels.
    pub container: Size,
    /// Grid cell edge in pixels (the snapping area).
    pub cell_size: u32,
    /// Target used for structured log events.
    pub log_target: String,
    /// Target used when emitting metrics snapshots.
    pub metrics_target: String,
    /// JSON-lines log file; when set the engine logs there unless a logger is attached.
    pub log_file: Option<PathBuf>,
    /// Size at which the log file rolls over to `<log_file>.1`. Zero never rolls.
    pub log_max_bytes: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            container: Size::new(800, 600),
            cell_size: 50,
            log_target: "snapgrid::engine".to_string(),
            metrics_target: "snapgrid::metrics".to_string(),
            log_file: None,
            log_max_bytes: 1024 * 1024,
        }
    }
}

impl EngineConfig {
    pub fn new(container: Size, cell_size: u32) -> Self {
        Self {
            container,
            cell_size,
            ..Self::default()
        }
    }

    /// Parse a JSON document; missing keys fall back to the defaults.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// A container smaller than one cell is allowed; it simply has no slots.
    pub fn validate(&self) -> Result<()> {
        validate_cell_size(self.cell_size)
    }

    /// Grid dimensions as (rows, cols).
    pub fn grid_dimensions(&self) -> (usize, usize) {
        (
            to_cells(self.container.height, self.cell_size),
            to_cells(self.container.width, self.cell_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_dimensions(), (12, 16));
    }

    #[test]
    fn json_fills_missing_keys() {
        let config =
            EngineConfig::from_json_str(r#"{"container":{"width":400,"height":400},"cell_size":25}"#)
                .unwrap();
        assert_eq!(config.grid_dimensions(), (16, 16));
        assert_eq!(config.log_target, "snapgrid::engine");
        assert_eq!(config.metrics_target, "snapgrid::metrics");
        assert_eq!(config.log_file, None);
        assert_eq!(config.log_max_bytes, 1024 * 1024);
    }

    #[test]
    fn json_sets_log_file_and_rollover() {
        let config = EngineConfig::from_json_str(
            r#"{"log_file":"/tmp/snapgrid.jsonl","log_max_bytes":4096,"metrics_target":"ui::metrics"}"#,
        )
        .unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/snapgrid.jsonl")));
        assert_eq!(config.log_max_bytes, 4096);
        assert_eq!(config.metrics_target, "ui::metrics");
    }

    #[test]
    fn zero_cell_size_is_invalid() {
        let err = EngineConfig::from_json_str(r#"{"cell_size":0}"#).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidDimension(_)));
    }

    #[test]
    fn container_smaller_than_a_cell_has_empty_grid() {
        let config = EngineConfig::new(Size::new(40, 400), 50);
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_dimensions(), (8, 0));
    }

    #[test]
    fn negative_values_fail_to_parse() {
        let err = EngineConfig::from_json_str(r#"{"cell_size":-5}"#).unwrap_err();
        assert!(matches!(err, LayoutError::Config(_)));
    }

    #[test]
    fn from_path_reads_file() {
        let path = std::env::temp_dir().join(format!("snapgrid-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"cell_size":100}"#).unwrap();
        let config = EngineConfig::from_path(&path).unwrap();
        assert_eq!(config.cell_size, 100);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(
            EngineConfig::from_path(path.with_extension("missing")),
            Err(LayoutError::Io(_))
        ));
    }
}

//! Saved label settings and the store that keeps them between sessions

use crate::Result;
use crate::error::ValidationError;
use crate::geometry::{LabelGeometry, Margins};
use crate::input::InputFormat;
use crate::job::LabelJob;
use crate::layout::PageLayoutPolicy;
use crate::profile::PrinterProfile;
use crate::style::Typography;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Which page layout policy a settings record selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    #[default]
    PerRow,
    Grid,
}

/// Flat, serializable form of everything a job needs except its identifiers.
///
/// Lengths are millimetres and font sizes points. Missing fields take the
/// defaults for the thermal printer's 150x100 stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    pub label_width: f32,
    pub printable_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub font_family: String,
    pub font_size: f32,
    pub bold: bool,
    pub auto_size: bool,
    pub lines_per_label: u32,
    pub labels_per_row: u32,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub page_margin_top: f32,
    pub page_margin_left: f32,
    pub show_border: bool,
    pub layout: LayoutKind,
    pub profile: PrinterProfile,
    pub input_format: InputFormat,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            label_width: 150.0,
            printable_height: 100.0,
            margin_top: 2.0,
            margin_bottom: 2.0,
            margin_left: 3.0,
            margin_right: 3.0,
            font_family: "Arial".to_string(),
            font_size: 6.0,
            bold: true,
            auto_size: false,
            lines_per_label: 4,
            labels_per_row: 4,
            horizontal_spacing: 155.0,
            vertical_spacing: 45.72,
            page_margin_top: 0.0,
            page_margin_left: 0.0,
            show_border: false,
            layout: LayoutKind::PerRow,
            profile: PrinterProfile::default(),
            input_format: InputFormat::Manual,
        }
    }
}

impl LabelSettings {
    pub fn geometry(&self) -> LabelGeometry {
        LabelGeometry::new(self.label_width, self.printable_height).with_margins(Margins {
            top: self.margin_top,
            right: self.margin_right,
            bottom: self.margin_bottom,
            left: self.margin_left,
        })
    }

    pub fn typography(&self) -> Typography {
        Typography::new(self.font_family.clone(), self.font_size)
            .bold(self.bold)
            .auto_size(self.auto_size)
    }

    pub fn layout_policy(&self) -> PageLayoutPolicy {
        match self.layout {
            LayoutKind::PerRow => {
                PageLayoutPolicy::per_row(self.labels_per_row, self.horizontal_spacing)
            }
            LayoutKind::Grid => PageLayoutPolicy::grid(
                self.labels_per_row,
                self.horizontal_spacing,
                self.vertical_spacing,
            )
            .with_page_margins(self.page_margin_top, self.page_margin_left),
        }
    }

    /// Build a validated job printing `pairs` with these settings
    pub fn to_job<I, S>(&self, pairs: I) -> std::result::Result<LabelJob, ValidationError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        LabelJob::builder()
            .labels(pairs)
            .geometry(self.geometry())
            .typography(self.typography())
            .layout(self.layout_policy())
            .profile(self.profile)
            .lines_per_label(self.lines_per_label)
            .show_border(self.show_border)
            .build()
    }
}

/// Named settings records that outlive a session
pub trait ProfileStore {
    fn load(&self, name: &str) -> Result<Option<LabelSettings>>;

    /// Insert or replace the record called `name`
    fn save(&mut self, name: &str, settings: &LabelSettings) -> Result<()>;

    /// Remove a record; returns whether it existed
    fn delete(&mut self, name: &str) -> Result<bool>;

    /// Stored names in sorted order
    fn names(&self) -> Result<Vec<String>>;
}

/// Settings records kept as a single JSON object of name to record.
///
/// A missing or unreadable file reads as an empty store; it is created on the
/// first save.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, LabelSettings> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                debug!("No profiles at {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!(
                "Ignoring unreadable profile file {}: {}",
                self.path.display(),
                e
            );
            BTreeMap::new()
        })
    }

    fn write_all(&self, records: &BTreeMap<String, LabelSettings>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json)?;
        debug!("Saved {} profiles to {}", records.len(), self.path.display());
        Ok(())
    }
}

impl ProfileStore for JsonProfileStore {
    fn load(&self, name: &str) -> Result<Option<LabelSettings>> {
        Ok(self.read_all().remove(name))
    }

    fn save(&mut self, name: &str, settings: &LabelSettings) -> Result<()> {
        let mut records = self.read_all();
        records.insert(name.to_string(), settings.clone());
        self.write_all(&records)
    }

    fn delete(&mut self, name: &str) -> Result<bool> {
        let mut records = self.read_all();
        if records.remove(name).is_none() {
            return Ok(false);
        }
        self.write_all(&records)?;
        Ok(true)
    }

    fn names(&self) -> Result<Vec<String>> {
        Ok(self.read_all().into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ThermalTopOffset;

    #[test]
    fn test_defaults_build_a_job() {
        let job = LabelSettings::default().to_job(vec![("W-1", 2)]).unwrap();
        assert_eq!(job.total_labels(), 2);
        assert_eq!(job.geometry(), &LabelGeometry::default());
        assert_eq!(job.typography().font_size, 6.0);
        assert!(job.border().is_none());
    }

    #[test]
    fn test_partial_record_uses_defaults() {
        let settings: LabelSettings =
            serde_json::from_str(r#"{"label_width": 76.2, "layout": "grid", "profile": "standard"}"#)
                .unwrap();
        assert_eq!(settings.label_width, 76.2);
        assert_eq!(settings.printable_height, 100.0);
        assert_eq!(settings.profile, PrinterProfile::Standard);
        assert!(matches!(
            settings.layout_policy(),
            PageLayoutPolicy::GridPage { vertical_spacing, .. } if vertical_spacing == 45.72
        ));
    }

    #[test]
    fn test_to_job_reports_invalid_settings() {
        let settings = LabelSettings {
            labels_per_row: 0,
            ..Default::default()
        };
        assert_eq!(
            settings.to_job(vec![("A", 1)]).unwrap_err(),
            ValidationError::ZeroCount("labels per row")
        );
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonProfileStore::new(dir.path().join("profiles").join("labels.json"));
        assert!(store.names().unwrap().is_empty());

        let sato = LabelSettings {
            profile: PrinterProfile::Thermal {
                top_offset: ThermalTopOffset::FromMarginTop,
            },
            ..Default::default()
        };
        let office = LabelSettings {
            layout: LayoutKind::Grid,
            profile: PrinterProfile::Standard,
            ..Default::default()
        };
        store.save("sato", &sato).unwrap();
        store.save("office", &office).unwrap();

        assert_eq!(store.names().unwrap(), vec!["office", "sato"]);
        assert_eq!(store.load("sato").unwrap(), Some(sato));
        assert_eq!(store.load("missing").unwrap(), None);

        assert!(store.delete("office").unwrap());
        assert!(!store.delete("office").unwrap());
        assert_eq!(store.names().unwrap(), vec!["sato"]);
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        std::fs::write(&path, "not json").unwrap();

        let mut store = JsonProfileStore::new(&path);
        assert!(store.names().unwrap().is_empty());
        store.save("one", &LabelSettings::default()).unwrap();
        assert_eq!(store.names().unwrap(), vec!["one"]);
    }
}

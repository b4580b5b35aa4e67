/// Offline processor: raw rig captures → the CSV files the loaders fetch.
///
/// ```text
///  <source_dir>/<switch>/*.csv      (one raw capture per switch)
///        │
///        ▼
///   ┌──────────┐
///   │ capture   │  split strokes, zero correction, peak estimate
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ export    │  <switch>.downstroke.csv / <switch>.upstroke.csv
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ meta      │  reconcile switchmeta.csv with switches found
///   └──────────┘
/// ```

pub mod capture;
pub mod export;
pub mod meta;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use capture::read_capture;
use export::export_curves;
use meta::{merge_switch_meta, read_switch_meta_file, write_switch_meta_file};

/// Exports of the rig that duplicate the regular capture at a higher
/// sample rate. The misspelling exists in the source data.
const SKIPPED_SUFFIXES: [&str; 3] = [
    "HighResolutionRaw.csv",
    "HighResoultionRaw.csv",
    "HighResolution.csv",
];

#[derive(Debug, Default)]
pub struct ProcessReport {
    /// Switches exported, in directory order.
    pub processed: Vec<String>,
    /// Switch directories without a usable capture.
    pub skipped: Vec<String>,
}

/// First regular capture file in `dir`, by file name.
pub fn pick_capture_file(dir: &Path) -> Result<Option<PathBuf>> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            let Some(file_name) = path.file_name().and_then(|f| f.to_str()) else {
                return false;
            };
            file_name.ends_with(".csv")
                && !SKIPPED_SUFFIXES.iter().any(|s| file_name.ends_with(s))
        })
        .collect();

    candidates.sort();
    Ok(candidates.into_iter().next())
}

/// Process every switch directory under `source_dir`, write curve CSVs into
/// `output_dir`, and rewrite `meta_path` to list exactly the switches found.
pub fn process_directory(source_dir: &Path, output_dir: &Path, meta_path: &Path) -> Result<ProcessReport> {
    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("creating {}", output_dir.display()))?;
        log::info!("Created CSV output directory {}", output_dir.display());
    }

    let mut switch_dirs: Vec<(String, PathBuf)> = std::fs::read_dir(source_dir)
        .with_context(|| format!("listing {}", source_dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            (!name.starts_with('.')).then(|| (name, entry.path()))
        })
        .collect();
    switch_dirs.sort();

    let mut report = ProcessReport::default();

    for (name, dir) in switch_dirs {
        let Some(capture_path) = pick_capture_file(&dir)? else {
            log::debug!("{name}: no capture file, skipping");
            report.skipped.push(name);
            continue;
        };
        log::info!("{name}: reading {}", capture_path.display());

        let file = File::open(&capture_path)
            .with_context(|| format!("opening {}", capture_path.display()))?;
        let data = read_capture(file, &name)?;
        export_curves(output_dir, &data)?;

        report.processed.push(name);
    }

    let existing = read_switch_meta_file(meta_path)?;
    let merged = merge_switch_meta(&existing, &report.processed);
    write_switch_meta_file(meta_path, &merged)?;

    log::info!(
        "Processed {} switches, skipped {}",
        report.processed.len(),
        report.skipped.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::data::model::SwitchMeta;
    use crate::data::parse::parse_curve;
    use crate::data::source::Stroke;

    const CAPTURE: &str = "\
Index,Force,Time,Displacement,Speed,Status
1,3.0,0,1.0,0,OK
2,50.0,0,2.0,0,OK
3,60.0,0,3.0,0,OK
4,40.0,0,2.5,0,OK
5,10.0,0,1.5,0,OK
";

    #[test]
    fn pick_skips_high_resolution_exports() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A HighResolutionRaw.csv"), "").unwrap();
        fs::write(dir.path().join("B Raw Data.csv"), "").unwrap();
        fs::write(dir.path().join("C Raw Data.csv"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let picked = pick_capture_file(dir.path()).unwrap().unwrap();
        assert_eq!(picked.file_name().unwrap(), "B Raw Data.csv");
    }

    #[test]
    fn pick_returns_none_without_captures() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("X HighResoultionRaw.csv"), "").unwrap();
        assert!(pick_capture_file(dir.path()).unwrap().is_none());
    }

    #[test]
    fn processes_a_source_tree() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("force-curves");
        let output = root.path().join("csv_output");
        let meta_path = root.path().join("switchmeta.csv");

        for name in ["Gateron Yellow", "Holy Panda"] {
            fs::create_dir_all(source.join(name)).unwrap();
            fs::write(source.join(name).join(format!("{name} Raw Data.csv")), CAPTURE).unwrap();
        }
        fs::create_dir_all(source.join("Empty")).unwrap();
        fs::create_dir_all(source.join(".git")).unwrap();
        fs::write(source.join("README.md"), "").unwrap();
        fs::write(&meta_path, "Holy Panda,tactile\nRetired,linear\n").unwrap();

        let report = process_directory(&source, &output, &meta_path).unwrap();
        assert_eq!(report.processed, ["Gateron Yellow", "Holy Panda"]);
        assert_eq!(report.skipped, ["Empty"]);

        let down = fs::read_to_string(export::curve_file(&output, "Holy Panda", Stroke::Down)).unwrap();
        let down = parse_curve(&down).unwrap();
        assert_eq!(down.len(), 4);
        assert_eq!(down.data[2].x, 2.0);

        let up = fs::read_to_string(export::curve_file(&output, "Holy Panda", Stroke::Up)).unwrap();
        let up = parse_curve(&up).unwrap();
        assert_eq!(up.data.iter().map(|p| p.x).collect::<Vec<_>>(), [0.5, 1.5]);

        assert_eq!(
            read_switch_meta_file(&meta_path).unwrap(),
            vec![
                SwitchMeta::new("Gateron Yellow", None),
                SwitchMeta::new("Holy Panda", Some("tactile".into())),
            ]
        );
    }
}

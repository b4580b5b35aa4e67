use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;

use crate::data::model::SwitchMeta;
use crate::data::parse::parse_switch_meta;

/// Existing `switchmeta.csv`, or an empty list if there is none yet.
pub fn read_switch_meta_file(path: &Path) -> Result<Vec<SwitchMeta>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let body = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_switch_meta(&body).with_context(|| format!("parsing {}", path.display()))
}

/// Always two columns; an unknown type is written as an empty cell.
pub fn write_switch_meta_file(path: &Path, metas: &[SwitchMeta]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for meta in metas {
        writer.write_record([meta.name.as_str(), meta.switch_type.as_deref().unwrap_or("")])?;
    }
    writer.flush()?;
    Ok(())
}

/// One record per switch found on disk, in `found` order. Types are carried
/// over from `existing`; switches no longer on disk are dropped.
pub fn merge_switch_meta(existing: &[SwitchMeta], found: &[String]) -> Vec<SwitchMeta> {
    found
        .iter()
        .map(|name| {
            let meta = existing
                .iter()
                .find(|m| &m.name == name)
                .cloned()
                .unwrap_or_else(|| SwitchMeta::new(name.as_str(), None));
            if meta.switch_type.is_none() {
                log::warn!("Switch type missing for switch {name}");
            }
            meta
        })
        .collect()
}

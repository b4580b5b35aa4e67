use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::WriterBuilder;

use super::capture::SwitchData;
use crate::data::model::SwitchCurve;
use crate::data::source::Stroke;

/// Write one `x,y` row per point with four decimals.
pub fn write_curve<W: Write>(output: W, curve: &SwitchCurve) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);
    for p in &curve.data {
        writer.write_record([format!("{:.4}", p.x), format!("{:.4}", p.y)])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn curve_file(dir: &Path, name: &str, stroke: Stroke) -> PathBuf {
    dir.join(format!("{name}.{stroke}.csv"))
}

/// Write `<name>.downstroke.csv` and `<name>.upstroke.csv` into `dir`.
pub fn export_curves(dir: &Path, data: &SwitchData) -> Result<()> {
    for (stroke, curve) in [(Stroke::Down, &data.downstroke), (Stroke::Up, &data.upstroke)] {
        let path = curve_file(dir, &data.name, stroke);
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        write_curve(file, curve).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

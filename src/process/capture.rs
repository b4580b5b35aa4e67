use std::io::Read;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::data::model::SwitchCurve;

/// Force (gf) above which the plunger is taken to have started moving.
const ZERO_FORCE_THRESHOLD: f64 = 2.0;

/// Distance (mm) before bottom-out at which the peak is estimated.
const PEAK_BACKOFF: f64 = 0.2;

const FORCE_COL: usize = 1;
const DISPLACEMENT_COL: usize = 3;
const STATUS_COL: usize = 5;

// ---------------------------------------------------------------------------
// SwitchData – one processed capture
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchData {
    pub name: String,
    /// Highest force seen before the last 0.2 mm of travel.
    pub peak_weight_estimate: Option<f64>,
    pub max_displacement: f64,
    pub downstroke: SwitchCurve,
    /// Increasing-x order, like the downstroke.
    pub upstroke: SwitchCurve,
}

// ---------------------------------------------------------------------------
// Raw capture reader
// ---------------------------------------------------------------------------

/// Split a raw rig capture into down- and upstroke curves.
///
/// Rows whose first column is not an integer are preamble and skipped.
/// Only rows with status `OK` carry data. Displacements are shifted so
/// that zero is where the force first exceeds 2 gf.
pub fn read_capture<R: Read>(input: R, name: &str) -> Result<SwitchData> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut down: Vec<(f64, f64)> = Vec::new();
    let mut up: Vec<(f64, f64)> = Vec::new();
    let mut max_x = 0.0_f64;
    let mut reversed = false;
    let mut correction: Option<f64> = None;
    let mut points_read = 0usize;

    for (n, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("{name}: CSV record {n}"))?;

        let is_data = record
            .get(0)
            .is_some_and(|c| c.trim().parse::<i64>().is_ok());
        if !is_data {
            continue;
        }
        points_read += 1;

        if record.get(STATUS_COL).map(str::trim) != Some("OK") {
            continue;
        }
        let displacement = cell(&record, DISPLACEMENT_COL, name, n)?;
        let weight = cell(&record, FORCE_COL, name, n)?;

        let zero = match correction {
            Some(c) => c,
            None if !reversed && weight > ZERO_FORCE_THRESHOLD => {
                correction = Some(displacement);
                displacement
            }
            None => continue,
        };
        let x = displacement - zero;

        if !reversed {
            down.push((x, weight));
            if x >= max_x {
                max_x = x;
            } else {
                reversed = true;
            }
        }
        if reversed && x >= 0.0 {
            up.push((x, weight));
        }
    }

    let Some(&(max_displacement, _)) = down.last() else {
        bail!("{name}: no downstroke data in capture");
    };
    up.reverse();

    let downstroke = SwitchCurve::from_points(down);
    let upstroke = SwitchCurve::from_points(up);
    let peak_weight_estimate = peak_estimate(&downstroke);

    log::info!(
        "{name}: {points_read} data points read, {} ignored",
        points_read.saturating_sub(downstroke.len() + upstroke.len())
    );
    log::info!("{name}: correction from zero: {correction:?}");
    log::info!("{name}: estimated peak {peak_weight_estimate:?}");

    Ok(SwitchData {
        name: name.to_string(),
        peak_weight_estimate,
        max_displacement,
        downstroke,
        upstroke,
    })
}

fn cell(record: &csv::StringRecord, col: usize, name: &str, n: usize) -> Result<f64> {
    let raw = record
        .get(col)
        .with_context(|| format!("{name}, record {n}: missing column {col}"))?;
    raw.trim()
        .parse::<f64>()
        .with_context(|| format!("{name}, record {n}: '{raw}' is not a number"))
}

/// Peak force before bottom-out.
///
/// Walks back from the last point to the first one more than 0.2 mm short
/// of it, then takes the max force of everything before that point.
/// `None` when the curve never spans 0.2 mm.
pub fn peak_estimate(downstroke: &SwitchCurve) -> Option<f64> {
    let last_x = downstroke.last()?.x;
    let cutoff = downstroke
        .data
        .iter()
        .rposition(|p| p.x < last_x - PEAK_BACKOFF)?;

    downstroke.data[..cutoff]
        .iter()
        .map(|p| p.y)
        .reduce(f64::max)
}

use csv::{ReaderBuilder, StringRecord};

use super::error::{LoadError, Result};
use super::model::{SwitchCurve, SwitchMeta};

// ---------------------------------------------------------------------------
// Header-less CSV bodies
// ---------------------------------------------------------------------------

/// Every row of a header-less CSV body with its 1-based file line. Blank
/// lines are skipped by the reader and rows may have differing widths.
fn records(body: &str) -> Result<Vec<(u64, StringRecord)>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    reader
        .records()
        .map(|r| -> Result<(u64, StringRecord)> {
            let record = r?;
            Ok((line_of(body, &record), record))
        })
        .collect()
}

/// The reader may report a record as starting on the blank lines it
/// skipped, so step over line terminators before counting.
fn line_of(body: &str, record: &StringRecord) -> u64 {
    let Some(pos) = record.position() else {
        return 0;
    };
    let bytes = body.as_bytes();
    let mut start = (pos.byte() as usize).min(bytes.len());
    while start < bytes.len() && matches!(bytes[start], b'\n' | b'\r') {
        start += 1;
    }
    1 + bytes[..start].iter().filter(|&&b| b == b'\n').count() as u64
}

/// `switchmeta.csv`: column 0 is the name, column 1 the type. The type is
/// only read when the row has exactly two columns.
pub fn parse_switch_meta(body: &str) -> Result<Vec<SwitchMeta>> {
    records(body)?
        .iter()
        .map(|(line, record)| {
            let name = record.get(0).ok_or(LoadError::MissingColumn {
                line: *line,
                column: 0,
            })?;
            let switch_type = match record.len() {
                2 => record.get(1).map(str::to_string),
                _ => None,
            };
            Ok(SwitchMeta::new(name, switch_type))
        })
        .collect()
}

/// `<name>.<stroke>.csv`: `x,y` per row, file order preserved.
pub fn parse_curve(body: &str) -> Result<SwitchCurve> {
    let points = records(body)?
        .iter()
        .map(|(line, record)| Ok((number(record, *line, 0)?, number(record, *line, 1)?)))
        .collect::<Result<Vec<_>>>()?;

    Ok(SwitchCurve::from_points(points))
}

fn number(record: &StringRecord, line: u64, column: usize) -> Result<f64> {
    let cell = record
        .get(column)
        .ok_or(LoadError::MissingColumn { line, column })?;

    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .ok_or_else(|| LoadError::InvalidNumber {
            line,
            column,
            value: cell.to_string(),
        })
}

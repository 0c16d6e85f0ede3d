// src/io/reporting.rs

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::simulation::engine::DayRecord;

/// Writes a simulated day-by-day trace to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/baseline.csv").
/// * `data` - The records produced by the policy simulation.
pub fn write_trace_csv(file_path: impl AsRef<Path>, data: &[DayRecord]) -> Result<()> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in data {
        wtr.serialize(record)?;
    }

    wtr.flush()
        .map_err(|e| Error::io(format!("flush {}", path.display()), e))?;

    tracing::info!(rows = data.len(), path = %path.display(), "exported trace");
    Ok(())
}

/// Writes any report as pretty-printed JSON.
pub fn write_json<T: Serialize>(file_path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = file_path.as_ref();
    let file = File::create(path).map_err(|e| Error::io(format!("create {}", path.display()), e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;

    tracing::info!(path = %path.display(), "exported report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32) -> DayRecord {
        DayRecord {
            day,
            opening_stock: 10.0,
            order_qty: 0.0,
            demand: 4.0,
            fulfilled: 4.0,
            stockout: 0.0,
            ending_stock: 6.0,
            day_cost: 6.0,
            cumulative_cost: 6.0 * day as f64,
        }
    }

    #[test]
    fn trace_csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.csv");

        write_trace_csv(&path, &[record(1), record(2)]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("day,opening_stock,order_qty,demand"));
    }

    #[test]
    fn json_report_round_trips_through_serde_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_json(&path, &record(3)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["day"], 3);
        assert_eq!(value["cumulative_cost"], 18.0);
    }
}

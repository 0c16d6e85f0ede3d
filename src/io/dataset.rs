// src/io/dataset.rs

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::DemandProfile;

/// Column-name fragments that identify a demand series, in priority order.
pub const DEMAND_KEYWORDS: [&str; 5] = ["demand", "sales", "quantity", "units_sold", "qty"];

/// Column-name fragments that identify an on-hand stock series, in priority order.
pub const STOCK_KEYWORDS: [&str; 4] = ["stock", "inventory", "current_stock", "on_hand"];

/// A named column of raw cells. Empty strings stand for missing values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<String>,
}

impl Column {
    /// Parseable, finite values in row order; everything else is skipped.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.cells.iter().filter_map(|c| parse_cell(c)).collect()
    }

    /// A column is numeric if it has data and every non-empty cell parses.
    pub fn is_numeric(&self) -> bool {
        let mut seen = false;
        for cell in &self.cells {
            if cell.trim().is_empty() {
                continue;
            }
            if parse_cell(cell).is_none() {
                return false;
            }
            seen = true;
        }
        seen
    }
}

/// Rectangular table handed over by the ingestion layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.cells.len();
            if let Some(bad) = columns.iter().find(|c| c.cells.len() != rows) {
                return Err(Error::dataset(format!(
                    "column '{}' has {} rows, expected {}",
                    bad.name,
                    bad.cells.len(),
                    rows
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Reads a headed CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = csv::Reader::from_path(path.as_ref())?;
        Self::from_csv_reader(reader)
    }

    pub fn from_csv_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let mut columns: Vec<Column> = headers
            .iter()
            .map(|name| Column {
                name: name.to_string(),
                cells: Vec::new(),
            })
            .collect();

        // The csv reader rejects ragged rows on its own.
        for record in reader.records() {
            let record = record?;
            for (column, cell) in columns.iter_mut().zip(record.iter()) {
                column.cells.push(cell.to_string());
            }
        }

        Ok(Self { columns })
    }

    /// Builds a table from JSON records (`[{"sales": 10, ...}, ...]`).
    ///
    /// Column order follows first appearance; keys missing from a record
    /// become empty cells.
    pub fn from_json_records(records: &[Map<String, Value>]) -> Result<Self> {
        let mut names: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !names.iter().any(|n| n == key) {
                    names.push(key.clone());
                }
            }
        }

        let columns = names
            .into_iter()
            .map(|name| {
                let cells = records
                    .iter()
                    .map(|record| record.get(&name).map(json_cell).unwrap_or_default())
                    .collect();
                Column { name, cells }
            })
            .collect();

        Ok(Self { columns })
    }

    /// Parses a JSON document holding an array of records.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        let Value::Array(items) = value else {
            return Err(Error::dataset("expected a JSON array of records"));
        };

        let mut records = Vec::with_capacity(items.len());
        for (row, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(map) => records.push(map),
                other => {
                    return Err(Error::dataset(format!(
                        "row {row} is {other}, expected an object"
                    )))
                }
            }
        }
        Self::from_json_records(&records)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.cells.len()).unwrap_or(0)
    }

    /// First column whose lowercased name contains one of `keywords`,
    /// trying keywords in order.
    pub fn find_by_keywords(&self, keywords: &[&str]) -> Option<&Column> {
        keywords.iter().find_map(|keyword| {
            let keyword = keyword.to_lowercase();
            self.columns
                .iter()
                .find(|c| c.name.to_lowercase().contains(&keyword))
        })
    }

    pub fn first_numeric(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.is_numeric())
    }

    /// Picks the demand series by name, else the first numeric column.
    pub fn demand_column(&self) -> Result<&Column> {
        let column = self
            .find_by_keywords(&DEMAND_KEYWORDS)
            .or_else(|| self.first_numeric())
            .ok_or(Error::NoDemandSeries)?;
        tracing::debug!(column = %column.name, "selected demand column");
        Ok(column)
    }

    /// Demand observations (missing cells dropped) and current stock.
    pub fn demand_profile(&self) -> Result<DemandProfile> {
        let column = self.demand_column()?;
        let observations = column.numeric_values();
        if observations.is_empty() {
            return Err(Error::EmptyDemandSeries {
                column: column.name.clone(),
            });
        }

        let stock = self
            .find_by_keywords(&STOCK_KEYWORDS)
            .and_then(|c| c.numeric_values().last().copied());

        match stock {
            Some(stock) => DemandProfile::new(observations, stock),
            None => {
                let profile = DemandProfile::with_default_stock(observations)?;
                tracing::warn!(
                    current_stock = profile.current_stock(),
                    "no stock column found, assuming twice the mean demand"
                );
                Ok(profile)
            }
        }
    }
}

fn parse_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn json_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn column(name: &str, cells: &[&str]) -> Column {
        Column {
            name: name.to_string(),
            cells: cells.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn demand_keyword_beats_column_order() {
        let ds = Dataset::from_columns(vec![
            column("price", &["1", "2"]),
            column("Units_Sold", &["5", "7"]),
        ])
        .unwrap();
        assert_eq!(ds.demand_column().unwrap().name, "Units_Sold");
    }

    #[test]
    fn falls_back_to_first_numeric_column() {
        let ds = Dataset::from_columns(vec![
            column("date", &["2024-01-01", "2024-01-02"]),
            column("value", &["3", ""]),
        ])
        .unwrap();
        let profile = ds.demand_profile().unwrap();
        assert_eq!(profile.observations(), &[3.0]);
        assert_eq!(profile.current_stock(), 6.0);
    }

    #[test]
    fn no_numeric_column_is_an_input_error() {
        let ds = Dataset::from_columns(vec![column("note", &["a", "b"])]).unwrap();
        assert!(matches!(ds.demand_profile(), Err(Error::NoDemandSeries)));
    }

    #[test]
    fn matched_but_empty_demand_column_is_an_input_error() {
        let ds = Dataset::from_columns(vec![column("sales", &["", "n/a"])]).unwrap();
        let err = ds.demand_profile().unwrap_err();
        assert!(matches!(err, Error::EmptyDemandSeries { ref column } if column == "sales"));
    }

    #[test]
    fn stock_is_last_value_of_stock_column() {
        let ds = Dataset::from_columns(vec![
            column("sales", &["10", "12", "14"]),
            column("on_hand", &["40", "35", ""]),
        ])
        .unwrap();
        assert_eq!(ds.demand_profile().unwrap().current_stock(), 35.0);
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let err = Dataset::from_columns(vec![column("a", &["1"]), column("b", &[])]).unwrap_err();
        assert!(matches!(err, Error::Dataset { .. }));
    }

    #[test]
    fn json_records_become_columns() {
        let raw = json!([
            {"date": "2024-01-01", "sales": 10, "current_stock": 50},
            {"date": "2024-01-02", "sales": null, "current_stock": 45},
            {"date": "2024-01-03", "sales": 14}
        ])
        .to_string();

        let ds = Dataset::from_json_str(&raw).unwrap();
        assert_eq!(ds.row_count(), 3);

        let profile = ds.demand_profile().unwrap();
        assert_eq!(profile.observations(), &[10.0, 14.0]);
        assert_eq!(profile.current_stock(), 45.0);
    }

    #[test]
    fn csv_input_is_read_by_header() {
        let data = "day,qty,inventory\n1,4,20\n2,6,16\n";
        let reader = csv::Reader::from_reader(data.as_bytes());
        let ds = Dataset::from_csv_reader(reader).unwrap();

        let profile = ds.demand_profile().unwrap();
        assert_eq!(profile.observations(), &[4.0, 6.0]);
        assert_eq!(profile.current_stock(), 16.0);
    }
}

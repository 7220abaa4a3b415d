// Season record loading.
//
// Reads per-season player rows from CSV (header row required) or from a JSON
// array of objects. Malformed rows are logged and skipped; only unreadable
// files or a missing identity column fail the load.

use careerline_core::record::{FieldValue, RawRecord, SeasonYear};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const NAME_COLUMN: &str = "name";
const YEAR_COLUMN: &str = "year";
const TEAM_COLUMN: &str = "team";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("{path} has no `{column}` column")]
    MissingColumn { path: String, column: &'static str },

    #[error("unsupported record file {path}: expected .csv or .json")]
    UnsupportedFormat { path: String },
}

// ---------------------------------------------------------------------------
// Reader-based loaders (enable testing without temp files)
// ---------------------------------------------------------------------------

fn find_column(headers: &csv::StringRecord, column: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(column))
}

/// Line of a data record when the reader reports no position. The header is
/// line 1 and records are assumed to span one line each.
fn fallback_line(index: usize) -> u64 {
    index as u64 + 2
}

/// 1-based file line on which `row` starts.
fn row_line(row: &csv::StringRecord, index: usize) -> u64 {
    row.position().map_or(fallback_line(index), |p| p.line())
}

/// Parse CSV rows. `source` labels errors and log lines.
pub fn records_from_csv<R: Read>(rdr: R, source: &str) -> Result<Vec<RawRecord>, LoadError> {
    let csv_error = |e: csv::Error| LoadError::Csv {
        path: source.to_string(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers = reader.headers().map_err(csv_error)?.clone();

    let name_col = find_column(&headers, NAME_COLUMN).ok_or_else(|| LoadError::MissingColumn {
        path: source.to_string(),
        column: NAME_COLUMN,
    })?;
    let year_col = find_column(&headers, YEAR_COLUMN).ok_or_else(|| LoadError::MissingColumn {
        path: source.to_string(),
        column: YEAR_COLUMN,
    })?;
    let team_col = find_column(&headers, TEAM_COLUMN);

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                let line = e.position().map_or(fallback_line(index), |p| p.line());
                warn!("{}:{}: skipping malformed CSV row: {}", source, line, e);
                continue;
            }
        };
        let line = row_line(&row, index);

        let name = row.get(name_col).unwrap_or("").trim().to_string();
        let raw_year = row.get(year_col).unwrap_or("");
        let year = match raw_year.parse::<SeasonYear>() {
            Ok(year) => year,
            Err(e) => {
                warn!("{}:{}: skipping row for '{}': {}", source, line, name, e);
                continue;
            }
        };
        let team = team_col
            .and_then(|i| row.get(i))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let mut fields = BTreeMap::new();
        for (i, (header, cell)) in headers.iter().zip(row.iter()).enumerate() {
            if i == name_col || i == year_col || Some(i) == team_col {
                continue;
            }
            if let Some(value) = FieldValue::parse_cell(cell) {
                fields.insert(header.trim().to_string(), value);
            }
        }

        records.push(RawRecord {
            name,
            year,
            team,
            team_logo: None,
            fields,
        });
    }

    debug!("Loaded {} CSV records from {}", records.len(), source);
    Ok(records)
}

/// Parse a JSON array of record objects. `source` labels errors and logs.
pub fn records_from_json<R: Read>(rdr: R, source: &str) -> Result<Vec<RawRecord>, LoadError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_reader(rdr).map_err(|e| LoadError::Json {
            path: source.to_string(),
            source: e,
        })?;

    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => warn!("{}: skipping malformed JSON record #{}: {}", source, index, e),
        }
    }

    debug!("Loaded {} JSON records from {}", records.len(), source);
    Ok(records)
}

// ---------------------------------------------------------------------------
// Public path-based loader
// ---------------------------------------------------------------------------

/// Load season records from a `.csv` or `.json` file.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let label = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let open = || {
        std::fs::File::open(path).map_err(|e| LoadError::Io {
            path: label.clone(),
            source: e,
        })
    };

    match extension.as_deref() {
        Some("csv") => records_from_csv(open()?, &label),
        Some("json") => records_from_json(open()?, &label),
        _ => Err(LoadError::UnsupportedFormat { path: label }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use careerline_core::record::AwardStatus;

    #[test]
    fn csv_rows_become_records() {
        let csv_data = "\
name,year,team,WARfip,WARra9,Wchamp,mvp,cy
Walter Johnson,1913,WSH,10.2,11.4,TRUE,1,n/a
Walter Johnson,Career,,100.5,152.3,,,";

        let records = records_from_csv(csv_data.as_bytes(), "test").unwrap();
        assert_eq!(records.len(), 2);

        let season = &records[0];
        assert_eq!(season.name, "Walter Johnson");
        assert_eq!(season.year, SeasonYear::Season(1913));
        assert_eq!(season.team.as_deref(), Some("WSH"));
        assert_eq!(season.stat("WARfip"), Some(10.2));
        assert_eq!(season.award("Wchamp"), AwardStatus::Won);
        assert_eq!(season.award("mvp"), AwardStatus::Won);
        assert_eq!(season.award("cy"), AwardStatus::NotApplicable);
        assert!(season.field("name").is_none());
        assert!(season.field("team").is_none());

        let career = &records[1];
        assert!(career.year.is_career());
        assert!(career.team.is_none());
        assert!(career.field("Wchamp").is_none());
    }

    #[test]
    fn csv_columns_are_matched_case_insensitively() {
        let csv_data = "\
Name,Year,Team,HR
  Babe Ruth  ,1927, NYY ,60";

        let records = records_from_csv(csv_data.as_bytes(), "test").unwrap();
        assert_eq!(records[0].name, "Babe Ruth");
        assert_eq!(records[0].team.as_deref(), Some("NYY"));
        assert_eq!(records[0].stat("HR"), Some(60.0));
    }

    #[test]
    fn csv_rows_with_bad_year_are_skipped() {
        let csv_data = "\
name,year,HR
Babe Ruth,1927,60
Babe Ruth,,54
Babe Ruth,19x8,54
Babe Ruth,1928,54";

        let records = records_from_csv(csv_data.as_bytes(), "test").unwrap();
        let years: Vec<_> = records.iter().map(|r| r.year).collect();
        assert_eq!(
            years,
            vec![SeasonYear::Season(1927), SeasonYear::Season(1928)]
        );
    }

    #[test]
    fn row_lines_are_file_lines() {
        let csv_data = "name,year,note\nBabe Ruth,1927,\"two\nlines\"\nLou Gehrig,1927,x\n";
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(csv_data.as_bytes());
        let lines: Vec<u64> = reader
            .records()
            .enumerate()
            .map(|(i, r)| row_line(&r.unwrap(), i))
            .collect();
        assert_eq!(lines, vec![2, 4]);
        assert_eq!(fallback_line(0), 2);
    }

    #[test]
    fn csv_short_rows_leave_trailing_fields_missing() {
        let csv_data = "\
name,year,HR,RBI
Lou Gehrig,1927,47";

        let records = records_from_csv(csv_data.as_bytes(), "test").unwrap();
        assert_eq!(records[0].stat("HR"), Some(47.0));
        assert_eq!(records[0].stat("RBI"), None);
    }

    #[test]
    fn csv_without_name_column_fails() {
        let csv_data = "player,year\nBabe Ruth,1927";
        let err = records_from_csv(csv_data.as_bytes(), "test").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn { column: "name", .. }
        ));
    }

    #[test]
    fn empty_csv_returns_empty_vec() {
        let records = records_from_csv("name,year,team".as_bytes(), "test").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn json_records_skip_malformed_entries() {
        let json = r#"[
            {"name": "Cy Young", "year": 1901, "team": "BOS", "W": 33},
            {"name": "No Year"},
            {"name": "Cy Young", "year": "Career", "W": 511}
        ]"#;

        let records = records_from_json(json.as_bytes(), "test").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].stat("W"), Some(33.0));
        assert!(records[1].year.is_career());
    }

    #[test]
    fn json_array_field_does_not_drop_the_season() {
        let json = r#"[
            {"name": "Cy Young", "year": 1901, "W": 33, "teams": ["BOS", "CLV"]},
            {"name": "Cy Young", "year": 1902, "W": 32}
        ]"#;

        let records = records_from_json(json.as_bytes(), "test").unwrap();
        let years: Vec<_> = records.iter().map(|r| r.year).collect();
        assert_eq!(
            years,
            vec![SeasonYear::Season(1901), SeasonYear::Season(1902)]
        );
        assert_eq!(records[0].stat("W"), Some(33.0));
        assert!(records[0].field("teams").is_none());
    }

    #[test]
    fn json_that_is_not_an_array_fails() {
        let err = records_from_json(r#"{"name": "x"}"#.as_bytes(), "test").unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_records(Path::new("players.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_records(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}

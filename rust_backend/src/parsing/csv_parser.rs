use std::collections::HashMap;

use crate::config::IngestConfig;
use crate::core::domain::AlertRecord;
use crate::error::{AlertsError, AlertsResult};

/// Field separator of the event log
pub const DELIMITER: char = ',';

const QUOTE: char = '"';

/// One data row keyed by header name.
///
/// Columns the row is too short to fill hold empty strings, so every header
/// is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRecord {
    pub line_number: usize,
    fields: HashMap<String, String>,
}

impl CsvRecord {
    /// Value of a column, or `""` when the header does not exist.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Header plus data rows of a delimited text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub records: Vec<CsvRecord>,
}

impl CsvTable {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Split one line into trimmed fields.
///
/// A quote toggles the in-quotes state and is dropped from the output; the
/// delimiter is literal text while inside quotes. Doubled quotes are not an
/// escape: `"a""b"` yields `ab`.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Byte-order mark some editors put at the start of a UTF-8 file
const BOM: char = '\u{feff}';

/// Non-blank lines with their 1-based line numbers; the first is the header.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line))
}

/// Parse delimited text into a header and one [`CsvRecord`] per data line.
///
/// Empty input yields an empty table. When a header name repeats, the later
/// column wins.
pub fn parse_csv(text: &str) -> CsvTable {
    let mut lines = content_lines(text);
    let Some((_, header_line)) = lines.next() else {
        return CsvTable::default();
    };
    let headers = split_line(header_line);

    let records = lines
        .map(|(line_number, line)| {
            let mut values = split_line(line).into_iter();
            let fields = headers
                .iter()
                .map(|header| (header.clone(), values.next().unwrap_or_default()))
                .collect();
            CsvRecord {
                line_number,
                fields,
            }
        })
        .collect();

    CsvTable { headers, records }
}

/// Header names of the fields an [`AlertRecord`] is built from.
#[derive(Debug, Clone, Copy)]
struct AlertColumns<'a> {
    level: &'a str,
    region: &'a str,
    started: &'a str,
    finished: &'a str,
}

impl<'a> AlertColumns<'a> {
    fn resolve(headers: &[String], config: &'a IngestConfig) -> AlertsResult<Self> {
        let present = |name: &str| headers.iter().any(|h| h == name);
        let require = |name: &'a str| {
            if present(name) {
                Ok(name)
            } else {
                Err(AlertsError::MissingColumn(name.to_string()))
            }
        };

        let region = config
            .region_columns
            .iter()
            .map(String::as_str)
            .find(|&name| present(name))
            .ok_or_else(|| AlertsError::MissingColumn(config.region_columns.join(" | ")))?;

        Ok(Self {
            level: require(&config.level_column)?,
            region,
            started: require(&config.started_column)?,
            finished: require(&config.finished_column)?,
        })
    }

    fn record(&self, row: &CsvRecord) -> AlertRecord {
        AlertRecord {
            line_number: row.line_number,
            level: row.get(self.level).to_string(),
            region_name: row.get(self.region).to_string(),
            started_at: row.get(self.started).to_string(),
            finished_at: row.get(self.finished).to_string(),
        }
    }
}

/// Parse an event log into typed records.
///
/// Unknown columns are ignored and short rows default the missing fields to
/// `""`. Empty input is not an error and yields no records; a header that
/// lacks one of the configured columns is.
///
/// # Examples
///
/// ```
/// use air_alerts::config::IngestConfig;
/// use air_alerts::parsing::parse_alert_records;
///
/// let text = "level,region_name,started_at,finished_at\n\
///             oblast,\"Одеська область\",2024-03-01T10:15:00,2024-03-01T10:40:00";
/// let records = parse_alert_records(text, &IngestConfig::default()).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].region_name, "Одеська область");
/// ```
pub fn parse_alert_records(text: &str, config: &IngestConfig) -> AlertsResult<Vec<AlertRecord>> {
    let table = parse_csv(text);
    if table.headers.is_empty() {
        return Ok(Vec::new());
    }
    let columns = AlertColumns::resolve(&table.headers, config)?;

    Ok(table.records.iter().map(|row| columns.record(row)).collect())
}

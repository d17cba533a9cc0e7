use super::error::SourceError;

/// Header row plus data rows, as strings, in source order.
///
/// Duplicate header names are kept; every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parse CSV text into a `RawTable`.
///
/// Short rows are padded with empty cells, long rows truncated. Rows with
/// only blank cells (trailing spreadsheet rows) are dropped. Any malformed
/// record fails the whole parse: there is no partial-row salvage.
pub fn parse_csv(csv_text: &str) -> Result<RawTable, SourceError> {
    // Strip UTF-8 BOM if present
    let text = csv_text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(SourceError::MissingHeaders);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut row: Vec<String> = record.iter().take(headers.len()).map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

//! Delimited-data decoding for tabular previews.

use crate::error::{CoreError, CoreResult};

/// Parsed tabular data: a header row plus string-valued records.
///
/// Column order is preserved and values stay strings — no type coercion.
/// Rows are addressed positionally, by header name via [`TabularPreview::field`],
/// or as ordered (header, value) pairs via [`TabularPreview::record`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularPreview {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TabularPreview {
    /// Column names from the first line, in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows (the header line is not a row).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The cell at data row `row` under `header`, if both exist.
    pub fn field(&self, row: usize, header: &str) -> Option<&str> {
        let col = self.headers.iter().position(|h| h == header)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// One data row as ordered (header, value) pairs.
    pub fn record(&self, row: usize) -> Option<Vec<(&str, &str)>> {
        let cells = self.rows.get(row)?;
        Some(
            self.headers
                .iter()
                .map(String::as_str)
                .zip(cells.iter().map(String::as_str))
                .collect(),
        )
    }
}

/// Parses comma-delimited UTF-8 text with the first line as header.
///
/// Fully empty lines are skipped. Rows shorter than the header are padded
/// with empty cells; longer rows are cut at the header width so every
/// record maps one cell per column.
///
/// # Errors
///
/// [`CoreError::DecodeFailed`] when the reader reports malformed data.
pub fn parse(content: &str) -> CoreResult<TabularPreview> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CoreError::DecodeFailed("csv", e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CoreError::DecodeFailed("csv", e.to_string()))?;
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        cells.resize(headers.len(), String::new());
        rows.push(cells);
    }

    Ok(TabularPreview { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_rows_parse() {
        let preview = parse("name,age\nAlice,30\nBob,25").unwrap();

        assert_eq!(preview.headers(), ["name", "age"]);
        assert_eq!(preview.row_count(), 2);
        assert_eq!(preview.field(0, "name"), Some("Alice"));
        assert_eq!(preview.field(0, "age"), Some("30"));
        assert_eq!(preview.field(1, "name"), Some("Bob"));
        assert_eq!(preview.field(1, "age"), Some("25"));
    }

    #[test]
    fn record_pairs_keep_column_order() {
        let preview = parse("z,a,m\n1,2,3").unwrap();

        let record = preview.record(0).unwrap();
        assert_eq!(record, vec![("z", "1"), ("a", "2"), ("m", "3")]);
    }

    #[test]
    fn values_stay_strings() {
        let preview = parse("count\n007").unwrap();
        // No numeric coercion: leading zero survives
        assert_eq!(preview.field(0, "count"), Some("007"));
    }

    #[test]
    fn empty_lines_are_skipped() {
        let preview = parse("name,age\nAlice,30\n\n\nBob,25\n").unwrap();
        assert_eq!(preview.row_count(), 2);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let preview = parse("name,address\nAlice,\"1 Main St, Springfield\"").unwrap();
        assert_eq!(
            preview.field(0, "address"),
            Some("1 Main St, Springfield")
        );
    }

    #[test]
    fn short_rows_are_padded() {
        let preview = parse("a,b,c\n1,2").unwrap();
        assert_eq!(preview.field(0, "c"), Some(""));
    }

    #[test]
    fn long_rows_are_cut_at_header_width() {
        let preview = parse("a,b\n1,2,3,4").unwrap();
        let record = preview.record(0).unwrap();
        assert_eq!(record, vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn header_only_content_has_no_rows() {
        let preview = parse("name,age\n").unwrap();
        assert_eq!(preview.headers(), ["name", "age"]);
        assert_eq!(preview.row_count(), 0);
    }

    #[test]
    fn empty_content_parses_to_empty_preview() {
        let preview = parse("").unwrap();
        assert!(preview.headers().is_empty());
        assert_eq!(preview.row_count(), 0);
    }

    #[test]
    fn unknown_header_and_out_of_range_row_return_none() {
        let preview = parse("name\nAlice").unwrap();
        assert_eq!(preview.field(0, "missing"), None);
        assert_eq!(preview.field(5, "name"), None);
        assert!(preview.record(5).is_none());
    }

    #[test]
    fn unicode_cells_survive() {
        let preview = parse("이름,나이\n앨리스,서른").unwrap();
        assert_eq!(preview.field(0, "이름"), Some("앨리스"));
        assert_eq!(preview.field(0, "나이"), Some("서른"));
    }
}

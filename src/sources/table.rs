use std::io::Read;

use tracing::debug;

use crate::error::MediMatchError;

/// A loosely parsed CSV source: trimmed headers and rows padded to the header width.
#[derive(Debug, Clone, Default)]
pub(crate) struct Table {
    pub source_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub skipped: usize,
}

impl Table {
    /// Reads a CSV source. Rows that fail to decode or carry more fields than
    /// the header are skipped; short rows are padded with empty cells.
    ///
    /// # Errors
    ///
    /// Returns an error only when the header row itself cannot be read.
    pub fn from_reader<R: Read>(source_name: &str, reader: R) -> Result<Self, MediMatchError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|source| MediMatchError::Csv {
                source_name: source_name.to_string(),
                source,
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        let mut skipped = 0;
        for (index, result) in rdr.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    debug!(source = source_name, row = index + 1, "skipping malformed row: {err}");
                    skipped += 1;
                    continue;
                }
            };
            if record.len() > headers.len() {
                debug!(
                    source = source_name,
                    row = index + 1,
                    fields = record.len(),
                    "skipping row with too many fields"
                );
                skipped += 1;
                continue;
            }
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Self {
            source_name: source_name.to_string(),
            headers,
            rows,
            skipped,
        })
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Column indexes whose header starts with `prefix`, ignoring case.
    pub fn columns_with_prefix(&self, prefix: &str) -> Vec<usize> {
        let prefix = prefix.to_ascii_lowercase();
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.to_ascii_lowercase().starts_with(&prefix))
            .map(|(i, _)| i)
            .collect()
    }

    /// First row whose `key_column` equals `key`, ignoring case and surrounding whitespace.
    pub fn find_row(&self, key_column: usize, key: &str) -> Option<&[String]> {
        let key = key.trim().to_lowercase();
        self.rows
            .iter()
            .find(|row| {
                row.get(key_column)
                    .is_some_and(|cell| cell.trim().to_lowercase() == key)
            })
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::Table;

    #[test]
    fn trims_headers_and_pads_short_rows() {
        let csv = " Disease , Symptoms ,Severity\nFlu,fever;cough\n";
        let table = Table::from_reader("mapping", csv.as_bytes()).expect("table");
        assert_eq!(table.headers, vec!["Disease", "Symptoms", "Severity"]);
        assert_eq!(table.rows, vec![vec!["Flu", "fever;cough", ""]]);
        assert_eq!(table.skipped, 0);
    }

    #[test]
    fn skips_rows_with_extra_fields() {
        let csv = "Disease,Description\nFlu,Fever and aches\nCold,Sniffles,extra\nMigraine,Headache\n";
        let table = Table::from_reader("desc", csv.as_bytes()).expect("table");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.skipped, 1);
    }

    #[test]
    fn skips_rows_that_are_not_utf8() {
        let mut bytes = b"Disease,Description\nFlu,ok\n".to_vec();
        bytes.extend_from_slice(b"Bad,\xff\xfe\n");
        bytes.extend_from_slice(b"Cold,fine\n");
        let table = Table::from_reader("desc", bytes.as_slice()).expect("table");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.skipped, 1);
    }

    #[test]
    fn find_row_is_case_insensitive_and_first_wins() {
        let csv = "Disease,Description\nFLU,first\nflu,second\n";
        let table = Table::from_reader("desc", csv.as_bytes()).expect("table");
        let col = table.column("Disease").expect("column");
        let row = table.find_row(col, " Flu ").expect("row");
        assert_eq!(row[1], "first");
        assert!(table.find_row(col, "cold").is_none());
    }

    #[test]
    fn prefix_columns_ignore_case() {
        let csv = "Disease,Precaution_1,PRECAUTION 2,Notes\n";
        let table = Table::from_reader("prec", csv.as_bytes()).expect("table");
        assert_eq!(table.columns_with_prefix("precaution"), vec![1, 2]);
    }

    #[test]
    fn empty_source_has_no_rows() {
        let table = Table::from_reader("empty", "".as_bytes()).expect("table");
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }
}

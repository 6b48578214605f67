// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Catalog loader for delimited text.
//!
//! This module turns spreadsheet exports (one item per line, a header line
//! naming the columns) into a validated `Catalog`. It is an ingestion
//! collaborator: everything here is about surviving messy input, and nothing
//! downstream ever sees text again.
//!
//! Columns are located by case-insensitive substring match on the header, so
//! `"Coût par action (en euros)"` and `"price"` both resolve to the cost
//! column. Numeric cells are normalized before parsing: currency and percent
//! signs and all whitespace (including non-breaking spaces) are stripped, and
//! a decimal comma becomes a decimal point. Only then is the cell parsed as an
//! exact `Decimal`; there is no floating point on this path.
//!
//! Row failures are isolated. A row that is not valid UTF-8, a short row, an
//! unparsable amount or an item with a non-positive cost or value becomes a
//! `RowRejection` and the load carries on; only I/O failures, a missing header
//! or column, and a catalog with no admissible rows abort the load.
//!
//! Fields may be wrapped in double quotes (with `""` as an escaped quote) so
//! that a delimiter can appear inside a cell. Quoted fields spanning several
//! lines are not supported.

use crate::{
    catalog::{Catalog, CatalogBuilder, CatalogError, RejectReason, ReturnKind},
    decimal::{Decimal, InvalidAmount},
    quantize::Quantizer,
};
use coffer_core::num::units::UnitsNumeric;
use regex::Regex;
use std::{
    borrow::Cow,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    sync::LazyLock,
};

static DECORATIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[€%\s]").expect("decoration pattern is valid"));

/// The logical columns the loader needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Cost,
    Return,
}

impl Column {
    /// Header fragments that identify this column.
    pub const fn keywords(&self) -> &'static [&'static str] {
        match self {
            Column::Name => &["action", "titre", "name"],
            Column::Cost => &["coût", "cout", "price", "prix"],
            Column::Return => &["bénéfice", "benefice", "profit", "return"],
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Column::Name => write!(f, "name"),
            Column::Cost => write!(f, "cost"),
            Column::Return => write!(f, "return"),
        }
    }
}

/// The error type for the catalog loading process.
#[derive(Debug)]
pub enum LoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input has no header line.
    MissingHeader,
    /// No header matched the keywords of a required column.
    MissingColumn {
        column: Column,
        headers: Vec<String>,
    },
    /// Every data row was rejected.
    Catalog(CatalogError),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MissingHeader => write!(f, "Input has no header line"),
            Self::MissingColumn { column, headers } => write!(
                f,
                "No {} column (expected one of {:?}) among headers {:?}",
                column,
                column.keywords(),
                headers
            ),
            Self::Catalog(e) => write!(f, "Catalog error: {}", e),
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Catalog(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<CatalogError> for LoaderError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

/// Why a single data row was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// The row's bytes are not valid UTF-8.
    InvalidUtf8,
    /// The row has fewer fields than the header requires.
    MissingField(Column),
    /// The row was read but the item is not admissible.
    Rejected(RejectReason),
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowError::InvalidUtf8 => write!(f, "not valid UTF-8"),
            RowError::MissingField(column) => write!(f, "missing {} field", column),
            RowError::Rejected(reason) => write!(f, "{}", reason),
        }
    }
}

impl From<InvalidAmount> for RowError {
    fn from(e: InvalidAmount) -> Self {
        RowError::Rejected(RejectReason::InvalidAmount(e))
    }
}

/// A data row that did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    /// One-based line number in the input.
    pub line: usize,
    /// The row's name cell, or empty if absent.
    pub name: String,
    pub error: RowError,
}

impl std::fmt::Display for RowRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} ('{}'): {}", self.line, self.name, self.error)
    }
}

/// A successfully loaded catalog and the rows it left out.
#[derive(Debug, Clone)]
pub struct LoadedCatalog<T> {
    pub catalog: Catalog<T>,
    pub rejections: Vec<RowRejection>,
}

/// A configurable loader for delimited item lists.
///
/// # Configuration
/// * `delimiter`: field separator, `,` by default.
/// * `return_kind`: whether the return column holds percentages (default) or
///   absolute amounts.
/// * `quantizer`: minor digits and rounding policy, cents rounding half away
///   from zero by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLoader {
    delimiter: char,
    return_kind: ReturnKind,
    quantizer: Quantizer,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self {
            delimiter: ',',
            return_kind: ReturnKind::Percent,
            quantizer: Quantizer::cents(),
        }
    }
}

impl CatalogLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[inline]
    pub fn return_kind(mut self, kind: ReturnKind) -> Self {
        self.return_kind = kind;
        self
    }

    #[inline]
    pub fn quantizer(mut self, quantizer: Quantizer) -> Self {
        self.quantizer = quantizer;
        self
    }

    /// Loads a catalog from a type implementing `BufRead`.
    pub fn from_bufread<T, R>(&self, mut rdr: R) -> Result<LoadedCatalog<T>, LoaderError>
    where
        T: UnitsNumeric,
        R: BufRead,
    {
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        let headers = loop {
            if !read_line(&mut rdr, &mut buf)? {
                return Err(LoaderError::MissingHeader);
            }
            line_no += 1;
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_start_matches('\u{feff}');
            if !line.trim().is_empty() {
                break split_record(line, self.delimiter);
            }
        };

        let name_col = find_column(&headers, Column::Name)?;
        let cost_col = find_column(&headers, Column::Cost)?;
        let ret_col = find_column(&headers, Column::Return)?;

        let mut builder = CatalogBuilder::<T>::new();
        let mut rejections = Vec::new();

        while read_line(&mut rdr, &mut buf)? {
            line_no += 1;
            let (line, valid_utf8) = match std::str::from_utf8(&buf) {
                Ok(line) => (Cow::Borrowed(line), true),
                Err(_) => (String::from_utf8_lossy(&buf), false),
            };
            if line.trim().is_empty() {
                continue;
            }

            let fields = split_record(&line, self.delimiter);
            let name = fields
                .get(name_col)
                .map(|s| s.trim().to_owned())
                .unwrap_or_default();

            let outcome = if valid_utf8 {
                self.admit_row(&mut builder, &name, &fields, cost_col, ret_col)
            } else {
                Err(RowError::InvalidUtf8)
            };
            if let Err(error) = outcome {
                tracing::debug!(line = line_no, %name, %error, "row rejected");
                rejections.push(RowRejection {
                    line: line_no,
                    name,
                    error,
                });
            }
        }

        if builder.is_empty() {
            return Err(LoaderError::Catalog(CatalogError::EmptyCatalog {
                rejected: rejections.len(),
            }));
        }

        let catalog = builder.build();
        tracing::info!(
            items = catalog.len(),
            rejected = rejections.len(),
            "catalog loaded"
        );

        Ok(LoadedCatalog {
            catalog,
            rejections,
        })
    }

    /// Loads a catalog from a file path.
    #[inline]
    pub fn from_path<T, P>(&self, path: P) -> Result<LoadedCatalog<T>, LoaderError>
    where
        T: UnitsNumeric,
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a catalog from a generic reader.
    #[inline]
    pub fn from_reader<T, R>(&self, r: R) -> Result<LoadedCatalog<T>, LoaderError>
    where
        T: UnitsNumeric,
        R: Read,
    {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a catalog from a string slice.
    #[inline]
    pub fn from_str<T>(&self, s: &str) -> Result<LoadedCatalog<T>, LoaderError>
    where
        T: UnitsNumeric,
    {
        self.from_reader(s.as_bytes())
    }

    fn admit_row<T>(
        &self,
        builder: &mut CatalogBuilder<T>,
        name: &str,
        fields: &[String],
        cost_col: usize,
        ret_col: usize,
    ) -> Result<(), RowError>
    where
        T: UnitsNumeric,
    {
        let cost_cell = fields
            .get(cost_col)
            .ok_or(RowError::MissingField(Column::Cost))?;
        let ret_cell = fields
            .get(ret_col)
            .ok_or(RowError::MissingField(Column::Return))?;

        let cost = parse_amount(cost_cell)?;
        let ret = parse_amount(ret_cell)?;

        builder
            .add_raw(name, &cost, &ret, &self.quantizer, self.return_kind)
            .map(|_| ())
            .map_err(RowError::Rejected)
    }
}

/// Normalizes a spreadsheet cell and parses it as an exact decimal.
///
/// ```rust
/// # use coffer_model::loading::parse_amount;
/// assert_eq!(parse_amount("1 234,50 €").unwrap().to_string(), "1234.50");
/// assert_eq!(parse_amount("39.42%").unwrap().to_string(), "39.42");
/// ```
pub fn parse_amount(cell: &str) -> Result<Decimal, InvalidAmount> {
    let cleaned = DECORATIONS.replace_all(cell, "").replace(',', ".");
    cleaned.parse::<Decimal>().map_err(|e| InvalidAmount {
        input: cell.to_owned(),
        reason: e.reason,
    })
}

fn find_column(headers: &[String], column: Column) -> Result<usize, LoaderError> {
    headers
        .iter()
        .position(|h| {
            let lowered = h.trim().to_lowercase();
            column.keywords().iter().any(|k| lowered.contains(k))
        })
        .ok_or_else(|| LoaderError::MissingColumn {
            column,
            headers: headers.to_vec(),
        })
}

/// Reads one line into `buf` without its terminator. Returns `false` at the
/// end of the input.
fn read_line<R>(rdr: &mut R, buf: &mut Vec<u8>) -> std::io::Result<bool>
where
    R: BufRead,
{
    buf.clear();
    if rdr.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    Ok(true)
}

/// Splits one line into fields, honoring double-quoted fields.
fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches(['\r', '\n']).chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => fields.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decimal::InvalidAmountReason, index::ItemIndex};

    const DATASET: &str = "\
name,price,profit
Share-GRUT,498.76,39.42
Share-ECAQ,25.50,40

Share-BAD,abc,10
Share-ZERO,0.00,10
Share-LOSS,10.00,-2
Share-SHORT,12.00
\"Share, Quoted\",\"10,00\",5%
";

    #[test]
    fn test_loads_and_isolates_bad_rows() {
        let loaded: LoadedCatalog<u64> = CatalogLoader::new().from_str(DATASET).unwrap();
        let c = &loaded.catalog;

        assert_eq!(c.len(), 3);
        assert_eq!(c.name(ItemIndex::new(0)), "Share-GRUT");
        assert_eq!(c.cost(ItemIndex::new(0)), 49876);
        assert_eq!(c.value(ItemIndex::new(0)), 19661);
        assert_eq!(c.name(ItemIndex::new(2)), "Share, Quoted");
        assert_eq!(c.cost(ItemIndex::new(2)), 1000);
        assert_eq!(c.value(ItemIndex::new(2)), 50);

        let lines: Vec<usize> = loaded.rejections.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![5, 6, 7, 8]);
        assert!(matches!(
            &loaded.rejections[0].error,
            RowError::Rejected(RejectReason::InvalidAmount(e)) if e.reason == InvalidAmountReason::NotNumeric
        ));
        assert_eq!(
            loaded.rejections[1].error,
            RowError::Rejected(RejectReason::NonPositiveCost)
        );
        assert_eq!(
            loaded.rejections[2].error,
            RowError::Rejected(RejectReason::NonPositiveValue)
        );
        assert_eq!(
            loaded.rejections[3].error,
            RowError::MissingField(Column::Return)
        );
    }

    #[test]
    fn test_invalid_utf8_row_is_rejected_alone() {
        let data: &[u8] = b"name,price,profit\nA,10.00,10\nB\xff\xfe,20.00,10\r\nC,30.00,10\n";
        let loaded: LoadedCatalog<u64> = CatalogLoader::new().from_reader(data).unwrap();

        assert_eq!(loaded.catalog.len(), 2);
        assert_eq!(loaded.catalog.name(ItemIndex::new(1)), "C");
        assert_eq!(loaded.catalog.costs(), &[1000, 3000]);

        assert_eq!(loaded.rejections.len(), 1);
        let rejection = &loaded.rejections[0];
        assert_eq!(rejection.line, 3);
        assert_eq!(rejection.error, RowError::InvalidUtf8);
        assert!(rejection.name.starts_with('B'));
        assert!(rejection.to_string().ends_with("not valid UTF-8"));
    }

    #[test]
    fn test_french_headers_and_semicolon_delimiter() {
        let data = "\u{feff}Actions #;Coût par action (en euros);Bénéfice (après 2 ans)\n\
                    Action-1;20;5 %\n\
                    Action-2;30,5;10\u{a0}%\n";
        let loaded: LoadedCatalog<u32> = CatalogLoader::new()
            .delimiter(';')
            .from_str(data)
            .unwrap();
        assert_eq!(loaded.catalog.costs(), &[2000, 3050]);
        assert_eq!(loaded.catalog.values(), &[100, 305]);
        assert!(loaded.rejections.is_empty());
    }

    #[test]
    fn test_absolute_return_kind() {
        let data = "name,price,profit\nShare-TEST,100.00,50.00\n";
        let loaded: LoadedCatalog<u64> = CatalogLoader::new()
            .return_kind(ReturnKind::Absolute)
            .from_str(data)
            .unwrap();
        assert_eq!(loaded.catalog.values(), &[5000]);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let err = CatalogLoader::new()
            .from_str::<u64>("name,price\nA,1\n")
            .unwrap_err();
        match err {
            LoaderError::MissingColumn { column, headers } => {
                assert_eq!(column, Column::Return);
                assert_eq!(headers, vec!["name".to_string(), "price".to_string()]);
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_header_and_empty_catalog() {
        let err = CatalogLoader::new().from_str::<u64>("\n  \n").unwrap_err();
        assert!(matches!(err, LoaderError::MissingHeader));

        let err = CatalogLoader::new()
            .from_str::<u64>("name,price,profit\nA,0,10\n")
            .unwrap_err();
        assert!(matches!(
            err,
            LoaderError::Catalog(CatalogError::EmptyCatalog { rejected: 1 })
        ));
    }

    #[test]
    fn test_split_record_quotes() {
        assert_eq!(split_record("a,b,c", ','), vec!["a", "b", "c"]);
        assert_eq!(split_record("\"a,b\",c", ','), vec!["a,b", "c"]);
        assert_eq!(split_record("\"say \"\"hi\"\"\",x", ','), vec!["say \"hi\"", "x"]);
        assert_eq!(split_record("a,,\r\n", ','), vec!["a", "", ""]);
    }

    #[test]
    fn test_parse_amount_keeps_original_text_in_errors() {
        let err = parse_amount("12 €uros").unwrap_err();
        assert_eq!(err.input, "12 €uros");
        assert_eq!(err.reason, InvalidAmountReason::NotNumeric);
    }
}

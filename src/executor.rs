//! Line-at-a-time ETL executor.
//!
//! Each input line is read, parsed, transformed and written before the
//! next one is read. A line that fails validation is counted and dropped;
//! only I/O failures end the run.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{EtlError, Result};
use crate::record::{DELIMITER, SkipReason, parse_line};
use crate::stage::Pipeline;

/// Name of the column appended to the header.
pub const PRICE_RANGE_COLUMN: &str = "PriceRange";

/// Skips broken down by reason. Diagnostics only; the console summary
/// reports just the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub empty_line: usize,
    pub wrong_field_count: usize,
    pub invalid_number: usize,
    pub blank_field: usize,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        *self.slot(reason) += 1;
    }

    pub fn get(&self, reason: SkipReason) -> usize {
        match reason {
            SkipReason::EmptyLine => self.empty_line,
            SkipReason::WrongFieldCount => self.wrong_field_count,
            SkipReason::InvalidNumber => self.invalid_number,
            SkipReason::BlankField => self.blank_field,
        }
    }

    fn slot(&mut self, reason: SkipReason) -> &mut usize {
        match reason {
            SkipReason::EmptyLine => &mut self.empty_line,
            SkipReason::WrongFieldCount => &mut self.wrong_field_count,
            SkipReason::InvalidNumber => &mut self.invalid_number,
            SkipReason::BlankField => &mut self.blank_field,
        }
    }
}

/// Counters for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows written to the output.
    pub processed: usize,
    /// Rows dropped by validation.
    pub skipped: usize,
    pub skip_reasons: SkipCounts,
}

impl RunSummary {
    /// Number of data lines seen, header excluded.
    pub fn total(&self) -> usize {
        self.processed + self.skipped
    }

    fn skip(&mut self, reason: SkipReason) {
        self.skipped += 1;
        self.skip_reasons.record(reason);
    }
}

/// Read one line into `buf`, without its `\n` or `\r\n` terminator.
///
/// Bytes that are not valid UTF-8 are replaced rather than failing the
/// read, so one badly encoded row cannot end the run. Returns `None` at
/// end of input.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf).map_err(EtlError::Read)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

/// Run `pipeline` over `reader`, writing results to `writer`.
///
/// The first line is the header and is copied through with the
/// `PriceRange` column appended. An empty input produces no output.
pub fn process_stream<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    pipeline: &Pipeline,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut buf = Vec::new();

    match read_line(&mut reader, &mut buf)? {
        Some(header) => {
            writeln!(writer, "{header}{DELIMITER}{PRICE_RANGE_COLUMN}").map_err(EtlError::Write)?;
        }
        None => return Ok(summary),
    }

    while let Some(line) = read_line(&mut reader, &mut buf)? {
        match parse_line(&line) {
            Ok(record) => {
                let transformed = pipeline.transform(record);
                writeln!(writer, "{transformed}").map_err(EtlError::Write)?;
                summary.processed += 1;
            }
            Err(reason) => summary.skip(reason),
        }
    }

    Ok(summary)
}

/// Run the configured pipeline from `config.input_path` to
/// `config.output_path`.
///
/// The input is opened first; if that fails no output file is created.
/// Both files are closed on every return path.
pub fn run(config: &Config) -> Result<RunSummary> {
    let input = File::open(&config.input_path).map_err(|source| EtlError::OpenInput {
        path: config.input_path.clone(),
        source,
    })?;

    if let Some(parent) = config.output_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        debug!(dir = %parent.display(), "creating output directory");
        fs::create_dir_all(parent).map_err(|source| EtlError::CreateOutput {
            path: config.output_path.clone(),
            source,
        })?;
    }

    let output = File::create(&config.output_path).map_err(|source| EtlError::CreateOutput {
        path: config.output_path.clone(),
        source,
    })?;

    let pipeline = Pipeline::new(&config.rules);
    info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        rules = ?pipeline.rule_names(),
        "starting run"
    );

    let mut writer = BufWriter::new(output);
    let summary = process_stream(BufReader::new(input), &mut writer, &pipeline)?;
    writer.flush().map_err(EtlError::Write)?;

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        empty_line = summary.skip_reasons.empty_line,
        wrong_field_count = summary.skip_reasons.wrong_field_count,
        invalid_number = summary.skip_reasons.invalid_number,
        blank_field = summary.skip_reasons.blank_field,
        "run complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    /// Helper: run the standard pipeline over an in-memory input.
    fn run_text(input: &str) -> (String, RunSummary) {
        let mut out = Vec::new();
        let summary =
            process_stream(Cursor::new(input), &mut out, &Pipeline::standard()).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_header_gets_price_range_column() {
        let (out, summary) = run_text("ProductID,Name,Price,Category\n");
        assert_eq!(out, "ProductID,Name,Price,Category,PriceRange\n");
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let (out, summary) = run_text("");
        assert!(out.is_empty());
        assert_eq!(summary, RunSummary::default());
    }

    #[test]
    fn test_mixed_rows() {
        let input = "\
ProductID,Name,Price,Category
1,tv,600.00,Electronics
2,sofa,900.00,Furniture

3,pen,1.50
abc,lamp,20.00,Home
4,,5.00,Office
5,notebook,10.00,Office
";
        let (out, summary) = run_text(input);
        assert_eq!(
            out,
            "\
ProductID,Name,Price,Category,PriceRange
1,TV,540.00,Premium Electronics,Premium
2,SOFA,900.00,Furniture,Premium
5,NOTEBOOK,10.00,Office,Low
"
        );
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.skipped, 4);
        assert_eq!(summary.skip_reasons.empty_line, 1);
        assert_eq!(summary.skip_reasons.wrong_field_count, 1);
        assert_eq!(summary.skip_reasons.invalid_number, 1);
        assert_eq!(summary.skip_reasons.blank_field, 1);
    }

    #[test]
    fn test_each_skip_adds_one_and_no_output() {
        for bad in ["   ", "1,a,2", "x,a,2,b", "1,,2,b"] {
            let (out, summary) = run_text(&format!("h\n{bad}\n"));
            assert_eq!(out, "h,PriceRange\n", "input {bad:?}");
            assert_eq!(summary.skipped, 1);
            assert_eq!(summary.processed, 0);
        }
    }

    #[test]
    fn test_counts_cover_every_data_line() {
        let input = "h\n1,a,5,b\n\n2,b,x,c\n3,c,50,d\n4,d\n";
        let (out, summary) = run_text(input);
        let data_lines = input.lines().count() - 1;
        assert_eq!(summary.total(), data_lines);
        assert_eq!(out.lines().count(), 1 + summary.processed);
    }

    #[test]
    fn test_crlf_line_endings() {
        let (out, summary) = run_text("h\r\n1,mouse,25.00,Electronics\r\n");
        assert_eq!(out, "h,PriceRange\n1,MOUSE,22.50,Electronics,Medium\n");
        assert_eq!(summary.processed, 1);
    }

    #[test]
    fn test_invalid_utf8_row_does_not_stop_run() {
        let input: &[u8] = b"h\n1,caf\xE9,5.00,Food\n2,tv,600.00,Electronics\n";
        let mut out = Vec::new();
        let summary = process_stream(input, &mut out, &Pipeline::standard()).unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "h,PriceRange\n1,CAF\u{FFFD},5.00,Food,Low\n2,TV,540.00,Premium Electronics,Premium\n"
        );
    }

    #[test]
    fn test_last_line_without_newline() {
        let (out, summary) = run_text("h\n1,pen,2.00,Office");
        assert_eq!(out, "h,PriceRange\n1,PEN,2.00,Office,Low\n");
        assert_eq!(summary.processed, 1);
    }

    #[test]
    fn test_skip_counts_get() {
        let mut counts = SkipCounts::default();
        counts.record(SkipReason::BlankField);
        counts.record(SkipReason::BlankField);
        assert_eq!(counts.get(SkipReason::BlankField), 2);
        assert_eq!(counts.get(SkipReason::EmptyLine), 0);
    }

    #[test]
    fn test_run_with_files() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("products.csv");
        let output = dir.path().join("out").join("transformed.csv");
        fs::write(&input, "id,name,price,category\n1,tv,600.00,Electronics\n\n").unwrap();

        let config = Config::default().with_input(&input).with_output(&output);
        let summary = run(&config).unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "id,name,price,category,PriceRange\n1,TV,540.00,Premium Electronics,Premium\n"
        );
    }

    #[test]
    fn test_run_missing_input_creates_no_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("transformed.csv");
        let config = Config::default()
            .with_input(dir.path().join("missing.csv"))
            .with_output(&output);

        let err = run(&config).unwrap_err();
        assert!(matches!(err, EtlError::OpenInput { .. }));
        assert!(!output.exists());
    }
}

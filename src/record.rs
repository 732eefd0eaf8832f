//! Product records and the line parser.
//!
//! Input lines are split on a bare comma with no quoting support, so a
//! field that contains a comma shifts every column after it and the row
//! is rejected by the field-count check. Empty trailing fields are dropped
//! before counting, so `1,tv,600.00,Electronics,,` still has four fields.

use std::fmt;

/// Field delimiter for both input and output lines.
pub const DELIMITER: char = ',';

/// Number of fields in a data line: `id,name,price,category`.
pub const FIELD_COUNT: usize = 4;

/// Why an input line was left out of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The line is empty or only whitespace.
    EmptyLine,
    /// The line does not split into exactly four fields.
    WrongFieldCount,
    /// `id` is not an integer or `price` is not a finite number.
    InvalidNumber,
    /// `name` or `category` is empty after trimming.
    BlankField,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::EmptyLine => "empty line",
            SkipReason::WrongFieldCount => "wrong field count",
            SkipReason::InvalidNumber => "unparseable id or price",
            SkipReason::BlankField => "blank name or category",
        };
        f.write_str(text)
    }
}

/// A validated input row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: String,
}

impl ProductRecord {
    pub fn new(id: i64, name: &str, price: f64, category: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            price,
            category: category.to_string(),
        }
    }
}

/// Split on the delimiter, drop empty trailing segments, trim the rest.
///
/// Only segments that are exactly empty are dropped; a trailing field of
/// whitespace still counts.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(DELIMITER).collect();
    while fields.last() == Some(&"") {
        fields.pop();
    }
    fields.into_iter().map(str::trim).collect()
}

/// Parse one data line into a `ProductRecord`.
///
/// Total over every possible input: a line that fails validation comes back
/// as the first `SkipReason` it hits, checked in this order: empty line,
/// field count, numeric fields, blank text fields.
pub fn parse_line(line: &str) -> Result<ProductRecord, SkipReason> {
    if line.trim().is_empty() {
        return Err(SkipReason::EmptyLine);
    }

    let fields = split_fields(line);
    if fields.len() != FIELD_COUNT {
        return Err(SkipReason::WrongFieldCount);
    }
    let (id, name, price, category) = (fields[0], fields[1], fields[2], fields[3]);

    let id: i64 = id.parse().map_err(|_| SkipReason::InvalidNumber)?;
    let price: f64 = price.parse().map_err(|_| SkipReason::InvalidNumber)?;
    if !price.is_finite() {
        return Err(SkipReason::InvalidNumber);
    }

    if name.is_empty() || category.is_empty() {
        return Err(SkipReason::BlankField);
    }

    Ok(ProductRecord::new(id, name, price, category))
}

/// Output row: the input after every rule has run, plus its price bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedRecord {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub price_range: crate::stage::PriceRange,
}

impl TransformedRecord {
    /// Serialize as `id,NAME,price,category,PriceRange`.
    ///
    /// The price is rounded to two decimals here and nowhere else.
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TransformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{id}{d}{name}{d}{price:.2}{d}{category}{d}{range}",
            id = self.id,
            name = self.name,
            price = self.price,
            category = self.category,
            range = self.price_range,
            d = DELIMITER,
        )
    }
}

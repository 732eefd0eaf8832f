//! # product-etl
//!
//! A single-pass batch transformer for comma-delimited product files.
//!
//! Each data line `id,name,price,category` is parsed and validated, run
//! through a fixed rule sequence, and written out with a derived
//! `PriceRange` column:
//!
//! 1. **Uppercase** the product name.
//! 2. **Discount** electronics by 10%.
//! 3. **Reclassify** discounted electronics above 500.00 as
//!    `Premium Electronics`.
//! 4. **Bucket** the final price into Low / Medium / High / Premium.
//!
//! Invalid lines are skipped and counted; they never stop the run.
//!
//! ## Example
//!
//! ```
//! use product_etl::{parse_line, transform};
//!
//! let record = parse_line("1,tv,600.00,Electronics").unwrap();
//! let out = transform(record);
//!
//! assert_eq!(out.to_line(), "1,TV,540.00,Premium Electronics,Premium");
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod record;
pub mod stage;

pub use config::Config;
pub use error::{EtlError, Result};
pub use executor::{PRICE_RANGE_COLUMN, RunSummary, SkipCounts, process_stream, run};
pub use logging::init_logging;
pub use record::{ProductRecord, SkipReason, TransformedRecord, parse_line};
pub use stage::{Pipeline, PriceRange, Rule, RuleKind, rule_for, transform};

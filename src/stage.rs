//! Transformation rules and price bucketing.
//!
//! A `Pipeline` runs its rules in order over a validated `ProductRecord`,
//! then derives the `PriceRange` column from the final price. Order is
//! significant: the premium check reads the price after the discount.

use std::fmt;

use crate::record::{ProductRecord, TransformedRecord};

/// Category that receives the discount and may be reclassified.
pub const ELECTRONICS: &str = "Electronics";

/// Category assigned to discounted electronics above `PREMIUM_THRESHOLD`.
pub const PREMIUM_ELECTRONICS: &str = "Premium Electronics";

/// Multiplier applied to electronics prices (10% off).
pub const ELECTRONICS_DISCOUNT: f64 = 0.9;

/// Prices strictly above this are premium.
pub const PREMIUM_THRESHOLD: f64 = 500.00;

/// Derived price bucket. Upper bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceRange {
    /// price <= 10.00
    Low,
    /// 10.00 < price <= 100.00
    Medium,
    /// 100.00 < price <= 500.00
    High,
    /// price > 500.00
    Premium,
}

impl PriceRange {
    /// Bucket a price. Boundary values fall in the lower bucket.
    pub fn for_price(price: f64) -> Self {
        if price <= 10.00 {
            PriceRange::Low
        } else if price <= 100.00 {
            PriceRange::Medium
        } else if price <= PREMIUM_THRESHOLD {
            PriceRange::High
        } else {
            PriceRange::Premium
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceRange::Low => "Low",
            PriceRange::Medium => "Medium",
            PriceRange::High => "High",
            PriceRange::Premium => "Premium",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The rules a pipeline can run, in their standard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    UppercaseName,
    ElectronicsDiscount,
    PremiumReclassification,
}

impl RuleKind {
    /// The fixed rule sequence every run uses.
    pub const STANDARD: [RuleKind; 3] = [
        RuleKind::UppercaseName,
        RuleKind::ElectronicsDiscount,
        RuleKind::PremiumReclassification,
    ];
}

/// A single field-level rewrite of a product record.
pub trait Rule {
    /// Apply the rule in place.
    fn apply(&self, record: &mut ProductRecord);

    /// The display name of this rule.
    fn name(&self) -> &str;
}

fn is_electronics(category: &str) -> bool {
    category.eq_ignore_ascii_case(ELECTRONICS)
}

/// Uppercases `name`.
pub struct UppercaseName;

impl Rule for UppercaseName {
    fn apply(&self, record: &mut ProductRecord) {
        record.name.make_ascii_uppercase();
    }

    fn name(&self) -> &str {
        "UPPERCASE_NAME"
    }
}

/// Takes 10% off electronics. The category text is left as written.
pub struct ElectronicsDiscount;

impl Rule for ElectronicsDiscount {
    fn apply(&self, record: &mut ProductRecord) {
        if is_electronics(&record.category) {
            record.price *= ELECTRONICS_DISCOUNT;
        }
    }

    fn name(&self) -> &str {
        "ELECTRONICS_DISCOUNT"
    }
}

/// Moves electronics priced above the premium threshold into
/// `Premium Electronics`. Never touches the price.
pub struct PremiumReclassification;

impl Rule for PremiumReclassification {
    fn apply(&self, record: &mut ProductRecord) {
        if record.price > PREMIUM_THRESHOLD && is_electronics(&record.category) {
            record.category = PREMIUM_ELECTRONICS.to_string();
        }
    }

    fn name(&self) -> &str {
        "PREMIUM_RECLASSIFICATION"
    }
}

/// Create a `Rule` from its kind.
pub fn rule_for(kind: RuleKind) -> Box<dyn Rule> {
    match kind {
        RuleKind::UppercaseName => Box::new(UppercaseName),
        RuleKind::ElectronicsDiscount => Box::new(ElectronicsDiscount),
        RuleKind::PremiumReclassification => Box::new(PremiumReclassification),
    }
}

/// An ordered rule chain followed by price bucketing.
pub struct Pipeline {
    rules: Vec<Box<dyn Rule>>,
}

impl Pipeline {
    pub fn new(kinds: &[RuleKind]) -> Self {
        Self {
            rules: kinds.iter().copied().map(rule_for).collect(),
        }
    }

    /// The pipeline with the standard rule sequence.
    pub fn standard() -> Self {
        Self::new(&RuleKind::STANDARD)
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule over `record` and bucket the resulting price.
    ///
    /// Cannot fail for a record produced by `parse_line`. Price keeps full
    /// precision; rounding happens only when the result is serialized.
    pub fn transform(&self, mut record: ProductRecord) -> TransformedRecord {
        for rule in &self.rules {
            rule.apply(&mut record);
        }

        let ProductRecord {
            id,
            name,
            price,
            category,
        } = record;

        TransformedRecord {
            id,
            name,
            price,
            category,
            price_range: PriceRange::for_price(price),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Transform a record with the standard pipeline.
pub fn transform(record: ProductRecord) -> TransformedRecord {
    Pipeline::standard().transform(record)
}

//! Warehouse size tiers and their total order.
//!
//! The table is closed: a label outside it cannot be ranked, and no order is ever inferred
//! from the label text.

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WarehouseSize {
    XSmall,
    Small,
    Medium,
    Large,
    XLarge,
    XxLarge,
}

impl WarehouseSize {
    pub const ALL: [WarehouseSize; 6] = [
        WarehouseSize::XSmall,
        WarehouseSize::Small,
        WarehouseSize::Medium,
        WarehouseSize::Large,
        WarehouseSize::XLarge,
        WarehouseSize::XxLarge,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "XSMALL" => Some(WarehouseSize::XSmall),
            "SMALL" => Some(WarehouseSize::Small),
            "MEDIUM" => Some(WarehouseSize::Medium),
            "LARGE" => Some(WarehouseSize::Large),
            "XLARGE" => Some(WarehouseSize::XLarge),
            "XXLARGE" => Some(WarehouseSize::XxLarge),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WarehouseSize::XSmall => "XSMALL",
            WarehouseSize::Small => "SMALL",
            WarehouseSize::Medium => "MEDIUM",
            WarehouseSize::Large => "LARGE",
            WarehouseSize::XLarge => "XLARGE",
            WarehouseSize::XxLarge => "XXLARGE",
        }
    }

    pub fn ordinal(self) -> u8 {
        match self {
            WarehouseSize::XSmall => 1,
            WarehouseSize::Small => 2,
            WarehouseSize::Medium => 3,
            WarehouseSize::Large => 4,
            WarehouseSize::XLarge => 5,
            WarehouseSize::XxLarge => 6,
        }
    }
}

impl std::fmt::Display for WarehouseSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordinal rank of a size label, or `None` for labels outside the table.
pub fn rank(label: &str) -> Option<u8> {
    WarehouseSize::from_label(label).map(WarehouseSize::ordinal)
}

/// `Some(true)` when `from -> to` lowers the tier; `None` when either label is unknown.
pub fn is_decrease(from: &str, to: &str) -> Option<bool> {
    Some(rank(from)? > rank(to)?)
}

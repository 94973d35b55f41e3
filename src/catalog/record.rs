use thiserror::Error;

/// Reasons a data row cannot become a price record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Row has {found} fields, column {required} is required")]
    ShortRow { found: usize, required: usize },

    #[error("Invalid {field} value '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Weight is zero")]
    ZeroWeight,

    #[error("Non-positive {field} value {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("Empty product name")]
    EmptyName,

    #[error("Unreadable row: {0}")]
    Unreadable(String),
}

/// One validated row of a price list.
///
/// The price per weight unit is derived on construction and cannot be set
/// independently, so every record satisfies `price_per_weight_unit == unit_price / unit_weight`.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceRecord {
    product_name: String,
    unit_price: f64,
    unit_weight: f64,
    source_file: String,
    price_per_weight_unit: f64,
}

impl PriceRecord {
    /// Creates a record, rejecting empty names and non-positive or non-finite numbers.
    pub fn new(product_name: &str, unit_price: f64, unit_weight: f64, source_file: &str) -> Result<Self, RecordError> {
        if product_name.trim().is_empty() {
            return Err(RecordError::EmptyName);
        }
        if unit_weight == 0.0 {
            return Err(RecordError::ZeroWeight);
        }
        Self::check_positive("price", unit_price)?;
        Self::check_positive("weight", unit_weight)?;
        Ok(Self {
            product_name: product_name.to_owned(),
            unit_price,
            unit_weight,
            source_file: source_file.to_owned(),
            price_per_weight_unit: unit_price / unit_weight,
        })
    }

    fn check_positive(field: &'static str, value: f64) -> Result<(), RecordError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(RecordError::NonPositive { field, value })
        }
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn unit_weight(&self) -> f64 {
        self.unit_weight
    }

    /// File name the record was read from.
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn price_per_weight_unit(&self) -> f64 {
        self.price_per_weight_unit
    }
}

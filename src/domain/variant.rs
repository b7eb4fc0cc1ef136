use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a variant, unique within the draft that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(u64);

impl VariantId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VariantId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(VariantId)
    }
}

/// Editable attribute of a [`ProductVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantField {
    Name,
    Price,
    Stock,
    Sku,
}

/// A size, colour or other sub-listing carrying its own price, stock and SKU.
///
/// Price and stock are kept as the text the supplier typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub name: String,
    pub price: String,
    pub stock: String,
    pub sku: String,
}

impl ProductVariant {
    /// Creates a variant with every editable field empty.
    pub fn empty(id: VariantId) -> Self {
        Self {
            id,
            name: String::new(),
            price: String::new(),
            stock: String::new(),
            sku: String::new(),
        }
    }

    pub fn set(&mut self, field: VariantField, value: impl Into<String>) {
        let slot = match field {
            VariantField::Name => &mut self.name,
            VariantField::Price => &mut self.price,
            VariantField::Stock => &mut self.stock,
            VariantField::Sku => &mut self.sku,
        };
        *slot = value.into();
    }
}

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product_draft::{DraftField, DraftUpdate};
use crate::domain::variant::{VariantField, VariantId};

/// Maximum allowed length for single-line inputs.
const TEXT_MAX_LEN: usize = 256;
const TEXT_MAX_LEN_VALIDATOR: u64 = TEXT_MAX_LEN as u64;

/// Maximum allowed length for the product description.
const DESCRIPTION_MAX_LEN: usize = 10_000;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Result type returned by the draft form helpers.
pub type DraftFormResult<T> = Result<T, DraftFormError>;

/// Errors that can occur while processing the draft form.
#[derive(Debug, Error)]
pub enum DraftFormError {
    /// The request body is not a valid urlencoded form.
    #[error("malformed form submission: {0}")]
    Decode(String),
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The repeated variant inputs do not line up into rows.
    #[error("variant rows are incomplete")]
    VariantRowsMismatch,
    /// A variant row references an id that is not a number.
    #[error("invalid variant id `{value}`")]
    InvalidVariantId { value: String },
    /// A variant value exceeds the maximum input length.
    #[error("variant row {row} has a value that is too long")]
    VariantValueTooLong { row: usize },
}

/// Snapshot of the "Add New Product" form as posted by the browser.
///
/// Every button on the page submits the whole form, so a missing input is
/// treated as an empty one. Variant rows arrive as repeated keys, one value
/// per row and column.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct DraftForm {
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub category: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub brand: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub tags: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub selling_price: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub cost_price: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub discount_price: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub min_order_qty: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub wholesale_price: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub stock_quantity: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub sku_code: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub barcode: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub low_stock_threshold: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub weight: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub length: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub width: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub height: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub shipping_category: String,
    #[validate(length(max = TEXT_MAX_LEN_VALIDATOR))]
    pub courier_options: String,
    pub variant_id: Vec<String>,
    pub variant_name: Vec<String>,
    pub variant_price: Vec<String>,
    pub variant_stock: Vec<String>,
    pub variant_sku: Vec<String>,
}

impl DraftForm {
    /// Decode an `application/x-www-form-urlencoded` body.
    pub fn from_body(body: &[u8]) -> DraftFormResult<Self> {
        serde_html_form::from_bytes(body).map_err(|err| DraftFormError::Decode(err.to_string()))
    }

    /// Validates the payload and converts it into a domain `DraftUpdate`.
    pub fn into_update(self) -> DraftFormResult<DraftUpdate> {
        self.validate()?;

        let DraftForm {
            name,
            category,
            description,
            brand,
            tags,
            selling_price,
            cost_price,
            discount_price,
            min_order_qty,
            wholesale_price,
            stock_quantity,
            sku_code,
            barcode,
            low_stock_threshold,
            weight,
            length,
            width,
            height,
            shipping_category,
            courier_options,
            variant_id,
            variant_name,
            variant_price,
            variant_stock,
            variant_sku,
        } = self;

        let inline = [
            (DraftField::Name, name),
            (DraftField::Category, category),
            (DraftField::Brand, brand),
            (DraftField::Tags, tags),
            (DraftField::SellingPrice, selling_price),
            (DraftField::CostPrice, cost_price),
            (DraftField::DiscountPrice, discount_price),
            (DraftField::MinOrderQty, min_order_qty),
            (DraftField::WholesalePrice, wholesale_price),
            (DraftField::StockQuantity, stock_quantity),
            (DraftField::SkuCode, sku_code),
            (DraftField::Barcode, barcode),
            (DraftField::LowStockThreshold, low_stock_threshold),
            (DraftField::Weight, weight),
            (DraftField::Length, length),
            (DraftField::Width, width),
            (DraftField::Height, height),
            (DraftField::ShippingCategory, shipping_category),
            (DraftField::CourierOptions, courier_options),
        ];

        let mut update = DraftUpdate::new();
        for (field, value) in inline {
            update = update.field(field, strip_control_chars(&value));
        }
        update = update.field(
            DraftField::Description,
            sanitize_multiline_text(&description),
        );

        let rows = variant_id.len();
        if [
            variant_name.len(),
            variant_price.len(),
            variant_stock.len(),
            variant_sku.len(),
        ]
        .iter()
        .any(|len| *len != rows)
        {
            return Err(DraftFormError::VariantRowsMismatch);
        }

        let columns = variant_name
            .into_iter()
            .zip(variant_price)
            .zip(variant_stock)
            .zip(variant_sku);

        for (row, (raw_id, (((name, price), stock), sku))) in
            variant_id.into_iter().zip(columns).enumerate()
        {
            let id = raw_id
                .parse::<VariantId>()
                .map_err(|_| DraftFormError::InvalidVariantId {
                    value: raw_id.clone(),
                })?;

            let values = [
                (VariantField::Name, name),
                (VariantField::Price, price),
                (VariantField::Stock, stock),
                (VariantField::Sku, sku),
            ];
            for (field, value) in values {
                if value.chars().count() > TEXT_MAX_LEN {
                    return Err(DraftFormError::VariantValueTooLong { row: row + 1 });
                }
                update = update.variant(id, field, strip_control_chars(&value));
            }
        }

        Ok(update)
    }
}

fn strip_control_chars(input: &str) -> String {
    input.chars().filter(|ch| !ch.is_control()).collect()
}

/// Strip control characters except line breaks and tabs, leaving the text
/// otherwise exactly as typed.
fn sanitize_multiline_text(input: &str) -> String {
    input
        .chars()
        .filter(|ch| !ch.is_control() || matches!(ch, '\n' | '\r' | '\t'))
        .collect()
}

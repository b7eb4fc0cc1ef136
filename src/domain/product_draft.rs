use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::domain::category::{ProductCategory, ShippingCategory};
use crate::domain::media::ImageRef;
use crate::domain::variant::{ProductVariant, VariantField, VariantId};

/// Message shown when publishing a draft with required fields left empty.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// Errors raised while editing or submitting a draft.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    /// One or more required fields are empty.
    #[error("Please fill in all required fields")]
    MissingRequiredFields(Vec<DraftField>),
    /// The draft already left the editing state.
    #[error("the draft has already been submitted")]
    NotEditing,
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("unknown shipping category `{0}`")]
    UnknownShippingCategory(String),
    #[error("unknown compliance document `{0}`")]
    UnknownDocument(String),
}

/// Identifier of every scalar field on the "Add New Product" form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    Category,
    Description,
    Brand,
    Tags,
    SellingPrice,
    CostPrice,
    DiscountPrice,
    MinOrderQty,
    WholesalePrice,
    StockQuantity,
    SkuCode,
    Barcode,
    LowStockThreshold,
    Weight,
    Length,
    Width,
    Height,
    ShippingCategory,
    CourierOptions,
}

impl DraftField {
    pub const ALL: [DraftField; 20] = [
        DraftField::Name,
        DraftField::Category,
        DraftField::Description,
        DraftField::Brand,
        DraftField::Tags,
        DraftField::SellingPrice,
        DraftField::CostPrice,
        DraftField::DiscountPrice,
        DraftField::MinOrderQty,
        DraftField::WholesalePrice,
        DraftField::StockQuantity,
        DraftField::SkuCode,
        DraftField::Barcode,
        DraftField::LowStockThreshold,
        DraftField::Weight,
        DraftField::Length,
        DraftField::Width,
        DraftField::Height,
        DraftField::ShippingCategory,
        DraftField::CourierOptions,
    ];

    /// Fields that must be non-empty before a draft can be published.
    pub const REQUIRED: [DraftField; 5] = [
        DraftField::Name,
        DraftField::Category,
        DraftField::StockQuantity,
        DraftField::SkuCode,
        DraftField::Weight,
    ];

    /// Name of the form input bound to this field.
    pub fn as_str(self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Category => "category",
            DraftField::Description => "description",
            DraftField::Brand => "brand",
            DraftField::Tags => "tags",
            DraftField::SellingPrice => "selling_price",
            DraftField::CostPrice => "cost_price",
            DraftField::DiscountPrice => "discount_price",
            DraftField::MinOrderQty => "min_order_qty",
            DraftField::WholesalePrice => "wholesale_price",
            DraftField::StockQuantity => "stock_quantity",
            DraftField::SkuCode => "sku_code",
            DraftField::Barcode => "barcode",
            DraftField::LowStockThreshold => "low_stock_threshold",
            DraftField::Weight => "weight",
            DraftField::Length => "length",
            DraftField::Width => "width",
            DraftField::Height => "height",
            DraftField::ShippingCategory => "shipping_category",
            DraftField::CourierOptions => "courier_options",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and description section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductInfo {
    pub name: String,
    pub category: Option<ProductCategory>,
    pub description: String,
    pub brand: String,
    pub tags: String,
}

/// Pricing section. Values are kept as typed; nothing is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pricing {
    pub selling_price: String,
    pub cost_price: String,
    pub discount_price: String,
    pub min_order_qty: String,
    pub wholesale_price: String,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            selling_price: String::new(),
            cost_price: String::new(),
            discount_price: String::new(),
            min_order_qty: "1".to_string(),
            wholesale_price: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub stock_quantity: String,
    pub sku_code: String,
    pub barcode: String,
    pub low_stock_threshold: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Shipping {
    pub weight: String,
    pub length: String,
    pub width: String,
    pub height: String,
    pub shipping_category: Option<ShippingCategory>,
    pub courier_options: String,
}

/// In-memory listing a supplier is editing on the "Add New Product" page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductDraft {
    pub info: ProductInfo,
    pub pricing: Pricing,
    pub inventory: Inventory,
    pub shipping: Shipping,
    pub images: Vec<ImageRef>,
    pub variants: Vec<ProductVariant>,
    /// Last issued variant id; ids are never reused within a draft.
    #[serde(skip)]
    last_variant_id: u64,
}

impl ProductDraft {
    /// Create an empty draft as shown when the page opens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current textual value of `field`.
    ///
    /// Category selections are reported by label, empty when unset.
    pub fn value(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.info.name,
            DraftField::Category => self.info.category.map(|c| c.label()).unwrap_or(""),
            DraftField::Description => &self.info.description,
            DraftField::Brand => &self.info.brand,
            DraftField::Tags => &self.info.tags,
            DraftField::SellingPrice => &self.pricing.selling_price,
            DraftField::CostPrice => &self.pricing.cost_price,
            DraftField::DiscountPrice => &self.pricing.discount_price,
            DraftField::MinOrderQty => &self.pricing.min_order_qty,
            DraftField::WholesalePrice => &self.pricing.wholesale_price,
            DraftField::StockQuantity => &self.inventory.stock_quantity,
            DraftField::SkuCode => &self.inventory.sku_code,
            DraftField::Barcode => &self.inventory.barcode,
            DraftField::LowStockThreshold => &self.inventory.low_stock_threshold,
            DraftField::Weight => &self.shipping.weight,
            DraftField::Length => &self.shipping.length,
            DraftField::Width => &self.shipping.width,
            DraftField::Height => &self.shipping.height,
            DraftField::ShippingCategory => {
                self.shipping.shipping_category.map(|c| c.label()).unwrap_or("")
            }
            DraftField::CourierOptions => &self.shipping.courier_options,
        }
    }

    /// Replace the value of a single field.
    ///
    /// Category fields must name a known category; only the empty string
    /// clears the selection, so blank input is rejected like any other unknown
    /// value. Every other field stores the text unchanged.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> Result<(), DraftError> {
        let value = value.into();
        let slot = match field {
            DraftField::Category => {
                self.info.category = parse_choice(&value)
                    .map_err(|_| DraftError::UnknownCategory(value.clone()))?;
                return Ok(());
            }
            DraftField::ShippingCategory => {
                self.shipping.shipping_category = parse_choice(&value)
                    .map_err(|_| DraftError::UnknownShippingCategory(value.clone()))?;
                return Ok(());
            }
            DraftField::Name => &mut self.info.name,
            DraftField::Description => &mut self.info.description,
            DraftField::Brand => &mut self.info.brand,
            DraftField::Tags => &mut self.info.tags,
            DraftField::SellingPrice => &mut self.pricing.selling_price,
            DraftField::CostPrice => &mut self.pricing.cost_price,
            DraftField::DiscountPrice => &mut self.pricing.discount_price,
            DraftField::MinOrderQty => &mut self.pricing.min_order_qty,
            DraftField::WholesalePrice => &mut self.pricing.wholesale_price,
            DraftField::StockQuantity => &mut self.inventory.stock_quantity,
            DraftField::SkuCode => &mut self.inventory.sku_code,
            DraftField::Barcode => &mut self.inventory.barcode,
            DraftField::LowStockThreshold => &mut self.inventory.low_stock_threshold,
            DraftField::Weight => &mut self.shipping.weight,
            DraftField::Length => &mut self.shipping.length,
            DraftField::Width => &mut self.shipping.width,
            DraftField::Height => &mut self.shipping.height,
            DraftField::CourierOptions => &mut self.shipping.courier_options,
        };
        *slot = value;
        Ok(())
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_required_fields(&self) -> Vec<DraftField> {
        DraftField::REQUIRED
            .into_iter()
            .filter(|field| self.value(*field).is_empty())
            .collect()
    }

    /// Append an empty variant and return its freshly issued id.
    pub fn add_variant(&mut self) -> VariantId {
        self.last_variant_id += 1;
        let id = VariantId::new(self.last_variant_id);
        self.variants.push(ProductVariant::empty(id));
        id
    }

    /// Remove the variant with `id`. Returns `false` when no variant matched.
    pub fn remove_variant(&mut self, id: VariantId) -> bool {
        match self.variants.iter().position(|variant| variant.id == id) {
            Some(index) => {
                self.variants.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replace one field of the variant with `id`. Returns `false` when no
    /// variant matched.
    pub fn update_variant(
        &mut self,
        id: VariantId,
        field: VariantField,
        value: impl Into<String>,
    ) -> bool {
        match self.variants.iter_mut().find(|variant| variant.id == id) {
            Some(variant) => {
                variant.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn variant(&self, id: VariantId) -> Option<&ProductVariant> {
        self.variants.iter().find(|variant| variant.id == id)
    }

    /// Apply a batch of field and variant changes in order.
    ///
    /// Stops at the first invalid category value; changes before it stay
    /// applied. Variant changes for unknown ids are skipped.
    pub fn apply(&mut self, update: DraftUpdate) -> Result<(), DraftError> {
        let DraftUpdate { fields, variants } = update;

        for (field, value) in fields {
            self.set_field(field, value)?;
        }

        for change in variants {
            self.update_variant(change.id, change.field, change.value);
        }

        Ok(())
    }
}

fn parse_choice<T: FromStr>(value: &str) -> Result<Option<T>, T::Err> {
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some)
}

/// Single change to one field of one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantChange {
    pub id: VariantId,
    pub field: VariantField,
    pub value: String,
}

/// Patch data applied to a draft when the form is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftUpdate {
    pub fields: Vec<(DraftField, String)>,
    pub variants: Vec<VariantChange>,
}

impl DraftUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value`.
    pub fn field(mut self, field: DraftField, value: impl Into<String>) -> Self {
        self.fields.push((field, value.into()));
        self
    }

    /// Set `field` of the variant `id` to `value`.
    pub fn variant(mut self, id: VariantId, field: VariantField, value: impl Into<String>) -> Self {
        self.variants.push(VariantChange {
            id,
            field,
            value: value.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ProductDraft {
        let mut draft = ProductDraft::new();
        draft
            .apply(
                DraftUpdate::new()
                    .field(DraftField::Name, "Steel Shelf")
                    .field(DraftField::Category, "Office Equipment")
                    .field(DraftField::StockQuantity, "50")
                    .field(DraftField::SkuCode, "SKU-001")
                    .field(DraftField::Weight, "2.5"),
            )
            .expect("valid update");
        draft
    }

    #[test]
    fn new_draft_is_empty_with_default_min_order_qty() {
        let draft = ProductDraft::new();

        assert!(draft.variants.is_empty());
        assert!(draft.images.is_empty());
        assert_eq!(draft.value(DraftField::MinOrderQty), "1");
        assert_eq!(draft.missing_required_fields(), DraftField::REQUIRED.to_vec());
    }

    #[test]
    fn set_field_stores_text_verbatim() {
        let mut draft = ProductDraft::new();

        draft
            .set_field(DraftField::SellingPrice, "twelve dollars")
            .expect("any text is accepted");
        draft
            .set_field(DraftField::Weight, "-3")
            .expect("any text is accepted");

        assert_eq!(draft.pricing.selling_price, "twelve dollars");
        assert_eq!(draft.shipping.weight, "-3");
    }

    #[test]
    fn set_field_parses_and_clears_categories() {
        let mut draft = ProductDraft::new();

        draft
            .set_field(DraftField::Category, "medical-supplies")
            .expect("known category");
        draft
            .set_field(DraftField::ShippingCategory, "perishable")
            .expect("known shipping category");
        assert_eq!(draft.info.category, Some(ProductCategory::MedicalSupplies));
        assert_eq!(draft.value(DraftField::Category), "Medical Supplies");
        assert_eq!(
            draft.shipping.shipping_category,
            Some(ShippingCategory::Perishable)
        );

        draft
            .set_field(DraftField::Category, "")
            .expect("empty clears");
        assert_eq!(draft.info.category, None);
        assert_eq!(draft.value(DraftField::Category), "");
    }

    #[test]
    fn set_field_rejects_unknown_category() {
        let mut draft = ProductDraft::new();
        draft
            .set_field(DraftField::Category, "Packaging")
            .expect("known category");

        let result = draft.set_field(DraftField::Category, "Spaceships");

        assert_eq!(
            result,
            Err(DraftError::UnknownCategory("Spaceships".to_string()))
        );
        assert_eq!(draft.info.category, Some(ProductCategory::Packaging));
    }

    #[test]
    fn blank_category_is_rejected_not_cleared() {
        let mut draft = ProductDraft::new();
        draft
            .set_field(DraftField::Category, "Electronics")
            .expect("known category");

        let result = draft.set_field(DraftField::Category, " ");

        assert_eq!(result, Err(DraftError::UnknownCategory(" ".to_string())));
        assert_eq!(draft.info.category, Some(ProductCategory::Electronics));
        assert!(
            draft
                .set_field(DraftField::ShippingCategory, "\t")
                .is_err()
        );
    }

    #[test]
    fn complete_draft_has_no_missing_fields() {
        assert!(complete_draft().missing_required_fields().is_empty());
    }

    #[test]
    fn missing_fields_are_reported_in_form_order() {
        let mut draft = complete_draft();
        draft.set_field(DraftField::Weight, "").expect("clear");
        draft.set_field(DraftField::Name, "").expect("clear");

        assert_eq!(
            draft.missing_required_fields(),
            vec![DraftField::Name, DraftField::Weight]
        );
    }

    #[test]
    fn add_variant_twice_issues_distinct_empty_variants() {
        let mut draft = ProductDraft::new();

        let first = draft.add_variant();
        let second = draft.add_variant();

        assert_ne!(first, second);
        assert_eq!(draft.variants.len(), 2);
        for variant in &draft.variants {
            assert!(variant.name.is_empty());
            assert!(variant.price.is_empty());
            assert!(variant.stock.is_empty());
            assert!(variant.sku.is_empty());
        }
        assert_eq!(draft.variants[0].id, first);
        assert_eq!(draft.variants[1].id, second);
    }

    #[test]
    fn variant_ids_are_not_reused_after_removal() {
        let mut draft = ProductDraft::new();
        let first = draft.add_variant();
        assert!(draft.remove_variant(first));

        let second = draft.add_variant();

        assert_ne!(first, second);
    }

    #[test]
    fn remove_unknown_variant_is_a_no_op() {
        let mut draft = ProductDraft::new();
        draft.add_variant();
        let before = draft.clone();

        assert!(!draft.remove_variant(VariantId::new(99)));
        assert_eq!(draft, before);
    }

    #[test]
    fn update_variant_touches_only_the_target_field() {
        let mut draft = ProductDraft::new();
        let first = draft.add_variant();
        let second = draft.add_variant();
        draft.update_variant(second, VariantField::Name, "Large");
        let sibling_before = draft.variant(second).cloned();

        assert!(draft.update_variant(first, VariantField::Price, "12.00"));

        let updated = draft.variant(first).expect("variant exists");
        assert_eq!(updated.price, "12.00");
        assert!(updated.name.is_empty());
        assert!(updated.stock.is_empty());
        assert!(updated.sku.is_empty());
        assert_eq!(draft.variant(second).cloned(), sibling_before);
    }

    #[test]
    fn update_unknown_variant_is_a_no_op() {
        let mut draft = ProductDraft::new();
        draft.add_variant();
        let before = draft.clone();

        assert!(!draft.update_variant(VariantId::new(7), VariantField::Sku, "X"));
        assert_eq!(draft, before);
    }

    #[test]
    fn apply_skips_changes_for_unknown_variants() {
        let mut draft = ProductDraft::new();
        let id = draft.add_variant();

        draft
            .apply(
                DraftUpdate::new()
                    .variant(id, VariantField::Sku, "SKU-RED")
                    .variant(VariantId::new(42), VariantField::Sku, "SKU-GHOST"),
            )
            .expect("valid update");

        assert_eq!(draft.variants.len(), 1);
        assert_eq!(draft.variants[0].sku, "SKU-RED");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn draft_with_mask(mask: u8, optional: &str) -> ProductDraft {
            let values = [
                (DraftField::Name, "Steel Shelf"),
                (DraftField::Category, "Office Equipment"),
                (DraftField::StockQuantity, "50"),
                (DraftField::SkuCode, "SKU-001"),
                (DraftField::Weight, "2.5"),
            ];
            let mut draft = ProductDraft::new();
            for (bit, (field, value)) in values.into_iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    draft.set_field(field, value).expect("valid value");
                }
            }
            draft
                .set_field(DraftField::Description, optional)
                .expect("free text");
            draft
                .set_field(DraftField::CostPrice, optional)
                .expect("free text");
            draft
        }

        proptest! {
            #[test]
            fn any_missing_required_field_is_reported(
                mask in 0u8..31,
                optional in ".{0,40}",
            ) {
                let draft = draft_with_mask(mask, &optional);
                prop_assert!(!draft.missing_required_fields().is_empty());
            }

            #[test]
            fn optional_fields_never_block_completeness(optional in ".{0,40}") {
                let draft = draft_with_mask(0b1_1111, &optional);
                prop_assert!(draft.missing_required_fields().is_empty());
            }

            #[test]
            fn add_then_remove_restores_variant_list(
                existing in 0usize..5,
                name in "[A-Za-z ]{0,12}",
            ) {
                let mut draft = ProductDraft::new();
                for _ in 0..existing {
                    let id = draft.add_variant();
                    draft.update_variant(id, VariantField::Name, name.clone());
                }
                let before = draft.variants.clone();

                let id = draft.add_variant();
                prop_assert!(draft.remove_variant(id));

                prop_assert_eq!(draft.variants, before);
            }
        }
    }
}

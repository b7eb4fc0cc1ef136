use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Catalog category a supplier files a new product under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    Electronics,
    OfficeEquipment,
    IndustrialSupplies,
    ConstructionMaterials,
    FoodBeverages,
    HealthBeauty,
    HomeLiving,
    FashionApparel,
    Automotive,
    Agriculture,
    MedicalSupplies,
    Packaging,
}

impl ProductCategory {
    /// Every category in the order it is offered on the form.
    pub const ALL: [ProductCategory; 12] = [
        ProductCategory::Electronics,
        ProductCategory::OfficeEquipment,
        ProductCategory::IndustrialSupplies,
        ProductCategory::ConstructionMaterials,
        ProductCategory::FoodBeverages,
        ProductCategory::HealthBeauty,
        ProductCategory::HomeLiving,
        ProductCategory::FashionApparel,
        ProductCategory::Automotive,
        ProductCategory::Agriculture,
        ProductCategory::MedicalSupplies,
        ProductCategory::Packaging,
    ];

    /// Stable identifier used as the `<option>` value.
    pub fn slug(self) -> &'static str {
        match self {
            ProductCategory::Electronics => "electronics",
            ProductCategory::OfficeEquipment => "office-equipment",
            ProductCategory::IndustrialSupplies => "industrial-supplies",
            ProductCategory::ConstructionMaterials => "construction-materials",
            ProductCategory::FoodBeverages => "food-beverages",
            ProductCategory::HealthBeauty => "health-beauty",
            ProductCategory::HomeLiving => "home-living",
            ProductCategory::FashionApparel => "fashion-apparel",
            ProductCategory::Automotive => "automotive",
            ProductCategory::Agriculture => "agriculture",
            ProductCategory::MedicalSupplies => "medical-supplies",
            ProductCategory::Packaging => "packaging",
        }
    }

    /// Human-readable name shown to the supplier.
    pub fn label(self) -> &'static str {
        match self {
            ProductCategory::Electronics => "Electronics",
            ProductCategory::OfficeEquipment => "Office Equipment",
            ProductCategory::IndustrialSupplies => "Industrial Supplies",
            ProductCategory::ConstructionMaterials => "Construction Materials",
            ProductCategory::FoodBeverages => "Food & Beverages",
            ProductCategory::HealthBeauty => "Health & Beauty",
            ProductCategory::HomeLiving => "Home & Living",
            ProductCategory::FashionApparel => "Fashion & Apparel",
            ProductCategory::Automotive => "Automotive",
            ProductCategory::Agriculture => "Agriculture",
            ProductCategory::MedicalSupplies => "Medical Supplies",
            ProductCategory::Packaging => "Packaging",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProductCategory {
    type Err = ();

    /// Accepts either the slug or the label, ignoring ASCII case and
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        ProductCategory::ALL
            .into_iter()
            .find(|category| {
                category.slug().eq_ignore_ascii_case(value)
                    || category.label().eq_ignore_ascii_case(value)
            })
            .ok_or(())
    }
}

impl Serialize for ProductCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

/// Handling class requested for shipping the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingCategory {
    Standard,
    Express,
    Fragile,
    Perishable,
}

impl ShippingCategory {
    pub const ALL: [ShippingCategory; 4] = [
        ShippingCategory::Standard,
        ShippingCategory::Express,
        ShippingCategory::Fragile,
        ShippingCategory::Perishable,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ShippingCategory::Standard => "standard",
            ShippingCategory::Express => "express",
            ShippingCategory::Fragile => "fragile",
            ShippingCategory::Perishable => "perishable",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShippingCategory::Standard => "Standard",
            ShippingCategory::Express => "Express",
            ShippingCategory::Fragile => "Fragile",
            ShippingCategory::Perishable => "Perishable",
        }
    }
}

impl fmt::Display for ShippingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShippingCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        ShippingCategory::ALL
            .into_iter()
            .find(|category| category.slug().eq_ignore_ascii_case(value))
            .ok_or(())
    }
}

impl Serialize for ShippingCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

/// Option entry rendered inside a `<select>` element.
#[derive(Debug, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Builds the category dropdown with the current choice pre-selected.
pub fn category_options(current: Option<ProductCategory>) -> Vec<SelectOption> {
    ProductCategory::ALL
        .into_iter()
        .map(|category| SelectOption {
            value: category.slug(),
            label: category.label(),
            selected: current == Some(category),
        })
        .collect()
}

/// Builds the shipping category dropdown with the current choice pre-selected.
pub fn shipping_category_options(current: Option<ShippingCategory>) -> Vec<SelectOption> {
    ShippingCategory::ALL
        .into_iter()
        .map(|category| SelectOption {
            value: category.slug(),
            label: category.label(),
            selected: current == Some(category),
        })
        .collect()
}

//! Inventory models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum quantity assumed when an item does not declare one.
pub const DEFAULT_MIN_STOCK: u32 = 5;

fn default_min_stock() -> u32 {
    DEFAULT_MIN_STOCK
}

fn default_unit() -> String {
    "units".to_string()
}

/// A single product or service in the clinic inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    /// Stock Keeping Unit - unique identifier
    pub sku: String,
    /// Display name (e.g., "Suero Oral Rehidratante")
    pub name: String,
    /// Category label (e.g., "Antibióticos", "Exámenes")
    #[serde(default)]
    pub category: String,
    /// Presentation (e.g., "Frasco 500 mL")
    #[serde(default)]
    pub presentation: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Quantity on hand
    #[serde(default)]
    pub quantity: u32,
    /// Low-stock threshold
    #[serde(default = "default_min_stock")]
    pub min_stock: u32,
    #[serde(default)]
    pub unit_price: f64,
    /// Expiry date for physical products
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
    #[serde(default)]
    pub lot: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
}

impl InventoryItem {
    /// Create a new inventory item with required fields.
    pub fn new(sku: String, name: String, category: String) -> Self {
        Self {
            sku,
            name,
            category,
            presentation: String::new(),
            unit: default_unit(),
            quantity: 0,
            min_stock: DEFAULT_MIN_STOCK,
            unit_price: 0.0,
            expires_on: None,
            lot: None,
            supplier: None,
        }
    }

    /// Derived stock state.
    pub fn stock_state(&self) -> StockState {
        StockState::from_levels(self.quantity, self.min_stock)
    }
}

/// Derived stock label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StockState {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockState {
    /// Classify a quantity against its minimum threshold.
    ///
    /// Zero is always out of stock, even when the threshold is zero.
    pub fn from_levels(quantity: u32, min_stock: u32) -> Self {
        if quantity == 0 {
            StockState::OutOfStock
        } else if quantity <= min_stock {
            StockState::LowStock
        } else {
            StockState::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockState::InStock => "in_stock",
            StockState::LowStock => "low_stock",
            StockState::OutOfStock => "out_of_stock",
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, StockState::OutOfStock)
    }
}

/// An inventory item recommended for a diagnosed condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationSuggestion {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub presentation: String,
    pub unit: String,
    pub quantity: u32,
    pub min_stock: u32,
    pub stock_state: StockState,
    pub unit_price: f64,
    /// The medication hint that led to this item
    pub recommended_as: String,
}

impl MedicationSuggestion {
    /// Build a suggestion from an inventory item and the hint that matched it.
    pub fn from_item(item: &InventoryItem, hint: &str) -> Self {
        Self {
            sku: item.sku.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            presentation: item.presentation.clone(),
            unit: item.unit.clone(),
            quantity: item.quantity,
            min_stock: item.min_stock,
            stock_state: item.stock_state(),
            unit_price: item.unit_price,
            recommended_as: hint.to_string(),
        }
    }
}

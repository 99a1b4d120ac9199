//! Inventory search and stock alert models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{InventoryItem, StockState};

/// Filters for an inventory search. Empty filters match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InventoryQuery {
    /// Substring of the item name
    #[serde(default)]
    pub text: Option<String>,
    /// Substring of the category
    #[serde(default)]
    pub category: Option<String>,
    /// Skip items with nothing on hand
    #[serde(default)]
    pub only_available: bool,
}

impl InventoryQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn available_only(mut self) -> Self {
        self.only_available = true;
        self
    }
}

/// An inventory item annotated with its stock state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockedItem {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub stock_state: StockState,
}

impl From<InventoryItem> for StockedItem {
    fn from(item: InventoryItem) -> Self {
        let stock_state = item.stock_state();
        Self { item, stock_state }
    }
}

/// Search results, capped, with the uncapped total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventorySearch {
    pub items: Vec<StockedItem>,
    pub total: usize,
}

/// One product needing attention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockAlert {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub min_stock: u32,
    pub supplier: Option<String>,
    pub lot: Option<String>,
    pub expires_on: Option<NaiveDate>,
    /// Days until expiry; negative once expired
    pub days_to_expiry: Option<i64>,
}

impl StockAlert {
    pub fn from_item(item: &InventoryItem, days_to_expiry: Option<i64>) -> Self {
        Self {
            sku: item.sku.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            min_stock: item.min_stock,
            supplier: item.supplier.clone(),
            lot: item.lot.clone(),
            expires_on: item.expires_on,
            days_to_expiry,
        }
    }
}

/// A recorded stock adjustment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockMovement {
    pub sku: String,
    pub delta: i64,
    pub quantity_after: u32,
    pub reason: String,
    pub created_at: String,
}

/// Alert counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertSummary {
    /// Physical products considered
    pub total_products: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
    pub expired: usize,
    pub expiring_soon: usize,
}

/// Stock alerts for physical products.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StockAlertReport {
    pub out_of_stock: Vec<StockAlert>,
    /// Lowest quantity first
    pub low_stock: Vec<StockAlert>,
    /// Most overdue first
    pub expired: Vec<StockAlert>,
    /// Soonest first
    pub expiring_soon: Vec<StockAlert>,
    pub summary: AlertSummary,
}

impl StockAlertReport {
    pub fn is_clear(&self) -> bool {
        self.out_of_stock.is_empty()
            && self.low_stock.is_empty()
            && self.expired.is_empty()
            && self.expiring_soon.is_empty()
    }
}

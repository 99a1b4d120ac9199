//! Inventory search.

use crate::config::InventoryConfig;
use crate::matcher::normalize;
use crate::models::{InventoryItem, InventoryQuery, InventorySearch, StockedItem};

/// Search the inventory by name and category substrings.
///
/// Both filters compare normalized text. Results are ordered in stock, low,
/// out, then by name, and capped at the configured search limit.
pub fn search_inventory(
    inventory: &[InventoryItem],
    query: &InventoryQuery,
    config: &InventoryConfig,
) -> InventorySearch {
    let text = query.text.as_deref().map(normalize).unwrap_or_default();
    let category = query.category.as_deref().map(normalize).unwrap_or_default();

    let mut items: Vec<StockedItem> = inventory
        .iter()
        .filter(|item| text.is_empty() || normalize(&item.name).contains(&text))
        .filter(|item| category.is_empty() || normalize(&item.category).contains(&category))
        .filter(|item| !query.only_available || item.quantity > 0)
        .cloned()
        .map(StockedItem::from)
        .collect();

    items.sort_by(|a, b| {
        a.stock_state
            .cmp(&b.stock_state)
            .then_with(|| normalize(&a.item.name).cmp(&normalize(&b.item.name)))
            .then_with(|| a.item.name.cmp(&b.item.name))
    });

    let total = items.len();
    items.truncate(config.search_limit);

    tracing::debug!(
        text = %text,
        category = %category,
        total,
        "inventory search"
    );

    InventorySearch { items, total }
}

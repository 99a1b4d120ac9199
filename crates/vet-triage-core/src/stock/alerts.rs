//! Stock and expiry alerts for physical products.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::config::InventoryConfig;
use crate::matcher::normalize;
use crate::models::{AlertSummary, InventoryItem, StockAlert, StockAlertReport, StockState};

/// Collect stock alerts as of `today`.
///
/// Service categories carry no physical stock and are skipped. An item can
/// be both low on stock and close to expiry, in which case it is listed
/// under both.
pub fn stock_alerts(
    inventory: &[InventoryItem],
    config: &InventoryConfig,
    today: NaiveDate,
) -> StockAlertReport {
    let services: HashSet<String> = config
        .service_categories
        .iter()
        .map(|c| normalize(c))
        .collect();

    let mut report = StockAlertReport::default();

    for item in inventory
        .iter()
        .filter(|item| !services.contains(&normalize(&item.category)))
    {
        report.summary.total_products += 1;

        let days_to_expiry = item
            .expires_on
            .map(|date| date.signed_duration_since(today).num_days());

        match item.stock_state() {
            StockState::OutOfStock => report
                .out_of_stock
                .push(StockAlert::from_item(item, days_to_expiry)),
            StockState::LowStock => report
                .low_stock
                .push(StockAlert::from_item(item, days_to_expiry)),
            StockState::InStock => {}
        }

        match days_to_expiry {
            Some(days) if days < 0 => report
                .expired
                .push(StockAlert::from_item(item, days_to_expiry)),
            Some(days) if days <= config.expiry_window_days => report
                .expiring_soon
                .push(StockAlert::from_item(item, days_to_expiry)),
            _ => {}
        }
    }

    report.low_stock.sort_by_key(|a| a.quantity);
    report.expired.sort_by_key(|a| a.days_to_expiry);
    report.expiring_soon.sort_by_key(|a| a.days_to_expiry);

    report.summary = AlertSummary {
        total_products: report.summary.total_products,
        out_of_stock: report.out_of_stock.len(),
        low_stock: report.low_stock.len(),
        expired: report.expired.len(),
        expiring_soon: report.expiring_soon.len(),
    };

    if !report.is_clear() {
        tracing::info!(
            out_of_stock = report.summary.out_of_stock,
            low_stock = report.summary.low_stock,
            expired = report.summary.expired,
            expiring_soon = report.summary.expiring_soon,
            "stock alerts"
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn item(sku: &str, category: &str, quantity: u32, expires_on: Option<&str>) -> InventoryItem {
        let mut item = InventoryItem::new(sku.into(), format!("Producto {sku}"), category.into());
        item.quantity = quantity;
        item.expires_on = expires_on.map(|d| d.parse().unwrap());
        item
    }

    #[test]
    fn test_services_skipped() {
        let inventory = vec![
            item("C-1", "Consultas", 0, None),
            item("E-1", "Examenes", 0, None),
            item("M-1", "Antibióticos", 0, None),
        ];
        let report = stock_alerts(&inventory, &InventoryConfig::default(), today());

        assert_eq!(report.summary.total_products, 1);
        assert_eq!(report.out_of_stock.len(), 1);
        assert_eq!(report.out_of_stock[0].sku, "M-1");
    }

    #[test]
    fn test_low_stock_sorted_by_quantity() {
        let inventory = vec![
            item("L-1", "Sueros", 4, None),
            item("L-2", "Sueros", 1, None),
            item("OK", "Sueros", 40, None),
        ];
        let report = stock_alerts(&inventory, &InventoryConfig::default(), today());

        let skus: Vec<&str> = report.low_stock.iter().map(|a| a.sku.as_str()).collect();
        assert_eq!(skus, vec!["L-2", "L-1"]);
        assert!(report.out_of_stock.is_empty());
    }

    #[test]
    fn test_expiry_buckets() {
        let inventory = vec![
            item("X-1", "Vacunas", 20, Some("2024-05-30")),
            item("X-2", "Vacunas", 20, Some("2024-01-01")),
            item("S-1", "Vacunas", 20, Some("2024-07-31")),
            item("S-2", "Vacunas", 20, Some("2024-06-01")),
            item("F-1", "Vacunas", 20, Some("2024-08-01")),
        ];
        let report = stock_alerts(&inventory, &InventoryConfig::default(), today());

        let expired: Vec<&str> = report.expired.iter().map(|a| a.sku.as_str()).collect();
        assert_eq!(expired, vec!["X-2", "X-1"]);
        assert_eq!(report.expired[1].days_to_expiry, Some(-2));

        // 2024-07-31 is exactly 60 days out; 2024-08-01 is 61
        let soon: Vec<&str> = report.expiring_soon.iter().map(|a| a.sku.as_str()).collect();
        assert_eq!(soon, vec!["S-2", "S-1"]);
        assert_eq!(report.summary.expiring_soon, 2);
        assert_eq!(report.summary.expired, 2);
    }

    #[test]
    fn test_clear_inventory() {
        let inventory = vec![item("OK", "Sueros", 40, Some("2030-01-01"))];
        let report = stock_alerts(&inventory, &InventoryConfig::default(), today());
        assert!(report.is_clear());
        assert_eq!(report.summary.total_products, 1);
    }
}

//! Inventory database operations.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use super::{Database, DbError, DbResult};
use crate::models::{InventoryItem, StockMovement};

const ITEM_COLUMNS: &str = "sku, name, category, presentation, unit, quantity, min_stock, \
     unit_price, expires_on, lot, supplier";

const DATE_FORMAT: &str = "%Y-%m-%d";

impl Database {
    /// Insert or update an inventory item.
    pub fn upsert_inventory_item(&self, item: &InventoryItem) -> DbResult<()> {
        upsert_inventory_item(&self.conn, item)
    }

    /// Get an inventory item by SKU.
    pub fn get_inventory_item(&self, sku: &str) -> DbResult<Option<InventoryItem>> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM inventory_items WHERE sku = ?");
        let result = self
            .conn
            .query_row(&sql, [sku], InventoryItemRow::from_row)
            .optional()?;

        result.map(|row| row.try_into()).transpose()
    }

    /// All inventory items in insertion order.
    pub fn list_inventory_items(&self) -> DbResult<Vec<InventoryItem>> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM inventory_items ORDER BY rowid");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], InventoryItemRow::from_row)?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?.try_into()?);
        }
        Ok(items)
    }

    /// Delete an inventory item and its movement history.
    pub fn delete_inventory_item(&self, sku: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM inventory_items WHERE sku = ?", [sku])?;
        Ok(rows_affected > 0)
    }

    /// Add `delta` (negative to dispense) to an item's quantity.
    ///
    /// The read and the write happen inside one IMMEDIATE transaction, so two
    /// concurrent adjustments cannot both pass the non-negative check.
    /// Returns the new quantity.
    pub fn adjust_stock(&mut self, sku: &str, delta: i64, reason: &str) -> DbResult<u32> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current: u32 = tx
            .query_row(
                "SELECT quantity FROM inventory_items WHERE sku = ?",
                [sku],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| DbError::NotFound(format!("inventory item {sku}")))?;

        let updated = i64::from(current) + delta;
        let quantity = match u32::try_from(updated) {
            Ok(quantity) => quantity,
            Err(_) => {
                tracing::warn!(sku, current, delta, "stock adjustment rejected");
                return Err(DbError::Constraint(format!(
                    "adjusting {sku} by {delta} leaves {updated} units"
                )));
            }
        };

        tx.execute(
            "UPDATE inventory_items SET quantity = ?1, updated_at = datetime('now') WHERE sku = ?2",
            params![quantity, sku],
        )?;
        tx.execute(
            "INSERT INTO stock_movements (sku, delta, quantity_after, reason) VALUES (?1, ?2, ?3, ?4)",
            params![sku, delta, quantity, reason],
        )?;
        tx.commit()?;

        tracing::info!(sku, delta, quantity, "stock adjusted");
        Ok(quantity)
    }

    /// Recorded adjustments for an item, oldest first.
    pub fn stock_movements(&self, sku: &str) -> DbResult<Vec<StockMovement>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT sku, delta, quantity_after, reason, created_at
            FROM stock_movements
            WHERE sku = ?
            ORDER BY id
            "#,
        )?;
        let rows = stmt.query_map([sku], |row| {
            Ok(StockMovement {
                sku: row.get(0)?,
                delta: row.get(1)?,
                quantity_after: row.get(2)?,
                reason: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;

        let mut movements = Vec::new();
        for row in rows {
            movements.push(row?);
        }
        Ok(movements)
    }
}

pub(super) fn upsert_inventory_item(conn: &Connection, item: &InventoryItem) -> DbResult<()> {
    if item.sku.trim().is_empty() {
        return Err(DbError::Constraint("inventory item without SKU".into()));
    }

    let expires_on = item.expires_on.map(|d| d.format(DATE_FORMAT).to_string());

    conn.execute(
        r#"
        INSERT INTO inventory_items (
            sku, name, category, presentation, unit, quantity, min_stock,
            unit_price, expires_on, lot, supplier, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, datetime('now'))
        ON CONFLICT(sku) DO UPDATE SET
            name = excluded.name,
            category = excluded.category,
            presentation = excluded.presentation,
            unit = excluded.unit,
            quantity = excluded.quantity,
            min_stock = excluded.min_stock,
            unit_price = excluded.unit_price,
            expires_on = excluded.expires_on,
            lot = excluded.lot,
            supplier = excluded.supplier,
            updated_at = datetime('now')
        "#,
        params![
            item.sku,
            item.name,
            item.category,
            item.presentation,
            item.unit,
            item.quantity,
            item.min_stock,
            item.unit_price,
            expires_on,
            item.lot,
            item.supplier,
        ],
    )?;
    Ok(())
}

/// Intermediate row struct for database mapping.
struct InventoryItemRow {
    sku: String,
    name: String,
    category: String,
    presentation: String,
    unit: String,
    quantity: u32,
    min_stock: u32,
    unit_price: f64,
    expires_on: Option<String>,
    lot: Option<String>,
    supplier: Option<String>,
}

impl InventoryItemRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            sku: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            presentation: row.get(3)?,
            unit: row.get(4)?,
            quantity: row.get(5)?,
            min_stock: row.get(6)?,
            unit_price: row.get(7)?,
            expires_on: row.get(8)?,
            lot: row.get(9)?,
            supplier: row.get(10)?,
        })
    }
}

impl TryFrom<InventoryItemRow> for InventoryItem {
    type Error = DbError;

    fn try_from(row: InventoryItemRow) -> Result<Self, Self::Error> {
        Ok(InventoryItem {
            sku: row.sku,
            name: row.name,
            category: row.category,
            presentation: row.presentation,
            unit: row.unit,
            quantity: row.quantity,
            min_stock: row.min_stock,
            unit_price: row.unit_price,
            expires_on: row
                .expires_on
                .map(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT))
                .transpose()?,
            lot: row.lot,
            supplier: row.supplier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        let mut item = InventoryItem::new("AMX-250".into(), "Amoxicilina 250mg".into(), "Antibióticos".into());
        item.quantity = 10;
        item.unit_price = 4.5;
        item.expires_on = NaiveDate::from_ymd_opt(2025, 3, 31);
        item.lot = Some("L-0042".into());
        db.upsert_inventory_item(&item).unwrap();
        db
    }

    #[test]
    fn test_upsert_and_get() {
        let db = setup_db();
        let item = db.get_inventory_item("AMX-250").unwrap().unwrap();
        assert_eq!(item.name, "Amoxicilina 250mg");
        assert_eq!(item.quantity, 10);
        assert_eq!(item.expires_on, NaiveDate::from_ymd_opt(2025, 3, 31));
        assert_eq!(item.lot.as_deref(), Some("L-0042"));
        assert!(db.get_inventory_item("missing").unwrap().is_none());
    }

    #[test]
    fn test_adjust_stock_records_movement() {
        let mut db = setup_db();
        assert_eq!(db.adjust_stock("AMX-250", -4, "dispensed").unwrap(), 6);
        assert_eq!(db.adjust_stock("AMX-250", 20, "restock").unwrap(), 26);

        let movements = db.stock_movements("AMX-250").unwrap();
        assert_eq!(movements.len(), 2);
        assert_eq!(movements[0].delta, -4);
        assert_eq!(movements[0].quantity_after, 6);
        assert_eq!(movements[1].reason, "restock");
    }

    #[test]
    fn test_adjust_stock_refuses_negative() {
        let mut db = setup_db();
        let result = db.adjust_stock("AMX-250", -11, "dispensed");
        assert!(matches!(result, Err(DbError::Constraint(_))));

        // nothing changed
        let item = db.get_inventory_item("AMX-250").unwrap().unwrap();
        assert_eq!(item.quantity, 10);
        assert!(db.stock_movements("AMX-250").unwrap().is_empty());
    }

    #[test]
    fn test_adjust_unknown_sku() {
        let mut db = setup_db();
        let result = db.adjust_stock("nope", 1, "restock");
        assert!(matches!(result, Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_list_and_delete() {
        let db = setup_db();
        db.upsert_inventory_item(&InventoryItem::new("B-1".into(), "Bozal".into(), "Accesorios".into()))
            .unwrap();

        let skus: Vec<String> = db
            .list_inventory_items()
            .unwrap()
            .into_iter()
            .map(|i| i.sku)
            .collect();
        assert_eq!(skus, vec!["AMX-250", "B-1"]);

        assert!(db.delete_inventory_item("B-1").unwrap());
        assert_eq!(db.list_inventory_items().unwrap().len(), 1);
    }
}

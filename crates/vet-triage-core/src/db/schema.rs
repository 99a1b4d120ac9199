//! SQLite schema definition.

/// Complete database schema for vet-triage.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Condition catalog
-- ============================================================================

CREATE TABLE IF NOT EXISTS conditions (
    id INTEGER PRIMARY KEY,
    position INTEGER NOT NULL,                    -- catalog order, kept across updates
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    severity TEXT NOT NULL DEFAULT '',
    urgency TEXT NOT NULL DEFAULT '',
    symptoms TEXT NOT NULL DEFAULT '[]',          -- JSON array of strings
    species TEXT NOT NULL DEFAULT '[]',           -- JSON array of strings
    treatment TEXT NOT NULL DEFAULT '',
    prevention TEXT NOT NULL DEFAULT '',
    medications TEXT NOT NULL DEFAULT '[]',       -- JSON array of strings
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_conditions_name ON conditions(name);
CREATE INDEX IF NOT EXISTS idx_conditions_position ON conditions(position);

-- ============================================================================
-- Condition -> medication names
-- ============================================================================

CREATE TABLE IF NOT EXISTS medication_hints (
    condition_name TEXT PRIMARY KEY,
    medications TEXT NOT NULL DEFAULT '[]',       -- JSON array of strings
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Inventory
-- ============================================================================

CREATE TABLE IF NOT EXISTS inventory_items (
    sku TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT NOT NULL DEFAULT '',
    presentation TEXT NOT NULL DEFAULT '',
    unit TEXT NOT NULL DEFAULT 'units',
    quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0),
    min_stock INTEGER NOT NULL DEFAULT 5,
    unit_price REAL NOT NULL DEFAULT 0,
    expires_on TEXT,                              -- ISO 8601 date
    lot TEXT,
    supplier TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_inventory_category ON inventory_items(category);

-- Append-only record of stock adjustments
CREATE TABLE IF NOT EXISTS stock_movements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sku TEXT NOT NULL REFERENCES inventory_items(sku) ON DELETE CASCADE,
    delta INTEGER NOT NULL,
    quantity_after INTEGER NOT NULL,
    reason TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_movements_sku ON stock_movements(sku);
"#;

//! Default column suggestions for well-known tables.
//!
//! There is no catalog behind the analyzer, so the column lists used to
//! replace `SELECT *` come from this fixed mapping. Any table not listed
//! falls back to [`KnownTable::Other`], which suggests `id, name`.

/// Tables with hard-coded column suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownTable {
    Users,
    Orders,
    Products,
    /// Fallback for every other table name
    Other
}

impl KnownTable {
    /// Resolve a table name, ignoring case.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "users" => Self::Users,
            "orders" => Self::Orders,
            "products" => Self::Products,
            _ => Self::Other
        }
    }

    /// Columns suggested in place of `*`.
    ///
    /// When the statement already references columns in `WHERE` or
    /// `ORDER BY`, those come first and the shorter list is appended.
    pub fn default_columns(self, has_referenced: bool) -> &'static [&'static str] {
        match (self, has_referenced) {
            (Self::Users, true) => &["id", "name", "email", "number"],
            (Self::Users, false) => &["id", "name", "email", "created_at"],
            (Self::Orders, true) => &["id", "user_id", "total", "status"],
            (Self::Orders, false) => &["id", "user_id", "total", "status", "created_at"],
            (Self::Products, true) => &["id", "name", "price", "category"],
            (Self::Products, false) => &["id", "name", "price", "category", "stock"],
            (Self::Other, _) => &["id", "name"]
        }
    }
}

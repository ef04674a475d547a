mod expr;
mod set_expr;
mod table;

pub use expr::count_expr;
pub use set_expr::count_query;
use sqlparser::ast::{FromTable, Statement};
pub use table::count_table_with_joins;

use super::QueryComplexity;

/// Count the structural elements of one statement
pub fn count_statement(stmt: &Statement, complexity: &mut QueryComplexity) {
    match stmt {
        Statement::Query(query) => count_query(query, complexity),
        Statement::Insert(insert) => {
            complexity.tables += 1;
            if let Some(source) = &insert.source {
                count_query(source, complexity);
            }
        }
        Statement::Update(update) => {
            count_table_with_joins(&update.table, complexity);
            if let Some(sel) = &update.selection {
                complexity.conditions += 1;
                count_expr(sel, complexity);
            }
        }
        Statement::Delete(delete) => {
            if let FromTable::WithFromKeyword(items) | FromTable::WithoutKeyword(items) =
                &delete.from
            {
                for item in items {
                    count_table_with_joins(item, complexity);
                }
            }
            if let Some(sel) = &delete.selection {
                complexity.conditions += 1;
                count_expr(sel, complexity);
            }
        }
        _ => {}
    }
}

use sqlparser::ast::{Query, SelectItem, SetExpr};

use super::{count_expr, count_table_with_joins};
use crate::query::QueryComplexity;

pub fn count_query(query: &Query, complexity: &mut QueryComplexity) {
    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            count_query(&cte.query, complexity);
        }
    }
    count_set_expr(&query.body, complexity);
}

fn count_set_expr(set_expr: &SetExpr, complexity: &mut QueryComplexity) {
    match set_expr {
        SetExpr::Select(select) => {
            for item in &select.projection {
                if let SelectItem::UnnamedExpr(expr)
                | SelectItem::ExprWithAlias {
                    expr, ..
                } = item
                {
                    count_expr(expr, complexity);
                }
            }
            for table in &select.from {
                count_table_with_joins(table, complexity);
            }
            if let Some(selection) = &select.selection {
                complexity.conditions += 1;
                count_expr(selection, complexity);
            }
            if let Some(having) = &select.having {
                count_expr(having, complexity);
            }
        }
        SetExpr::SetOperation {
            left,
            right,
            ..
        } => {
            count_set_expr(left, complexity);
            count_set_expr(right, complexity);
        }
        SetExpr::Query(query) => count_query(query, complexity),
        _ => {}
    }
}

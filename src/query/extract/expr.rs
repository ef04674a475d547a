use sqlparser::ast::{Expr, FunctionArg, FunctionArgExpr, FunctionArguments};

use super::count_query;
use crate::query::QueryComplexity;

pub fn count_expr(expr: &Expr, complexity: &mut QueryComplexity) {
    match expr {
        Expr::Subquery(query) => {
            complexity.subqueries += 1;
            count_query(query, complexity);
        }
        Expr::InSubquery {
            expr,
            subquery,
            ..
        } => {
            complexity.subqueries += 1;
            count_expr(expr, complexity);
            count_query(subquery, complexity);
        }
        Expr::Exists {
            subquery, ..
        } => {
            complexity.subqueries += 1;
            count_query(subquery, complexity);
        }
        Expr::BinaryOp {
            left,
            right,
            ..
        } => {
            count_expr(left, complexity);
            count_expr(right, complexity);
        }
        Expr::UnaryOp {
            expr, ..
        }
        | Expr::Cast {
            expr, ..
        }
        | Expr::Nested(expr)
        | Expr::IsNull(expr)
        | Expr::IsNotNull(expr) => {
            count_expr(expr, complexity);
        }
        Expr::InList {
            expr,
            list,
            ..
        } => {
            count_expr(expr, complexity);
            for item in list {
                count_expr(item, complexity);
            }
        }
        Expr::Between {
            expr,
            low,
            high,
            ..
        } => {
            count_expr(expr, complexity);
            count_expr(low, complexity);
            count_expr(high, complexity);
        }
        Expr::Function(func) => {
            if let FunctionArguments::List(arg_list) = &func.args {
                for arg in &arg_list.args {
                    if let FunctionArg::Unnamed(FunctionArgExpr::Expr(e)) = arg {
                        count_expr(e, complexity);
                    }
                }
            }
        }
        Expr::Case {
            operand,
            conditions,
            else_result,
            ..
        } => {
            if let Some(op) = operand {
                count_expr(op, complexity);
            }
            for case_when in conditions {
                count_expr(&case_when.condition, complexity);
                count_expr(&case_when.result, complexity);
            }
            if let Some(else_res) = else_result {
                count_expr(else_res, complexity);
            }
        }
        _ => {}
    }
}

use sqlparser::ast::{JoinConstraint, JoinOperator, TableFactor, TableWithJoins};

use super::{count_expr, count_query};
use crate::query::QueryComplexity;

pub fn count_table_with_joins(table: &TableWithJoins, complexity: &mut QueryComplexity) {
    count_table_factor(&table.relation, complexity);
    for join in &table.joins {
        complexity.joins += 1;
        count_table_factor(&join.relation, complexity);
        match &join.join_operator {
            JoinOperator::Join(constraint)
            | JoinOperator::Inner(constraint)
            | JoinOperator::Left(constraint)
            | JoinOperator::LeftOuter(constraint)
            | JoinOperator::Right(constraint)
            | JoinOperator::RightOuter(constraint)
            | JoinOperator::FullOuter(constraint)
            | JoinOperator::Semi(constraint)
            | JoinOperator::LeftSemi(constraint)
            | JoinOperator::RightSemi(constraint)
            | JoinOperator::Anti(constraint)
            | JoinOperator::LeftAnti(constraint)
            | JoinOperator::RightAnti(constraint) => {
                if let JoinConstraint::On(expr) = constraint {
                    count_expr(expr, complexity);
                }
            }
            _ => {}
        }
    }
}

fn count_table_factor(table_factor: &TableFactor, complexity: &mut QueryComplexity) {
    match table_factor {
        TableFactor::Table {
            ..
        } => {
            complexity.tables += 1;
        }
        TableFactor::Derived {
            subquery, ..
        } => {
            complexity.subqueries += 1;
            count_query(subquery, complexity);
        }
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => {
            count_table_with_joins(table_with_joins, complexity);
        }
        _ => {}
    }
}

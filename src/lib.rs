//! # SQL Optimizer Library
//!
//! Syntax checking, rule-based analysis and rewriting of SQL statements.

pub mod app;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod output;
pub mod query;
pub mod rules;
pub mod server;
pub mod syntax;

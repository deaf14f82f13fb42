//! Tally - keyword-rule categorization for bank statements
//!
//! This library classifies bank-statement transactions into user-defined
//! spending categories using keyword rules that persist between runs, and
//! learns a new rule every time the user corrects a category by hand.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Transactions, money and category rules
//! - `storage`: JSON file storage for the rule store
//! - `services`: Rule store, classifier, learning feedback, statement import
//! - `reports`: Spending aggregation
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::config::paths::TallyPaths;
//! use tally::services::{RuleStore, Session, StatementImport};
//! use tally::storage::rule_file;
//!
//! let paths = TallyPaths::new()?;
//! let mut session = Session::new(RuleStore::open(rule_file(&paths)));
//! session.upload(StatementImport::default().parse_file("statement.csv".as_ref())?);
//! let dashboard = session.render();
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};

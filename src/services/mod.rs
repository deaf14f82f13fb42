//! Service layer for Tally
//!
//! Business logic on top of the storage layer: the rule store, the keyword
//! classifier, learning from corrections, statement import and the
//! interactive session that ties them together.

pub mod classifier;
pub mod feedback;
pub mod import;
pub mod rules;
pub mod session;

pub use classifier::{classify, Classifier};
pub use feedback::{EditReport, LearningFeedback};
pub use import::StatementImport;
pub use rules::RuleStore;
pub use session::{Dashboard, Session};

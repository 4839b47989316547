//! Request side of dispatch
//! - rule.rs: extraction rules (header, query, route parameter)
//! - extractor.rs: RequestView trait and requested version extraction

pub mod extractor;
pub mod rule;

pub use extractor::{RequestView, extract_version};
pub use rule::{RuleError, RuleKind, VersionRule, default_rules};

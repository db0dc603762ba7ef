//! # yoga-guardrail
//!
//! Safety screening for user queries.
//!
//! Queries that mention a medical condition, injury or pregnancy are not
//! answered from the knowledge base. [`SafetyFilter`] flags them and
//! [`advisory_message`] renders the warning shown instead.
//!
//! ```rust
//! use yoga_guardrail::{SafetyFilter, SafetyVerdict};
//!
//! let filter = SafetyFilter::default();
//! let verdict = filter.classify("Is it safe to do backbends during pregnancy?");
//! assert_eq!(verdict, SafetyVerdict::Unsafe { term: "pregnancy".into() });
//! assert!(filter.classify("How do I do downward dog?").is_safe());
//! ```

mod advisory;
mod safety;

pub use advisory::{SAFETY_BLOCKED_CATEGORY, advisory_message};
pub use safety::{DEFAULT_DENYLIST, SafetyFilter, SafetyVerdict};

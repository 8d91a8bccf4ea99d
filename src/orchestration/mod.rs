//! Task routing.
//!
//! Complexity scoring, role and tier selection, and the static delegation
//! tables. Everything here is synchronous and side-effect free apart from
//! debug logging.

pub mod complexity;
pub mod delegation;
pub mod selector;

pub use complexity::{analyze, analyze_named, ComplexityLevel, ComplexityResult};
pub use delegation::DelegationEngine;
pub use selector::{
    ExecutionContext, NoSkills, Selection, Selector, SkillMatcher, SkillRule, StaticSkillMatcher,
};

//! GitHub fork reporting tool
//!
//! - CLI surface in `cli`
//! - `.ghtoken` credential discovery in `token`
//! - sorted branch diffing in `diff`
//! - fork selection and report emission in `report`

pub mod cli;
pub mod diff;
pub mod report;
pub mod token;

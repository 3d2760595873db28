//! Property-based tests for outcomes and mapping

mod mapping_laws;
mod outcome_laws;

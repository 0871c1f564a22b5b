//! Cross-reference service for claim files
//!
//! Everything that needs more than one record lives here:
//!
//! - [`index`] - The compact [`ValidationIndex`] built in pass 1
//! - [`cross_record`] - Pass-2 reference resolution, accumulation and blended shares
//! - [`aggregator`] - Declared vs accumulated summary totals
//! - [`structure`] - Header/footer placement and footer checksums
//!
//! The index is owned by one validation run and handed by reference to each
//! phase in turn.

pub mod aggregator;
pub mod cross_record;
pub mod index;
pub mod structure;

#[cfg(test)]
pub mod tests;

pub use aggregator::aggregate_totals;
pub use cross_record::check_detail_reference;
pub use index::{SummaryIndexEntry, ValidationIndex};
pub use structure::check_structure;

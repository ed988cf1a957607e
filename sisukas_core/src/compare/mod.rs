//! Comparison primitives shared by the rule kinds
//!
//! Every function here is total: no input is rejected. Deciding whether a range is
//! usable at all is left to the rules, which treat malformed ranges as "no match".

pub mod array;
pub mod date_range;
pub mod numeric_range;

pub use array::MatchOptions;
pub use date_range::DateRange;
pub use numeric_range::NumericRange;

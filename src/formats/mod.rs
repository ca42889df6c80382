//! Text formats the roster is read from and written to

pub mod listing;
pub mod records;
pub mod report;

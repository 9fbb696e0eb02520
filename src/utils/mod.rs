//! Generic index helpers shared by every component.

pub mod circular;
pub mod duplicates;

//! Terminal presentation of fetched rates

pub mod output;
pub mod ui;

pub use output::{OutputFormat, render};

//! Stats module - statement summary

mod calculator;

pub use calculator::{CategoryTotal, Summary, SummaryCalculator};

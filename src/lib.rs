/// Science Guide - AI-Generated Study Material for Class 10 Science
///
/// Core library providing subject/chapter selection, prompt and schema
/// construction, response validation, and plain-text export for MCQs,
/// subjective question sets, study guides, and concept maps.

pub mod config;
pub mod core;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

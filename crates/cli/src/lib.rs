//! Subfont command-line library.

pub mod cli;
pub mod io;
pub mod parallel;
pub mod subset;

pub use subfont_subsetter::{Subsetter, encode_suffix, subset_family_name};

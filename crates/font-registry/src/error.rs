use std::result;

use read_fonts::ReadError;
use subfont_subsetter::SubsetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to subset font: {0}")]
    Subset(#[from] SubsetError),

    #[error("failed to read font: {0}")]
    Read(#[from] ReadError),

    #[error("font {index} has no family name")]
    MissingFamilyName { index: u32 },

    #[error("no font registered for family '{0}'")]
    FontNotFound(String),
}

pub type Result<T> = result::Result<T, RegistryError>;

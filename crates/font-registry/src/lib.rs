//! Family-name keyed font registry with subset management.
//!
//! Subset fonts produced by `subfont-subsetter` carry family names of the
//! form `"<family>+<encoded suffix>"`. The helpers here register such
//! subsets and later replace or remove them by name or by suffix.

mod error;
mod family;
mod registry;
mod subset;

pub use error::{RegistryError, Result};
pub use family::family_names;
pub use registry::{FontRegistry, InMemoryRegistry};
pub use subset::{
    register_subset, register_subset_of, remove_subset_by_name, remove_subsets_by_suffix,
    update_subset,
};

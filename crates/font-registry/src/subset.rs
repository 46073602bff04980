//! Registering subsets of fonts under suffixed family names.

use log::info;
use subfont_subsetter::{encode_suffix, subset_family_name, subset_fonts};

use crate::{
    error::{RegistryError, Result},
    registry::FontRegistry,
};

/// Subsets `font` for `text` and registers every resulting font.
///
/// Subsetting happens before the registry is touched, so a failure leaves
/// it unchanged.
pub fn register_subset<R: FontRegistry + ?Sized>(
    registry: &R,
    font: &[u8],
    text: &str,
    suffix: Option<&str>,
    include_ascii_printable: bool,
) -> Result<()> {
    let subsets = subset_fonts(font, text, suffix, include_ascii_printable)?;
    info!("Registering {} subset font(s)", subsets.len());
    for subset in subsets {
        registry.register(subset)?;
    }
    Ok(())
}

/// Subsets the font registered as `family` and registers the result,
/// returning the family name to request it by.
///
/// Printable ASCII is always retained.
pub fn register_subset_of<R: FontRegistry + ?Sized>(
    registry: &R,
    family: &str,
    text: &str,
    suffix: Option<&str>,
) -> Result<String> {
    let font = registry
        .lookup(family)
        .into_iter()
        .next()
        .ok_or_else(|| RegistryError::FontNotFound(family.to_string()))?;
    register_subset(registry, &font, text, suffix, true)?;
    Ok(subset_family_name(family, suffix))
}

/// Replaces the previous subsets built with `suffix` by subsets of `font`
/// for `text`, returning how many registrations were replaced.
pub fn update_subset<R: FontRegistry + ?Sized>(
    registry: &R,
    font: &[u8],
    text: &str,
    suffix: &str,
    include_ascii_printable: bool,
) -> Result<usize> {
    let subsets = subset_fonts(font, text, Some(suffix), include_ascii_printable)?;
    let marker = format!("+{}", encode_suffix(suffix));
    registry.replace_where(&|family| family.ends_with(&marker), subsets)
}

/// Removes the fonts registered under exactly `family`.
pub fn remove_subset_by_name<R: FontRegistry + ?Sized>(registry: &R, family: &str) -> usize {
    registry.remove_where(&|registered| registered == family)
}

/// Removes every subset built with `suffix`.
pub fn remove_subsets_by_suffix<R: FontRegistry + ?Sized>(registry: &R, suffix: &str) -> usize {
    let marker = format!("+{}", encode_suffix(suffix));
    registry.remove_where(&|family| family.ends_with(&marker))
}

//! Assembly of a rebuilt table set into a font binary.

use write_fonts::FontBuilder;

use crate::rebuild::TableSet;

/// Serializes `tables` into a single sfnt binary.
///
/// Tables are laid out in tag order with 4-byte padding, so identical input
/// always yields identical bytes. The builder zeroes and then fills in
/// `head.checksumAdjustment` over the finished file.
pub fn serialize(tables: &TableSet) -> Vec<u8> {
    let mut builder = FontBuilder::new();
    for (tag, data) in tables.iter() {
        builder.add_raw(tag, data);
    }
    builder.build()
}

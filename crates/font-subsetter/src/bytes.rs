//! Big-endian writes for data handled as raw bytes.

use read_fonts::types::Tag;

use crate::error::ParseError;

pub(crate) fn write_u16(writer: &mut Vec<u8>, value: u16) {
    writer.extend_from_slice(&value.to_be_bytes());
}

pub(crate) fn write_u16_at(
    data: &mut [u8],
    offset: usize,
    value: u16,
    tag: Tag,
) -> Result<(), ParseError> {
    data.get_mut(offset..offset + 2)
        .map(|b| b.copy_from_slice(&value.to_be_bytes()))
        .ok_or(ParseError::UnexpectedEof { tag, offset })
}

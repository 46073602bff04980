//! Text encodings of `name` records.

use encoding_rs::SHIFT_JIS;
use log::warn;

const PLATFORM_UNICODE: u16 = 0;
const PLATFORM_MACINTOSH: u16 = 1;
const PLATFORM_WINDOWS: u16 = 3;

const UNICODE_2_0: u16 = 4;
const MACINTOSH_JAPANESE: u16 = 1;
const WINDOWS_UNICODE_BMP: u16 = 1;
const WINDOWS_SHIFT_JIS: u16 = 2;
const WINDOWS_UNICODE_UCS4: u16 = 10;

/// Encoding used for a `name` record's string bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf16Be,
    Utf32Be,
    ShiftJis,
    Utf8,
}

impl TextEncoding {
    /// Resolves the encoding for a record's platform and encoding ids.
    ///
    /// Combinations without a dedicated encoding fall back to UTF-8.
    pub fn for_record(platform_id: u16, encoding_id: u16) -> Self {
        match (platform_id, encoding_id) {
            (PLATFORM_UNICODE, UNICODE_2_0) => Self::Utf32Be,
            (PLATFORM_UNICODE, _) => Self::Utf16Be,
            (PLATFORM_MACINTOSH, MACINTOSH_JAPANESE) => Self::ShiftJis,
            (PLATFORM_WINDOWS, WINDOWS_UNICODE_BMP) => Self::Utf16Be,
            (PLATFORM_WINDOWS, WINDOWS_SHIFT_JIS) => Self::ShiftJis,
            (PLATFORM_WINDOWS, WINDOWS_UNICODE_UCS4) => Self::Utf32Be,
            _ => {
                warn!("No encoding for platform {platform_id} encoding {encoding_id}, using UTF-8");
                Self::Utf8
            }
        }
    }

    /// Decodes record bytes, replacing malformed sequences with U+FFFD.
    ///
    /// A trailing partial code unit also decodes to U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf16Be => {
                let chunks = bytes.chunks_exact(2);
                let partial = !chunks.remainder().is_empty();
                let units = chunks.map(|b| u16::from_be_bytes([b[0], b[1]]));
                let mut text: String = char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect();
                if partial {
                    text.push(char::REPLACEMENT_CHARACTER);
                }
                text
            }
            Self::Utf32Be => {
                let chunks = bytes.chunks_exact(4);
                let partial = !chunks.remainder().is_empty();
                let mut text: String = chunks
                    .map(|b| {
                        char::from_u32(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
                            .unwrap_or(char::REPLACEMENT_CHARACTER)
                    })
                    .collect();
                if partial {
                    text.push(char::REPLACEMENT_CHARACTER);
                }
                text
            }
            Self::ShiftJis => SHIFT_JIS.decode_without_bom_handling(bytes).0.into_owned(),
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Self::Utf32Be => text.chars().flat_map(|c| u32::from(c).to_be_bytes()).collect(),
            Self::ShiftJis => SHIFT_JIS.encode(text).0.into_owned(),
            Self::Utf8 => text.as_bytes().to_vec(),
        }
    }
}

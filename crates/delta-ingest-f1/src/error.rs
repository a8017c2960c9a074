use crate::{HEADER_SIZE, NUM_CARS};

/// Why a datagram did not produce a record (or a live sample).
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("datagram of {len} bytes is shorter than the {HEADER_SIZE}-byte header")]
    TooShort { len: usize },
    #[error("packet format {found} does not match expected {expected}")]
    FormatMismatch { found: u16, expected: u16 },
    #[error("unrecognised packet id {0}")]
    Unrecognized(u8),
    #[error("{packet} packet of {len} bytes is shorter than its {need}-byte layout")]
    Truncated {
        packet: &'static str,
        len: usize,
        need: usize,
    },
    #[error("controlled car index {index} outside 0..{NUM_CARS}")]
    CarIndexOutOfRange { index: u8 },
    #[error("read past end of datagram: {0}")]
    Read(#[from] std::io::Error),
}

impl DecodeError {
    /// Unknown packet ids are skipped quietly; everything else is a bad datagram.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, DecodeError::Unrecognized(_))
    }
}

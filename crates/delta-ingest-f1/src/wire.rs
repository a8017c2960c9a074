//! Little-endian field readers shared by the packet decoders.

use byteorder::ReadBytesExt;
use std::io::{self, Cursor, Read};

use crate::HEADER_SIZE;

pub(crate) type LE = byteorder::LittleEndian;
pub(crate) type Reader<'a> = Cursor<&'a [u8]>;

/// A reader positioned at the first byte after the header.
pub(crate) fn body(raw: &[u8]) -> Reader<'_> {
    let mut c = Cursor::new(raw);
    c.set_position(HEADER_SIZE as u64);
    c
}

pub(crate) fn read_array<'a, T, const N: usize>(
    c: &mut Reader<'a>,
    mut read: impl FnMut(&mut Reader<'a>) -> io::Result<T>,
) -> io::Result<[T; N]> {
    let mut items = Vec::with_capacity(N);
    for _ in 0..N {
        items.push(read(c)?);
    }
    items
        .try_into()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "array length mismatch"))
}

pub(crate) fn read_bytes<const N: usize>(c: &mut Reader<'_>) -> io::Result<[u8; N]> {
    let mut b = [0u8; N];
    c.read_exact(&mut b)?;
    Ok(b)
}

pub(crate) fn f32x4(c: &mut Reader<'_>) -> io::Result<[f32; 4]> {
    read_array(c, |c| c.read_f32::<LE>())
}

pub(crate) fn u8x4(c: &mut Reader<'_>) -> io::Result<[u8; 4]> {
    read_bytes::<4>(c)
}

/// NUL-terminated UTF-8 name field.
pub(crate) fn c_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

use byteorder::ReadBytesExt;
use std::io;

use crate::wire::{self, Reader, LE};
use crate::{DecodeError, PacketHeader, HEADER_SIZE};

/// 13 dry sets plus 7 wet sets.
pub const NUM_TYRE_SETS: usize = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TyreSetData {
    pub actual_tyre_compound: u8,
    pub visual_tyre_compound: u8,
    /// Percent
    pub wear: u8,
    pub available: u8,
    pub recommended_session: u8,
    pub life_span: u8,
    pub usable_life: u8,
    /// Milliseconds relative to the fitted set.
    pub lap_delta_time: i16,
    pub fitted: u8,
}

impl TyreSetData {
    pub const SIZE: usize = 10;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self {
            actual_tyre_compound: c.read_u8()?,
            visual_tyre_compound: c.read_u8()?,
            wear: c.read_u8()?,
            available: c.read_u8()?,
            recommended_session: c.read_u8()?,
            life_span: c.read_u8()?,
            usable_life: c.read_u8()?,
            lap_delta_time: c.read_i16::<LE>()?,
            fitted: c.read_u8()?,
        })
    }
}

/// Packet 12: the tyre sets available to one car.
#[derive(Clone, Debug, PartialEq)]
pub struct TyreSetsPacket {
    pub header: PacketHeader,
    pub car_idx: u8,
    pub sets: [TyreSetData; NUM_TYRE_SETS],
    pub fitted_idx: u8,
}

impl TyreSetsPacket {
    pub const SIZE: usize = HEADER_SIZE + 1 + NUM_TYRE_SETS * TyreSetData::SIZE + 1;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        Ok(Self {
            header,
            car_idx: c.read_u8()?,
            sets: wire::read_array(&mut c, TyreSetData::read)?,
            fitted_idx: c.read_u8()?,
        })
    }

    pub fn fitted(&self) -> Option<&TyreSetData> {
        self.sets.get(self.fitted_idx as usize)
    }
}

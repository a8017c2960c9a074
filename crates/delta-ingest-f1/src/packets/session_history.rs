use byteorder::ReadBytesExt;
use std::io;

use crate::wire::{self, Reader, LE};
use crate::{DecodeError, PacketHeader, HEADER_SIZE};

pub const MAX_LAPS_IN_HISTORY: usize = 100;
pub const MAX_TYRE_STINTS: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LapHistoryData {
    pub lap_time_in_ms: u32,
    pub sector1_time_in_ms: u16,
    pub sector1_time_minutes: u8,
    pub sector2_time_in_ms: u16,
    pub sector2_time_minutes: u8,
    pub sector3_time_in_ms: u16,
    pub sector3_time_minutes: u8,
    /// 0x01 lap valid, 0x02 S1, 0x04 S2, 0x08 S3.
    pub lap_valid_bit_flags: u8,
}

impl LapHistoryData {
    pub const SIZE: usize = 14;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self {
            lap_time_in_ms: c.read_u32::<LE>()?,
            sector1_time_in_ms: c.read_u16::<LE>()?,
            sector1_time_minutes: c.read_u8()?,
            sector2_time_in_ms: c.read_u16::<LE>()?,
            sector2_time_minutes: c.read_u8()?,
            sector3_time_in_ms: c.read_u16::<LE>()?,
            sector3_time_minutes: c.read_u8()?,
            lap_valid_bit_flags: c.read_u8()?,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.lap_valid_bit_flags & 0x01 != 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TyreStintHistoryData {
    /// 255 if the stint is current.
    pub end_lap: u8,
    pub tyre_actual_compound: u8,
    pub tyre_visual_compound: u8,
}

impl TyreStintHistoryData {
    pub const SIZE: usize = 3;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self {
            end_lap: c.read_u8()?,
            tyre_actual_compound: c.read_u8()?,
            tyre_visual_compound: c.read_u8()?,
        })
    }
}

/// Packet 11: lap and stint history for one car, cycled through the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionHistoryPacket {
    pub header: PacketHeader,
    pub car_idx: u8,
    pub num_laps: u8,
    pub num_tyre_stints: u8,
    pub best_lap_time_lap_num: u8,
    pub best_sector1_lap_num: u8,
    pub best_sector2_lap_num: u8,
    pub best_sector3_lap_num: u8,
    pub lap_history: [LapHistoryData; MAX_LAPS_IN_HISTORY],
    pub tyre_stints: [TyreStintHistoryData; MAX_TYRE_STINTS],
}

impl SessionHistoryPacket {
    pub const SIZE: usize = HEADER_SIZE
        + 7
        + MAX_LAPS_IN_HISTORY * LapHistoryData::SIZE
        + MAX_TYRE_STINTS * TyreStintHistoryData::SIZE;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        Ok(Self {
            header,
            car_idx: c.read_u8()?,
            num_laps: c.read_u8()?,
            num_tyre_stints: c.read_u8()?,
            best_lap_time_lap_num: c.read_u8()?,
            best_sector1_lap_num: c.read_u8()?,
            best_sector2_lap_num: c.read_u8()?,
            best_sector3_lap_num: c.read_u8()?,
            lap_history: wire::read_array(&mut c, LapHistoryData::read)?,
            tyre_stints: wire::read_array(&mut c, TyreStintHistoryData::read)?,
        })
    }

    pub fn laps(&self) -> &[LapHistoryData] {
        super::active(&self.lap_history, self.num_laps)
    }

    pub fn stints(&self) -> &[TyreStintHistoryData] {
        super::active(&self.tyre_stints, self.num_tyre_stints)
    }
}

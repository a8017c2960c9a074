use byteorder::ReadBytesExt;
use std::io;

use crate::wire::{self, Reader, LE};
use crate::{DecodeError, PacketHeader, HEADER_SIZE, NUM_CARS};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FinalClassificationData {
    pub position: u8,
    pub num_laps: u8,
    pub grid_position: u8,
    pub points: u8,
    pub num_pit_stops: u8,
    pub result_status: u8,
    pub best_lap_time_in_ms: u32,
    /// Seconds, without penalties.
    pub total_race_time: f64,
    pub penalties_time: u8,
    pub num_penalties: u8,
    pub num_tyre_stints: u8,
    pub tyre_stints_actual: [u8; 8],
    pub tyre_stints_visual: [u8; 8],
    pub tyre_stints_end_laps: [u8; 8],
}

impl FinalClassificationData {
    pub const SIZE: usize = 45;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self {
            position: c.read_u8()?,
            num_laps: c.read_u8()?,
            grid_position: c.read_u8()?,
            points: c.read_u8()?,
            num_pit_stops: c.read_u8()?,
            result_status: c.read_u8()?,
            best_lap_time_in_ms: c.read_u32::<LE>()?,
            total_race_time: c.read_f64::<LE>()?,
            penalties_time: c.read_u8()?,
            num_penalties: c.read_u8()?,
            num_tyre_stints: c.read_u8()?,
            tyre_stints_actual: wire::read_bytes::<8>(c)?,
            tyre_stints_visual: wire::read_bytes::<8>(c)?,
            tyre_stints_end_laps: wire::read_bytes::<8>(c)?,
        })
    }

    pub fn stints_actual(&self) -> &[u8] {
        super::active(&self.tyre_stints_actual, self.num_tyre_stints)
    }
}

/// Packet 8: sent once at the end of a race.
#[derive(Clone, Debug, PartialEq)]
pub struct FinalClassificationPacket {
    pub header: PacketHeader,
    pub num_cars: u8,
    pub cars: [FinalClassificationData; NUM_CARS],
}

impl FinalClassificationPacket {
    pub const SIZE: usize = HEADER_SIZE + 1 + NUM_CARS * FinalClassificationData::SIZE;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        Ok(Self {
            header,
            num_cars: c.read_u8()?,
            cars: wire::read_array(&mut c, FinalClassificationData::read)?,
        })
    }

    pub fn active(&self) -> &[FinalClassificationData] {
        super::active(&self.cars, self.num_cars)
    }
}

use byteorder::ReadBytesExt;
use std::io;

use crate::wire::{self, Reader, LE};
use crate::{DecodeError, PacketHeader, HEADER_SIZE, NUM_CARS};

/// Per-car telemetry. Wheel arrays are RL, RR, FL, FR.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CarTelemetryData {
    /// km/h
    pub speed: u16,
    /// 0.0..=1.0
    pub throttle: f32,
    /// -1.0 full left ..= 1.0 full right
    pub steer: f32,
    /// 0.0..=1.0
    pub brake: f32,
    /// 0..=100
    pub clutch: u8,
    /// -1 reverse, 0 neutral, 1..=8
    pub gear: i8,
    pub engine_rpm: u16,
    pub drs: u8,
    pub rev_lights_percent: u8,
    pub rev_lights_bit_value: u16,
    pub brakes_temperature: [u16; 4],
    pub tyres_surface_temperature: [u8; 4],
    pub tyres_inner_temperature: [u8; 4],
    pub engine_temperature: u16,
    pub tyres_pressure: [f32; 4],
    pub surface_type: [u8; 4],
}

impl CarTelemetryData {
    pub const SIZE: usize = 60;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self {
            speed: c.read_u16::<LE>()?,
            throttle: c.read_f32::<LE>()?,
            steer: c.read_f32::<LE>()?,
            brake: c.read_f32::<LE>()?,
            clutch: c.read_u8()?,
            gear: c.read_i8()?,
            engine_rpm: c.read_u16::<LE>()?,
            drs: c.read_u8()?,
            rev_lights_percent: c.read_u8()?,
            rev_lights_bit_value: c.read_u16::<LE>()?,
            brakes_temperature: wire::read_array(c, |c| c.read_u16::<LE>())?,
            tyres_surface_temperature: wire::u8x4(c)?,
            tyres_inner_temperature: wire::u8x4(c)?,
            engine_temperature: c.read_u16::<LE>()?,
            tyres_pressure: wire::f32x4(c)?,
            surface_type: wire::u8x4(c)?,
        })
    }
}

/// Packet 6: telemetry for every car, followed by MFD state and the
/// suggested gear for the player.
#[derive(Clone, Debug, PartialEq)]
pub struct CarTelemetryPacket {
    pub header: PacketHeader,
    pub cars: [CarTelemetryData; NUM_CARS],
    /// 255 when the MFD is closed.
    pub mfd_panel_index: u8,
    pub mfd_panel_index_secondary_player: u8,
    /// 0 when there is no suggestion.
    pub suggested_gear: i8,
}

impl CarTelemetryPacket {
    pub const SIZE: usize = HEADER_SIZE + NUM_CARS * CarTelemetryData::SIZE + 3;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        Ok(Self {
            header,
            cars: wire::read_array(&mut c, CarTelemetryData::read)?,
            mfd_panel_index: c.read_u8()?,
            mfd_panel_index_secondary_player: c.read_u8()?,
            suggested_gear: c.read_i8()?,
        })
    }

    pub fn player(&self) -> Result<&CarTelemetryData, DecodeError> {
        Ok(&self.cars[self.header.player_car()?])
    }
}

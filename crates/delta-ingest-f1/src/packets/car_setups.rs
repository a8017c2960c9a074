use byteorder::ReadBytesExt;
use std::io;

use crate::wire::{self, Reader, LE};
use crate::{DecodeError, PacketHeader, HEADER_SIZE, NUM_CARS};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CarSetupData {
    pub front_wing: u8,
    pub rear_wing: u8,
    pub on_throttle: u8,
    pub off_throttle: u8,
    pub front_camber: f32,
    pub rear_camber: f32,
    pub front_toe: f32,
    pub rear_toe: f32,
    pub front_suspension: u8,
    pub rear_suspension: u8,
    pub front_anti_roll_bar: u8,
    pub rear_anti_roll_bar: u8,
    pub front_suspension_height: u8,
    pub rear_suspension_height: u8,
    pub brake_pressure: u8,
    pub brake_bias: u8,
    /// PSI, in RL, RR, FL, FR order.
    pub tyre_pressures: [f32; 4],
    pub ballast: u8,
    pub fuel_load: f32,
}

impl CarSetupData {
    pub const SIZE: usize = 49;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self {
            front_wing: c.read_u8()?,
            rear_wing: c.read_u8()?,
            on_throttle: c.read_u8()?,
            off_throttle: c.read_u8()?,
            front_camber: c.read_f32::<LE>()?,
            rear_camber: c.read_f32::<LE>()?,
            front_toe: c.read_f32::<LE>()?,
            rear_toe: c.read_f32::<LE>()?,
            front_suspension: c.read_u8()?,
            rear_suspension: c.read_u8()?,
            front_anti_roll_bar: c.read_u8()?,
            rear_anti_roll_bar: c.read_u8()?,
            front_suspension_height: c.read_u8()?,
            rear_suspension_height: c.read_u8()?,
            brake_pressure: c.read_u8()?,
            brake_bias: c.read_u8()?,
            tyre_pressures: wire::f32x4(c)?,
            ballast: c.read_u8()?,
            fuel_load: c.read_f32::<LE>()?,
        })
    }
}

/// Packet 5: car setups. Other players' setups are zeroed in multiplayer.
#[derive(Clone, Debug, PartialEq)]
pub struct CarSetupsPacket {
    pub header: PacketHeader,
    pub cars: [CarSetupData; NUM_CARS],
}

impl CarSetupsPacket {
    pub const SIZE: usize = HEADER_SIZE + NUM_CARS * CarSetupData::SIZE;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        let cars = wire::read_array(&mut c, CarSetupData::read)?;
        Ok(Self { header, cars })
    }
}

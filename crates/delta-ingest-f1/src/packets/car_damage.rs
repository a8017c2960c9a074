use byteorder::ReadBytesExt;
use std::io;

use crate::wire::{self, Reader};
use crate::{DecodeError, PacketHeader, HEADER_SIZE, NUM_CARS};

/// Damage and wear, all in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CarDamageData {
    pub tyres_wear: [f32; 4],
    pub tyres_damage: [u8; 4],
    pub brakes_damage: [u8; 4],
    pub front_left_wing_damage: u8,
    pub front_right_wing_damage: u8,
    pub rear_wing_damage: u8,
    pub floor_damage: u8,
    pub diffuser_damage: u8,
    pub sidepod_damage: u8,
    pub drs_fault: u8,
    pub ers_fault: u8,
    pub gear_box_damage: u8,
    pub engine_damage: u8,
    pub engine_mguh_wear: u8,
    pub engine_es_wear: u8,
    pub engine_ce_wear: u8,
    pub engine_ice_wear: u8,
    pub engine_mguk_wear: u8,
    pub engine_tc_wear: u8,
    pub engine_blown: u8,
    pub engine_seized: u8,
}

impl CarDamageData {
    pub const SIZE: usize = 42;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self {
            tyres_wear: wire::f32x4(c)?,
            tyres_damage: wire::u8x4(c)?,
            brakes_damage: wire::u8x4(c)?,
            front_left_wing_damage: c.read_u8()?,
            front_right_wing_damage: c.read_u8()?,
            rear_wing_damage: c.read_u8()?,
            floor_damage: c.read_u8()?,
            diffuser_damage: c.read_u8()?,
            sidepod_damage: c.read_u8()?,
            drs_fault: c.read_u8()?,
            ers_fault: c.read_u8()?,
            gear_box_damage: c.read_u8()?,
            engine_damage: c.read_u8()?,
            engine_mguh_wear: c.read_u8()?,
            engine_es_wear: c.read_u8()?,
            engine_ce_wear: c.read_u8()?,
            engine_ice_wear: c.read_u8()?,
            engine_mguk_wear: c.read_u8()?,
            engine_tc_wear: c.read_u8()?,
            engine_blown: c.read_u8()?,
            engine_seized: c.read_u8()?,
        })
    }
}

/// Packet 10: damage for every car.
#[derive(Clone, Debug, PartialEq)]
pub struct CarDamagePacket {
    pub header: PacketHeader,
    pub cars: [CarDamageData; NUM_CARS],
}

impl CarDamagePacket {
    pub const SIZE: usize = HEADER_SIZE + NUM_CARS * CarDamageData::SIZE;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        let cars = wire::read_array(&mut c, CarDamageData::read)?;
        Ok(Self { header, cars })
    }
}

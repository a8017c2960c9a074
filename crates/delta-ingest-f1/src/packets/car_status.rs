use byteorder::ReadBytesExt;
use std::io;

use crate::wire::{self, Reader, LE};
use crate::{DecodeError, PacketHeader, HEADER_SIZE, NUM_CARS};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CarStatusData {
    pub traction_control: u8,
    pub anti_lock_brakes: u8,
    pub fuel_mix: u8,
    pub front_brake_bias: u8,
    pub pit_limiter_status: u8,
    pub fuel_in_tank: f32,
    pub fuel_capacity: f32,
    pub fuel_remaining_laps: f32,
    pub max_rpm: u16,
    pub idle_rpm: u16,
    pub max_gears: u8,
    pub drs_allowed: u8,
    /// Metres until DRS can be used; 0 when not available.
    pub drs_activation_distance: u16,
    pub actual_tyre_compound: u8,
    pub visual_tyre_compound: u8,
    pub tyres_age_laps: u8,
    pub vehicle_fia_flags: i8,
    pub engine_power_ice: f32,
    pub engine_power_mguk: f32,
    /// Joules
    pub ers_store_energy: f32,
    pub ers_deploy_mode: u8,
    pub ers_harvested_this_lap_mguk: f32,
    pub ers_harvested_this_lap_mguh: f32,
    pub ers_deployed_this_lap: f32,
    pub network_paused: u8,
}

impl CarStatusData {
    pub const SIZE: usize = 55;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self {
            traction_control: c.read_u8()?,
            anti_lock_brakes: c.read_u8()?,
            fuel_mix: c.read_u8()?,
            front_brake_bias: c.read_u8()?,
            pit_limiter_status: c.read_u8()?,
            fuel_in_tank: c.read_f32::<LE>()?,
            fuel_capacity: c.read_f32::<LE>()?,
            fuel_remaining_laps: c.read_f32::<LE>()?,
            max_rpm: c.read_u16::<LE>()?,
            idle_rpm: c.read_u16::<LE>()?,
            max_gears: c.read_u8()?,
            drs_allowed: c.read_u8()?,
            drs_activation_distance: c.read_u16::<LE>()?,
            actual_tyre_compound: c.read_u8()?,
            visual_tyre_compound: c.read_u8()?,
            tyres_age_laps: c.read_u8()?,
            vehicle_fia_flags: c.read_i8()?,
            engine_power_ice: c.read_f32::<LE>()?,
            engine_power_mguk: c.read_f32::<LE>()?,
            ers_store_energy: c.read_f32::<LE>()?,
            ers_deploy_mode: c.read_u8()?,
            ers_harvested_this_lap_mguk: c.read_f32::<LE>()?,
            ers_harvested_this_lap_mguh: c.read_f32::<LE>()?,
            ers_deployed_this_lap: c.read_f32::<LE>()?,
            network_paused: c.read_u8()?,
        })
    }
}

/// Packet 7: car status for every car.
#[derive(Clone, Debug, PartialEq)]
pub struct CarStatusPacket {
    pub header: PacketHeader,
    pub cars: [CarStatusData; NUM_CARS],
}

impl CarStatusPacket {
    pub const SIZE: usize = HEADER_SIZE + NUM_CARS * CarStatusData::SIZE;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        let cars = wire::read_array(&mut c, CarStatusData::read)?;
        Ok(Self { header, cars })
    }
}

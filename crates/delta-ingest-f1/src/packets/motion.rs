use byteorder::ReadBytesExt;
use std::io;

use crate::wire::{self, Reader, LE};
use crate::{DecodeError, PacketHeader, HEADER_SIZE, NUM_CARS};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CarMotionData {
    /// World space position in metres.
    pub world_position_x: f32,
    pub world_position_y: f32,
    pub world_position_z: f32,
    /// World space velocity in metres per second.
    pub world_velocity_x: f32,
    pub world_velocity_y: f32,
    pub world_velocity_z: f32,
    /// Normalised direction vectors, scaled to the full i16 range.
    pub world_forward_dir_x: i16,
    pub world_forward_dir_y: i16,
    pub world_forward_dir_z: i16,
    pub world_right_dir_x: i16,
    pub world_right_dir_y: i16,
    pub world_right_dir_z: i16,
    pub g_force_lateral: f32,
    pub g_force_longitudinal: f32,
    pub g_force_vertical: f32,
    /// Orientation in radians.
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl CarMotionData {
    pub const SIZE: usize = 60;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self {
            world_position_x: c.read_f32::<LE>()?,
            world_position_y: c.read_f32::<LE>()?,
            world_position_z: c.read_f32::<LE>()?,
            world_velocity_x: c.read_f32::<LE>()?,
            world_velocity_y: c.read_f32::<LE>()?,
            world_velocity_z: c.read_f32::<LE>()?,
            world_forward_dir_x: c.read_i16::<LE>()?,
            world_forward_dir_y: c.read_i16::<LE>()?,
            world_forward_dir_z: c.read_i16::<LE>()?,
            world_right_dir_x: c.read_i16::<LE>()?,
            world_right_dir_y: c.read_i16::<LE>()?,
            world_right_dir_z: c.read_i16::<LE>()?,
            g_force_lateral: c.read_f32::<LE>()?,
            g_force_longitudinal: c.read_f32::<LE>()?,
            g_force_vertical: c.read_f32::<LE>()?,
            yaw: c.read_f32::<LE>()?,
            pitch: c.read_f32::<LE>()?,
            roll: c.read_f32::<LE>()?,
        })
    }
}

/// Packet 0: motion for every car.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionPacket {
    pub header: PacketHeader,
    pub cars: [CarMotionData; NUM_CARS],
}

impl MotionPacket {
    pub const SIZE: usize = HEADER_SIZE + NUM_CARS * CarMotionData::SIZE;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        let cars = wire::read_array(&mut c, CarMotionData::read)?;
        Ok(Self { header, cars })
    }

    pub fn player(&self) -> Result<&CarMotionData, DecodeError> {
        Ok(&self.cars[self.header.player_car()?])
    }
}

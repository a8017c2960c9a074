use byteorder::ReadBytesExt;

use crate::wire::{self, f32x4, LE};
use crate::{DecodeError, PacketHeader, HEADER_SIZE};

/// Packet 13: extra motion data for the player car only.
///
/// Wheel arrays are ordered RL, RR, FL, FR.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionExPacket {
    pub header: PacketHeader,
    pub suspension_position: [f32; 4],
    pub suspension_velocity: [f32; 4],
    pub suspension_acceleration: [f32; 4],
    pub wheel_speed: [f32; 4],
    pub wheel_slip_ratio: [f32; 4],
    pub wheel_slip_angle: [f32; 4],
    pub wheel_lat_force: [f32; 4],
    pub wheel_long_force: [f32; 4],
    pub height_of_cog_above_ground: f32,
    /// Velocity in local space, metres per second.
    pub local_velocity: [f32; 3],
    /// Radians per second.
    pub angular_velocity: [f32; 3],
    /// Radians per second squared.
    pub angular_acceleration: [f32; 3],
    /// Current front wheels angle in radians.
    pub front_wheels_angle: f32,
    pub wheel_vert_force: [f32; 4],
}

impl MotionExPacket {
    pub const SIZE: usize = HEADER_SIZE + 47 * 4;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        Ok(Self {
            header,
            suspension_position: f32x4(&mut c)?,
            suspension_velocity: f32x4(&mut c)?,
            suspension_acceleration: f32x4(&mut c)?,
            wheel_speed: f32x4(&mut c)?,
            wheel_slip_ratio: f32x4(&mut c)?,
            wheel_slip_angle: f32x4(&mut c)?,
            wheel_lat_force: f32x4(&mut c)?,
            wheel_long_force: f32x4(&mut c)?,
            height_of_cog_above_ground: c.read_f32::<LE>()?,
            local_velocity: wire::read_array(&mut c, |c| c.read_f32::<LE>())?,
            angular_velocity: wire::read_array(&mut c, |c| c.read_f32::<LE>())?,
            angular_acceleration: wire::read_array(&mut c, |c| c.read_f32::<LE>())?,
            front_wheels_angle: c.read_f32::<LE>()?,
            wheel_vert_force: f32x4(&mut c)?,
        })
    }
}

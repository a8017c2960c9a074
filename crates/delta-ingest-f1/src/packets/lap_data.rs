use byteorder::ReadBytesExt;
use std::io;

use crate::wire::{self, Reader, LE};
use crate::{DecodeError, PacketHeader, HEADER_SIZE, NUM_CARS};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LapData {
    pub last_lap_time_in_ms: u32,
    pub current_lap_time_in_ms: u32,
    pub sector1_time_in_ms: u16,
    pub sector1_time_minutes: u8,
    pub sector2_time_in_ms: u16,
    pub sector2_time_minutes: u8,
    pub delta_to_car_in_front_in_ms: u16,
    pub delta_to_race_leader_in_ms: u16,
    /// Metres around the current lap; negative before the line is crossed.
    pub lap_distance: f32,
    pub total_distance: f32,
    pub safety_car_delta: f32,
    pub car_position: u8,
    pub current_lap_num: u8,
    pub pit_status: u8,
    pub num_pit_stops: u8,
    pub sector: u8,
    pub current_lap_invalid: u8,
    pub penalties: u8,
    pub total_warnings: u8,
    pub corner_cutting_warnings: u8,
    pub num_unserved_drive_through_pens: u8,
    pub num_unserved_stop_go_pens: u8,
    pub grid_position: u8,
    pub driver_status: u8,
    pub result_status: u8,
    pub pit_lane_timer_active: u8,
    pub pit_lane_time_in_lane_in_ms: u16,
    pub pit_stop_timer_in_ms: u16,
    pub pit_stop_should_serve_pen: u8,
}

impl LapData {
    pub const SIZE: usize = 50;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self {
            last_lap_time_in_ms: c.read_u32::<LE>()?,
            current_lap_time_in_ms: c.read_u32::<LE>()?,
            sector1_time_in_ms: c.read_u16::<LE>()?,
            sector1_time_minutes: c.read_u8()?,
            sector2_time_in_ms: c.read_u16::<LE>()?,
            sector2_time_minutes: c.read_u8()?,
            delta_to_car_in_front_in_ms: c.read_u16::<LE>()?,
            delta_to_race_leader_in_ms: c.read_u16::<LE>()?,
            lap_distance: c.read_f32::<LE>()?,
            total_distance: c.read_f32::<LE>()?,
            safety_car_delta: c.read_f32::<LE>()?,
            car_position: c.read_u8()?,
            current_lap_num: c.read_u8()?,
            pit_status: c.read_u8()?,
            num_pit_stops: c.read_u8()?,
            sector: c.read_u8()?,
            current_lap_invalid: c.read_u8()?,
            penalties: c.read_u8()?,
            total_warnings: c.read_u8()?,
            corner_cutting_warnings: c.read_u8()?,
            num_unserved_drive_through_pens: c.read_u8()?,
            num_unserved_stop_go_pens: c.read_u8()?,
            grid_position: c.read_u8()?,
            driver_status: c.read_u8()?,
            result_status: c.read_u8()?,
            pit_lane_timer_active: c.read_u8()?,
            pit_lane_time_in_lane_in_ms: c.read_u16::<LE>()?,
            pit_stop_timer_in_ms: c.read_u16::<LE>()?,
            pit_stop_should_serve_pen: c.read_u8()?,
        })
    }
}

/// Packet 2: lap timing for every car.
#[derive(Clone, Debug, PartialEq)]
pub struct LapDataPacket {
    pub header: PacketHeader,
    pub cars: [LapData; NUM_CARS],
    pub time_trial_pb_car_idx: u8,    // 255 if invalid
    pub time_trial_rival_car_idx: u8, // 255 if invalid
}

impl LapDataPacket {
    pub const SIZE: usize = HEADER_SIZE + NUM_CARS * LapData::SIZE + 2;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        Ok(Self {
            header,
            cars: wire::read_array(&mut c, LapData::read)?,
            time_trial_pb_car_idx: c.read_u8()?,
            time_trial_rival_car_idx: c.read_u8()?,
        })
    }
}

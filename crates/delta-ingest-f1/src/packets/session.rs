use byteorder::ReadBytesExt;
use std::io;

use crate::wire::{self, Reader, LE};
use crate::{DecodeError, PacketHeader, HEADER_SIZE};
use delta_ingest_core::{SessionInfo, TrackId};

pub const MAX_MARSHAL_ZONES: usize = 21;
pub const MAX_WEATHER_FORECAST_SAMPLES: usize = 56;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarshalZone {
    pub zone_start: f32, // fraction 0..1 of the lap
    pub zone_flag: i8,   // -1 unknown, 0 none, 1 green, 2 blue, 3 yellow
}

impl MarshalZone {
    pub const SIZE: usize = 5;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self { zone_start: c.read_f32::<LE>()?, zone_flag: c.read_i8()? })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeatherForecastSample {
    pub session_type: u8,
    pub time_offset: u8, // minutes
    pub weather: u8,
    pub track_temperature: i8,
    pub track_temperature_change: i8,
    pub air_temperature: i8,
    pub air_temperature_change: i8,
    pub rain_percentage: u8,
}

impl WeatherForecastSample {
    pub const SIZE: usize = 8;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self {
            session_type: c.read_u8()?,
            time_offset: c.read_u8()?,
            weather: c.read_u8()?,
            track_temperature: c.read_i8()?,
            track_temperature_change: c.read_i8()?,
            air_temperature: c.read_i8()?,
            air_temperature_change: c.read_i8()?,
            rain_percentage: c.read_u8()?,
        })
    }
}

/// Packet 1: session-wide state. This is where the track id comes from.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionPacket {
    pub header: PacketHeader,
    pub weather: u8,
    pub track_temperature: i8,
    pub air_temperature: i8,
    pub total_laps: u8,
    pub track_length: u16, // metres
    pub session_type: u8,
    pub track_id: i8, // -1 unknown
    pub formula: u8,
    pub session_time_left: u16,
    pub session_duration: u16,
    pub pit_speed_limit: u8,
    pub game_paused: u8,
    pub is_spectating: u8,
    pub spectator_car_index: u8,
    pub sli_pro_native_support: u8,
    pub num_marshal_zones: u8,
    pub marshal_zones: [MarshalZone; MAX_MARSHAL_ZONES],
    pub safety_car_status: u8,
    pub network_game: u8,
    pub num_weather_forecast_samples: u8,
    pub weather_forecast_samples: [WeatherForecastSample; MAX_WEATHER_FORECAST_SAMPLES],
    pub forecast_accuracy: u8,
    pub ai_difficulty: u8,
    pub season_link_identifier: u32,
    pub weekend_link_identifier: u32,
    pub session_link_identifier: u32,
    pub pit_stop_window_ideal_lap: u8,
    pub pit_stop_window_latest_lap: u8,
    pub pit_stop_rejoin_position: u8,
    pub steering_assist: u8,
    pub braking_assist: u8,
    pub gearbox_assist: u8,
    pub pit_assist: u8,
    pub pit_release_assist: u8,
    pub ers_assist: u8,
    pub drs_assist: u8,
    pub dynamic_racing_line: u8,
    pub dynamic_racing_line_type: u8,
    pub game_mode: u8,
    pub rule_set: u8,
    pub time_of_day: u32, // minutes since midnight
    pub session_length: u8,
    pub speed_units_lead_player: u8,
    pub temperature_units_lead_player: u8,
    pub speed_units_secondary_player: u8,
    pub temperature_units_secondary_player: u8,
    pub num_safety_car_periods: u8,
    pub num_virtual_safety_car_periods: u8,
    pub num_red_flag_periods: u8,
}

impl SessionPacket {
    pub const SIZE: usize = HEADER_SIZE + 615;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        Ok(Self {
            header,
            weather: c.read_u8()?,
            track_temperature: c.read_i8()?,
            air_temperature: c.read_i8()?,
            total_laps: c.read_u8()?,
            track_length: c.read_u16::<LE>()?,
            session_type: c.read_u8()?,
            track_id: c.read_i8()?,
            formula: c.read_u8()?,
            session_time_left: c.read_u16::<LE>()?,
            session_duration: c.read_u16::<LE>()?,
            pit_speed_limit: c.read_u8()?,
            game_paused: c.read_u8()?,
            is_spectating: c.read_u8()?,
            spectator_car_index: c.read_u8()?,
            sli_pro_native_support: c.read_u8()?,
            num_marshal_zones: c.read_u8()?,
            marshal_zones: wire::read_array(&mut c, MarshalZone::read)?,
            safety_car_status: c.read_u8()?,
            network_game: c.read_u8()?,
            num_weather_forecast_samples: c.read_u8()?,
            weather_forecast_samples: wire::read_array(&mut c, WeatherForecastSample::read)?,
            forecast_accuracy: c.read_u8()?,
            ai_difficulty: c.read_u8()?,
            season_link_identifier: c.read_u32::<LE>()?,
            weekend_link_identifier: c.read_u32::<LE>()?,
            session_link_identifier: c.read_u32::<LE>()?,
            pit_stop_window_ideal_lap: c.read_u8()?,
            pit_stop_window_latest_lap: c.read_u8()?,
            pit_stop_rejoin_position: c.read_u8()?,
            steering_assist: c.read_u8()?,
            braking_assist: c.read_u8()?,
            gearbox_assist: c.read_u8()?,
            pit_assist: c.read_u8()?,
            pit_release_assist: c.read_u8()?,
            ers_assist: c.read_u8()?,
            drs_assist: c.read_u8()?,
            dynamic_racing_line: c.read_u8()?,
            dynamic_racing_line_type: c.read_u8()?,
            game_mode: c.read_u8()?,
            rule_set: c.read_u8()?,
            time_of_day: c.read_u32::<LE>()?,
            session_length: c.read_u8()?,
            speed_units_lead_player: c.read_u8()?,
            temperature_units_lead_player: c.read_u8()?,
            speed_units_secondary_player: c.read_u8()?,
            temperature_units_secondary_player: c.read_u8()?,
            num_safety_car_periods: c.read_u8()?,
            num_virtual_safety_car_periods: c.read_u8()?,
            num_red_flag_periods: c.read_u8()?,
        })
    }

    pub fn marshal_zones(&self) -> &[MarshalZone] {
        super::active(&self.marshal_zones, self.num_marshal_zones)
    }

    pub fn weather_forecast(&self) -> &[WeatherForecastSample] {
        super::active(&self.weather_forecast_samples, self.num_weather_forecast_samples)
    }

    pub fn track(&self) -> Option<TrackId> {
        TrackId::from_raw(self.track_id)
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            session_uid: self.header.session_uid,
            track_id: self.track(),
            track_length_m: self.track_length,
            session_type: self.session_type,
        }
    }
}

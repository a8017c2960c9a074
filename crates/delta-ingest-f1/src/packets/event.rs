use byteorder::ReadBytesExt;

use crate::wire::{self, Reader, LE};
use crate::{DecodeError, PacketHeader, HEADER_SIZE};

/// Details attached to an event, selected by the 4-character code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventDetails {
    SessionStarted,
    SessionEnded,
    FastestLap { vehicle_idx: u8, lap_time: f32 },
    Retirement { vehicle_idx: u8 },
    DrsEnabled,
    DrsDisabled,
    TeamMateInPits { vehicle_idx: u8 },
    ChequeredFlag,
    RaceWinner { vehicle_idx: u8 },
    Penalty {
        penalty_type: u8,
        infringement_type: u8,
        vehicle_idx: u8,
        other_vehicle_idx: u8,
        time: u8,
        lap_num: u8,
        places_gained: u8,
    },
    SpeedTrap {
        vehicle_idx: u8,
        speed: f32, // km/h
        is_overall_fastest_in_session: u8,
        is_driver_fastest_in_session: u8,
        fastest_vehicle_idx_in_session: u8,
        fastest_speed_in_session: f32,
    },
    StartLights { num_lights: u8 },
    LightsOut,
    DriveThroughServed { vehicle_idx: u8 },
    StopGoServed { vehicle_idx: u8 },
    Flashback { frame_identifier: u32, session_time: f32 },
    Buttons { button_status: u32 },
    RedFlag,
    Overtake { overtaking_vehicle_idx: u8, being_overtaken_vehicle_idx: u8 },
    Unknown([u8; 4]),
}

impl EventDetails {
    fn read(code: &[u8; 4], c: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let details = match code {
            b"SSTA" => EventDetails::SessionStarted,
            b"SEND" => EventDetails::SessionEnded,
            b"FTLP" => EventDetails::FastestLap {
                vehicle_idx: c.read_u8()?,
                lap_time: c.read_f32::<LE>()?,
            },
            b"RTMT" => EventDetails::Retirement { vehicle_idx: c.read_u8()? },
            b"DRSE" => EventDetails::DrsEnabled,
            b"DRSD" => EventDetails::DrsDisabled,
            b"TMPT" => EventDetails::TeamMateInPits { vehicle_idx: c.read_u8()? },
            b"CHQF" => EventDetails::ChequeredFlag,
            b"RCWN" => EventDetails::RaceWinner { vehicle_idx: c.read_u8()? },
            b"PENA" => EventDetails::Penalty {
                penalty_type: c.read_u8()?,
                infringement_type: c.read_u8()?,
                vehicle_idx: c.read_u8()?,
                other_vehicle_idx: c.read_u8()?,
                time: c.read_u8()?,
                lap_num: c.read_u8()?,
                places_gained: c.read_u8()?,
            },
            b"SPTP" => EventDetails::SpeedTrap {
                vehicle_idx: c.read_u8()?,
                speed: c.read_f32::<LE>()?,
                is_overall_fastest_in_session: c.read_u8()?,
                is_driver_fastest_in_session: c.read_u8()?,
                fastest_vehicle_idx_in_session: c.read_u8()?,
                fastest_speed_in_session: c.read_f32::<LE>()?,
            },
            b"STLG" => EventDetails::StartLights { num_lights: c.read_u8()? },
            b"LGOT" => EventDetails::LightsOut,
            b"DTSV" => EventDetails::DriveThroughServed { vehicle_idx: c.read_u8()? },
            b"SGSV" => EventDetails::StopGoServed { vehicle_idx: c.read_u8()? },
            b"FLBK" => EventDetails::Flashback {
                frame_identifier: c.read_u32::<LE>()?,
                session_time: c.read_f32::<LE>()?,
            },
            b"BUTN" => EventDetails::Buttons { button_status: c.read_u32::<LE>()? },
            b"RDFL" => EventDetails::RedFlag,
            b"OVTK" => EventDetails::Overtake {
                overtaking_vehicle_idx: c.read_u8()?,
                being_overtaken_vehicle_idx: c.read_u8()?,
            },
            other => EventDetails::Unknown(*other),
        };
        Ok(details)
    }

    pub fn description(&self) -> &'static str {
        match self {
            EventDetails::SessionStarted => "Session Started",
            EventDetails::SessionEnded => "Session Ended",
            EventDetails::FastestLap { .. } => "Fastest Lap",
            EventDetails::Retirement { .. } => "Retirement",
            EventDetails::DrsEnabled => "DRS Enabled",
            EventDetails::DrsDisabled => "DRS Disabled",
            EventDetails::TeamMateInPits { .. } => "Team mate in pits",
            EventDetails::ChequeredFlag => "Chequered flag",
            EventDetails::RaceWinner { .. } => "Race Winner",
            EventDetails::Penalty { .. } => "Penalty Issued",
            EventDetails::SpeedTrap { .. } => "Speed Trap Triggered",
            EventDetails::StartLights { .. } => "Start lights",
            EventDetails::LightsOut => "Lights out",
            EventDetails::DriveThroughServed { .. } => "Drive through served",
            EventDetails::StopGoServed { .. } => "Stop go served",
            EventDetails::Flashback { .. } => "Flashback",
            EventDetails::Buttons { .. } => "Button status",
            EventDetails::RedFlag => "Red Flag",
            EventDetails::Overtake { .. } => "Overtake",
            EventDetails::Unknown(_) => "Unknown event",
        }
    }
}

/// Packet 3: a single notable event. The game always sends the full
/// 12-byte detail area, whichever variant the code selects.
#[derive(Clone, Debug, PartialEq)]
pub struct EventPacket {
    pub header: PacketHeader,
    pub code: [u8; 4],
    pub details: EventDetails,
}

impl EventPacket {
    pub const DETAILS_SIZE: usize = 12;
    pub const SIZE: usize = HEADER_SIZE + 4 + Self::DETAILS_SIZE;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        let code = wire::read_bytes::<4>(&mut c)?;
        let details = EventDetails::read(&code, &mut c)?;
        Ok(Self { header, code, details })
    }

    pub fn code_str(&self) -> &str {
        std::str::from_utf8(&self.code).unwrap_or("????")
    }
}

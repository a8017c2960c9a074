use byteorder::ReadBytesExt;
use serde::Serialize;
use std::io::Cursor;

use crate::wire::LE;
use crate::{DecodeError, HEADER_SIZE, NO_SECONDARY_PLAYER, NUM_CARS};

/// Packet type discriminator carried in byte 6 of every header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum PacketId {
    Motion = 0,
    Session = 1,
    LapData = 2,
    Event = 3,
    Participants = 4,
    CarSetups = 5,
    CarTelemetry = 6,
    CarStatus = 7,
    FinalClassification = 8,
    LobbyInfo = 9,
    CarDamage = 10,
    SessionHistory = 11,
    TyreSets = 12,
    MotionEx = 13,
}

impl PacketId {
    pub const ALL: [PacketId; 14] = [
        PacketId::Motion,
        PacketId::Session,
        PacketId::LapData,
        PacketId::Event,
        PacketId::Participants,
        PacketId::CarSetups,
        PacketId::CarTelemetry,
        PacketId::CarStatus,
        PacketId::FinalClassification,
        PacketId::LobbyInfo,
        PacketId::CarDamage,
        PacketId::SessionHistory,
        PacketId::TyreSets,
        PacketId::MotionEx,
    ];

    pub fn from_u8(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    /// Stable snake_case name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            PacketId::Motion => "motion",
            PacketId::Session => "session",
            PacketId::LapData => "lap_data",
            PacketId::Event => "event",
            PacketId::Participants => "participants",
            PacketId::CarSetups => "car_setups",
            PacketId::CarTelemetry => "car_telemetry",
            PacketId::CarStatus => "car_status",
            PacketId::FinalClassification => "final_classification",
            PacketId::LobbyInfo => "lobby_info",
            PacketId::CarDamage => "car_damage",
            PacketId::SessionHistory => "session_history",
            PacketId::TyreSets => "tyre_sets",
            PacketId::MotionEx => "motion_ex",
        }
    }
}

impl TryFrom<u8> for PacketId {
    type Error = DecodeError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::from_u8(raw).ok_or(DecodeError::Unrecognized(raw))
    }
}

/// The 29-byte header at the start of every datagram.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PacketHeader {
    pub packet_format: u16,     // 2023
    pub game_year: u8,          // last two digits, e.g. 23
    pub game_major_version: u8,
    pub game_minor_version: u8,
    pub packet_version: u8,
    pub packet_id: u8,
    pub session_uid: u64,
    pub session_time: f32,      // seconds
    pub frame_identifier: u32,
    /// Does not go back after flashbacks.
    pub overall_frame_identifier: u32,
    pub player_car_index: u8,
    /// 255 when there is no split-screen player.
    pub secondary_player_car_index: u8,
}

impl PacketHeader {
    /// Parse the header. The length is checked before any field is read.
    pub fn parse(raw: &[u8]) -> Result<Self, DecodeError> {
        if raw.len() < HEADER_SIZE {
            return Err(DecodeError::TooShort { len: raw.len() });
        }
        let mut c = Cursor::new(&raw[..HEADER_SIZE]);
        Ok(Self {
            packet_format: c.read_u16::<LE>()?,
            game_year: c.read_u8()?,
            game_major_version: c.read_u8()?,
            game_minor_version: c.read_u8()?,
            packet_version: c.read_u8()?,
            packet_id: c.read_u8()?,
            session_uid: c.read_u64::<LE>()?,
            session_time: c.read_f32::<LE>()?,
            frame_identifier: c.read_u32::<LE>()?,
            overall_frame_identifier: c.read_u32::<LE>()?,
            player_car_index: c.read_u8()?,
            secondary_player_car_index: c.read_u8()?,
        })
    }

    pub fn packet_kind(&self) -> Option<PacketId> {
        PacketId::from_u8(self.packet_id)
    }

    /// Controlled car index, checked against the per-car array bound.
    pub fn player_car(&self) -> Result<usize, DecodeError> {
        let idx = self.player_car_index as usize;
        if idx < NUM_CARS {
            Ok(idx)
        } else {
            Err(DecodeError::CarIndexOutOfRange { index: self.player_car_index })
        }
    }

    pub fn secondary_player_car(&self) -> Option<usize> {
        let idx = self.secondary_player_car_index;
        (idx != NO_SECONDARY_PLAYER && (idx as usize) < NUM_CARS).then_some(idx as usize)
    }

    /// Session time in whole milliseconds, used to stamp live samples.
    pub fn timestamp_ms(&self) -> u64 {
        (self.session_time.max(0.0) * 1000.0) as u64
    }
}

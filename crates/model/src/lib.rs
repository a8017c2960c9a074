use serde::{Deserialize, Serialize};
use std::fmt;

/// Driver inputs for the controlled car, one per car-telemetry packet.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct LiveInputSample {
    pub throttle: f32,   // 0..1
    pub brake: f32,      // 0..1
    pub steer: f32,      // -1..1
    pub clutch: u8,      // 0..100
    pub gear: i8,        // -1 = reverse, 0 = neutral
    pub engine_rpm: u16,
    pub drs: bool,
    pub rev_lights_percent: u8,
    pub speed_kph: f32,
    pub timestamp_ms: u64,
}

/// World-space position of the controlled car, one per motion packet.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct LivePositionSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub timestamp_ms: u64,
}

impl LivePositionSample {
    pub fn point(&self) -> TrackPoint {
        TrackPoint { x: self.x, y: self.y, z: self.z }
    }
}

/// One record of a reference trajectory.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct TrackPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl TrackPoint {
    /// Size of one persisted record: three little-endian f32.
    pub const RECORD_SIZE: usize = 12;

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Track identifier as reported by the session packet. Negative ids are
/// reserved by the game for "unknown" and never wrapped in this type.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub i8);

impl TrackId {
    pub fn from_raw(raw: i8) -> Option<Self> {
        (raw >= 0).then_some(Self(raw))
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TrackId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i8 = s.trim().parse().map_err(|e| format!("invalid track id {s:?}: {e}"))?;
        Self::from_raw(raw).ok_or_else(|| format!("track id must be non-negative, got {raw}"))
    }
}

/// Session-level state shared with every consumer of the live stream.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct SessionInfo {
    pub session_uid: u64,
    pub track_id: Option<TrackId>,
    pub track_length_m: u16,
    pub session_type: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_id_rejects_unknown() {
        assert_eq!(TrackId::from_raw(-1), None);
        assert_eq!(TrackId::from_raw(10), Some(TrackId(10)));
    }

    #[test]
    fn test_track_id_parse() {
        assert_eq!("7".parse::<TrackId>(), Ok(TrackId(7)));
        assert!("-1".parse::<TrackId>().is_err());
        assert!("monza".parse::<TrackId>().is_err());
    }

    #[test]
    fn test_samples_serialize() {
        let s = LivePositionSample { x: 1.0, y: 2.0, z: 3.0, timestamp_ms: 40 };
        let v = serde_json::to_value(s).unwrap();
        assert_eq!(v["timestamp_ms"], 40);
        assert_eq!(s.point(), TrackPoint::new(1.0, 2.0, 3.0));
    }
}

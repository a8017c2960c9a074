//! Datagram builders shared by the integration tests.

#![allow(dead_code)]

use delta_ingest_f1::{PacketId, HEADER_SIZE, PACKET_FORMAT_2023};

pub fn header(format: u16, id: PacketId, player: u8, session_time: f32) -> Vec<u8> {
    let mut b = Vec::with_capacity(HEADER_SIZE);
    b.extend_from_slice(&format.to_le_bytes());
    b.extend_from_slice(&[23, 1, 2, 1, id as u8]);
    b.extend_from_slice(&0x0102_0304_0506_0708_u64.to_le_bytes());
    b.extend_from_slice(&session_time.to_le_bytes());
    b.extend_from_slice(&7u32.to_le_bytes());
    b.extend_from_slice(&7u32.to_le_bytes());
    b.extend_from_slice(&[player, 255]);
    b
}

/// Zeroed datagram of `len` bytes with a valid 2023 header.
pub fn zeroed(id: PacketId, player: u8, len: usize) -> Vec<u8> {
    let mut b = header(PACKET_FORMAT_2023, id, player, 1.5);
    b.resize(len, 0);
    b
}

/// Car telemetry datagram with one populated car at `player`.
pub fn car_telemetry(player: u8, speed: u16, throttle: f32, brake: f32, gear: i8) -> Vec<u8> {
    let mut b = zeroed(PacketId::CarTelemetry, player, 1352);
    if (player as usize) < 22 {
        let off = HEADER_SIZE + player as usize * 60;
        b[off..off + 2].copy_from_slice(&speed.to_le_bytes());
        b[off + 2..off + 6].copy_from_slice(&throttle.to_le_bytes());
        b[off + 6..off + 10].copy_from_slice(&(-0.25f32).to_le_bytes());
        b[off + 10..off + 14].copy_from_slice(&brake.to_le_bytes());
        b[off + 14] = 12; // clutch
        b[off + 15] = gear as u8;
        b[off + 16..off + 18].copy_from_slice(&11_500u16.to_le_bytes());
        b[off + 18] = 1; // drs
        b[off + 19] = 80; // rev lights
    }
    b[1351] = 3u8; // suggested gear
    b
}

/// Motion datagram with one populated car at `player`.
pub fn motion(player: u8, x: f32, y: f32, z: f32) -> Vec<u8> {
    let mut b = zeroed(PacketId::Motion, player, 1349);
    if (player as usize) < 22 {
        let off = HEADER_SIZE + player as usize * 60;
        b[off..off + 4].copy_from_slice(&x.to_le_bytes());
        b[off + 4..off + 8].copy_from_slice(&y.to_le_bytes());
        b[off + 8..off + 12].copy_from_slice(&z.to_le_bytes());
    }
    b
}

/// Session datagram carrying `track_id` and track length.
pub fn session(track_id: i8, track_length: u16) -> Vec<u8> {
    let mut b = zeroed(PacketId::Session, 0, 644);
    let off = HEADER_SIZE;
    b[off + 4..off + 6].copy_from_slice(&track_length.to_le_bytes());
    b[off + 6] = 10; // session type
    b[off + 7] = track_id as u8;
    b
}

/// Event datagram with a 4-byte code followed by `details` (padded to 12).
pub fn event(code: &[u8; 4], details: &[u8]) -> Vec<u8> {
    let mut b = zeroed(PacketId::Event, 0, HEADER_SIZE);
    b.extend_from_slice(code);
    b.extend_from_slice(details);
    b.resize(45, 0);
    b
}

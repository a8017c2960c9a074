//! EA/Codemasters F1 UDP telemetry (packet format 2023).
//!
//! Datagrams are decoded into typed [`PacketRecord`]s by a
//! [`DecoderRegistry`]; [`F1Source`] owns the UDP loop and publishes the
//! controlled car's inputs and position into the shared
//! [`LiveContext`](delta_ingest_core::LiveContext).

mod error;
mod header;
pub mod packets;
mod registry;
mod source;
mod wire;

pub use error::DecodeError;
pub use header::{PacketHeader, PacketId};
pub use registry::{DecodeFn, Decoder, DecoderRegistry, PacketRecord};
pub use source::{process_datagram, F1Config, F1Source, PacketSink, Published};

/// Value of `packet_format` for the supported game year.
pub const PACKET_FORMAT_2023: u16 = 2023;
/// Size of the packed header that starts every datagram.
pub const HEADER_SIZE: usize = 29;
/// Number of car slots in every per-car array.
pub const NUM_CARS: usize = 22;
/// `secondary_player_car_index` when there is no split-screen player.
pub const NO_SECONDARY_PLAYER: u8 = 255;
pub const DEFAULT_PORT: u16 = 20777;
pub const MAX_PACKET_BYTES: usize = 2048;

//! Packet id -> decode routine table.

use crate::packets::*;
use crate::{DecodeError, PacketHeader, PacketId, HEADER_SIZE, PACKET_FORMAT_2023};

pub type DecodeFn = fn(PacketHeader, &[u8]) -> Result<PacketRecord, DecodeError>;

/// One registered packet layout.
#[derive(Clone, Copy, Debug)]
pub struct Decoder {
    pub id: PacketId,
    /// Smallest datagram the layout can be read from.
    pub min_len: usize,
    pub decode: DecodeFn,
}

/// A decoded datagram. Lives only for the duration of one dispatch.
#[derive(Clone, Debug, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum PacketRecord {
    Motion(MotionPacket),
    Session(SessionPacket),
    LapData(LapDataPacket),
    Event(EventPacket),
    Participants(ParticipantsPacket),
    CarSetups(CarSetupsPacket),
    CarTelemetry(CarTelemetryPacket),
    CarStatus(CarStatusPacket),
    FinalClassification(FinalClassificationPacket),
    LobbyInfo(LobbyInfoPacket),
    CarDamage(CarDamagePacket),
    SessionHistory(SessionHistoryPacket),
    TyreSets(TyreSetsPacket),
    MotionEx(MotionExPacket),
}

impl PacketRecord {
    pub fn header(&self) -> &PacketHeader {
        match self {
            PacketRecord::Motion(p) => &p.header,
            PacketRecord::Session(p) => &p.header,
            PacketRecord::LapData(p) => &p.header,
            PacketRecord::Event(p) => &p.header,
            PacketRecord::Participants(p) => &p.header,
            PacketRecord::CarSetups(p) => &p.header,
            PacketRecord::CarTelemetry(p) => &p.header,
            PacketRecord::CarStatus(p) => &p.header,
            PacketRecord::FinalClassification(p) => &p.header,
            PacketRecord::LobbyInfo(p) => &p.header,
            PacketRecord::CarDamage(p) => &p.header,
            PacketRecord::SessionHistory(p) => &p.header,
            PacketRecord::TyreSets(p) => &p.header,
            PacketRecord::MotionEx(p) => &p.header,
        }
    }

    pub fn packet_id(&self) -> PacketId {
        match self {
            PacketRecord::Motion(_) => PacketId::Motion,
            PacketRecord::Session(_) => PacketId::Session,
            PacketRecord::LapData(_) => PacketId::LapData,
            PacketRecord::Event(_) => PacketId::Event,
            PacketRecord::Participants(_) => PacketId::Participants,
            PacketRecord::CarSetups(_) => PacketId::CarSetups,
            PacketRecord::CarTelemetry(_) => PacketId::CarTelemetry,
            PacketRecord::CarStatus(_) => PacketId::CarStatus,
            PacketRecord::FinalClassification(_) => PacketId::FinalClassification,
            PacketRecord::LobbyInfo(_) => PacketId::LobbyInfo,
            PacketRecord::CarDamage(_) => PacketId::CarDamage,
            PacketRecord::SessionHistory(_) => PacketId::SessionHistory,
            PacketRecord::TyreSets(_) => PacketId::TyreSets,
            PacketRecord::MotionEx(_) => PacketId::MotionEx,
        }
    }
}

/// Maps the header's packet id to a decoder and its minimum length.
///
/// Validation runs strictly before any body field is touched: header length,
/// then packet format, then the registered id, then the layout length.
#[derive(Clone)]
pub struct DecoderRegistry {
    expected_format: u16,
    decoders: [Option<Decoder>; 256],
}

impl DecoderRegistry {
    /// An empty registry. Every id is unrecognized until registered.
    pub fn new(expected_format: u16) -> Self {
        Self { expected_format, decoders: [None; 256] }
    }

    /// All fourteen F1 23 layouts.
    pub fn f1_23() -> Self {
        Self::with_format(PACKET_FORMAT_2023)
    }

    /// The F1 23 layouts, accepting a different header format value.
    pub fn with_format(expected_format: u16) -> Self {
        let mut r = Self::new(expected_format);
        r.register(PacketId::Motion, MotionPacket::SIZE, |h, raw| {
            MotionPacket::decode(h, raw).map(PacketRecord::Motion)
        });
        r.register(PacketId::Session, SessionPacket::SIZE, |h, raw| {
            SessionPacket::decode(h, raw).map(PacketRecord::Session)
        });
        r.register(PacketId::LapData, LapDataPacket::SIZE, |h, raw| {
            LapDataPacket::decode(h, raw).map(PacketRecord::LapData)
        });
        r.register(PacketId::Event, EventPacket::SIZE, |h, raw| {
            EventPacket::decode(h, raw).map(PacketRecord::Event)
        });
        r.register(PacketId::Participants, ParticipantsPacket::SIZE, |h, raw| {
            ParticipantsPacket::decode(h, raw).map(PacketRecord::Participants)
        });
        r.register(PacketId::CarSetups, CarSetupsPacket::SIZE, |h, raw| {
            CarSetupsPacket::decode(h, raw).map(PacketRecord::CarSetups)
        });
        r.register(PacketId::CarTelemetry, CarTelemetryPacket::SIZE, |h, raw| {
            CarTelemetryPacket::decode(h, raw).map(PacketRecord::CarTelemetry)
        });
        r.register(PacketId::CarStatus, CarStatusPacket::SIZE, |h, raw| {
            CarStatusPacket::decode(h, raw).map(PacketRecord::CarStatus)
        });
        r.register(PacketId::FinalClassification, FinalClassificationPacket::SIZE, |h, raw| {
            FinalClassificationPacket::decode(h, raw).map(PacketRecord::FinalClassification)
        });
        r.register(PacketId::LobbyInfo, LobbyInfoPacket::SIZE, |h, raw| {
            LobbyInfoPacket::decode(h, raw).map(PacketRecord::LobbyInfo)
        });
        r.register(PacketId::CarDamage, CarDamagePacket::SIZE, |h, raw| {
            CarDamagePacket::decode(h, raw).map(PacketRecord::CarDamage)
        });
        r.register(PacketId::SessionHistory, SessionHistoryPacket::SIZE, |h, raw| {
            SessionHistoryPacket::decode(h, raw).map(PacketRecord::SessionHistory)
        });
        r.register(PacketId::TyreSets, TyreSetsPacket::SIZE, |h, raw| {
            TyreSetsPacket::decode(h, raw).map(PacketRecord::TyreSets)
        });
        r.register(PacketId::MotionEx, MotionExPacket::SIZE, |h, raw| {
            MotionExPacket::decode(h, raw).map(PacketRecord::MotionEx)
        });
        r
    }

    /// Register (or replace) the decoder for `id`.
    pub fn register(&mut self, id: PacketId, min_len: usize, decode: DecodeFn) {
        self.decoders[id as usize] = Some(Decoder { id, min_len: min_len.max(HEADER_SIZE), decode });
    }

    pub fn expected_format(&self) -> u16 {
        self.expected_format
    }

    pub fn min_len(&self, id: PacketId) -> Option<usize> {
        self.decoders[id as usize].map(|d| d.min_len)
    }

    /// Decode a datagram, dispatching on the id carried in its header.
    pub fn decode(&self, raw: &[u8]) -> Result<PacketRecord, DecodeError> {
        let header = self.validate_header(raw)?;
        self.dispatch(header.packet_id, header, raw)
    }

    /// Decode a datagram as `packet_id`, whatever its header says.
    pub fn decode_as(&self, packet_id: u8, raw: &[u8]) -> Result<PacketRecord, DecodeError> {
        let header = self.validate_header(raw)?;
        self.dispatch(packet_id, header, raw)
    }

    fn validate_header(&self, raw: &[u8]) -> Result<PacketHeader, DecodeError> {
        let header = PacketHeader::parse(raw)?;
        if header.packet_format != self.expected_format {
            return Err(DecodeError::FormatMismatch {
                found: header.packet_format,
                expected: self.expected_format,
            });
        }
        Ok(header)
    }

    fn dispatch(&self, packet_id: u8, header: PacketHeader, raw: &[u8]) -> Result<PacketRecord, DecodeError> {
        let decoder = self.decoders[packet_id as usize].ok_or(DecodeError::Unrecognized(packet_id))?;
        if raw.len() < decoder.min_len {
            return Err(DecodeError::Truncated {
                packet: decoder.id.name(),
                len: raw.len(),
                need: decoder.min_len,
            });
        }
        (decoder.decode)(header, raw)
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::f1_23()
    }
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("expected_format", &self.expected_format)
            .field("registered", &self.decoders.iter().flatten().count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datagram(id: u8, len: usize) -> Vec<u8> {
        let mut b = vec![0u8; len.max(HEADER_SIZE)];
        b[..2].copy_from_slice(&PACKET_FORMAT_2023.to_le_bytes());
        b[6] = id;
        b.truncate(len);
        b
    }

    #[test]
    fn test_registered_sizes() {
        let r = DecoderRegistry::f1_23();
        let expected = [
            (PacketId::Motion, 1349),
            (PacketId::Session, 644),
            (PacketId::LapData, 1131),
            (PacketId::Event, 45),
            (PacketId::Participants, 1306),
            (PacketId::CarSetups, 1107),
            (PacketId::CarTelemetry, 1352),
            (PacketId::CarStatus, 1239),
            (PacketId::FinalClassification, 1020),
            (PacketId::LobbyInfo, 1218),
            (PacketId::CarDamage, 953),
            (PacketId::SessionHistory, 1460),
            (PacketId::TyreSets, 231),
            (PacketId::MotionEx, 217),
        ];
        for (id, size) in expected {
            assert_eq!(r.min_len(id), Some(size), "{}", id.name());
        }
    }

    #[test]
    fn test_every_layout_decodes_zeroed_datagram() {
        let r = DecoderRegistry::f1_23();
        for id in PacketId::ALL {
            let size = r.min_len(id).unwrap();
            let rec = r.decode(&datagram(id as u8, size)).unwrap();
            assert_eq!(rec.packet_id(), id);
            assert_eq!(rec.header().packet_id, id as u8);
        }
    }

    #[test]
    fn test_rejection_order() {
        let r = DecoderRegistry::f1_23();
        assert!(matches!(r.decode(&[0u8; 10]), Err(DecodeError::TooShort { len: 10 })));

        // Format is checked before the id and the length.
        let mut bad = datagram(99, HEADER_SIZE);
        bad[..2].copy_from_slice(&2022u16.to_le_bytes());
        assert!(matches!(
            r.decode(&bad),
            Err(DecodeError::FormatMismatch { found: 2022, expected: 2023 })
        ));

        assert!(matches!(r.decode(&datagram(99, 1500)), Err(DecodeError::Unrecognized(99))));
        assert!(matches!(
            r.decode(&datagram(6, 1351)),
            Err(DecodeError::Truncated { packet: "car_telemetry", len: 1351, need: 1352 })
        ));
    }

    #[test]
    fn test_empty_registry_reports_unrecognized() {
        let r = DecoderRegistry::new(PACKET_FORMAT_2023);
        let err = r.decode(&datagram(0, 1349)).unwrap_err();
        assert!(err.is_unrecognized());
    }

    #[test]
    fn test_decode_as_overrides_header_id() {
        let r = DecoderRegistry::f1_23();
        let raw = datagram(0, EventPacket::SIZE);
        let rec = r.decode_as(PacketId::Event as u8, &raw).unwrap();
        assert_eq!(rec.packet_id(), PacketId::Event);
    }
}

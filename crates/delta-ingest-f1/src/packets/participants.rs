use byteorder::ReadBytesExt;
use std::io;

use crate::wire::{self, Reader};
use crate::{DecodeError, PacketHeader, HEADER_SIZE, NUM_CARS};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticipantData {
    pub ai_controlled: u8,
    pub driver_id: u8,  // 255 if network human
    pub network_id: u8,
    pub team_id: u8,
    pub my_team: u8,
    pub race_number: u8,
    pub nationality: u8,
    pub name_raw: [u8; 48],
    pub your_telemetry: u8, // 0 restricted, 1 public
    pub show_online_names: u8,
    pub platform: u8,
}

impl ParticipantData {
    pub const SIZE: usize = 58;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self {
            ai_controlled: c.read_u8()?,
            driver_id: c.read_u8()?,
            network_id: c.read_u8()?,
            team_id: c.read_u8()?,
            my_team: c.read_u8()?,
            race_number: c.read_u8()?,
            nationality: c.read_u8()?,
            name_raw: wire::read_bytes::<48>(c)?,
            your_telemetry: c.read_u8()?,
            show_online_names: c.read_u8()?,
            platform: c.read_u8()?,
        })
    }

    pub fn name(&self) -> String {
        wire::c_string(&self.name_raw)
    }
}

/// Packet 4: who is driving which car.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticipantsPacket {
    pub header: PacketHeader,
    pub num_active_cars: u8,
    pub participants: [ParticipantData; NUM_CARS],
}

impl ParticipantsPacket {
    pub const SIZE: usize = HEADER_SIZE + 1 + NUM_CARS * ParticipantData::SIZE;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        Ok(Self {
            header,
            num_active_cars: c.read_u8()?,
            participants: wire::read_array(&mut c, ParticipantData::read)?,
        })
    }

    pub fn active(&self) -> &[ParticipantData] {
        super::active(&self.participants, self.num_active_cars)
    }
}

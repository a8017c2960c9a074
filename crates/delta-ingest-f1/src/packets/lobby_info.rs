use byteorder::ReadBytesExt;
use std::io;

use crate::wire::{self, Reader};
use crate::{DecodeError, PacketHeader, HEADER_SIZE, NUM_CARS};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LobbyInfoData {
    pub ai_controlled: u8,
    pub team_id: u8, // 255 if no team selected
    pub nationality: u8,
    pub platform: u8,
    pub name_raw: [u8; 48],
    pub car_number: u8,
    pub ready_status: u8, // 0 not ready, 1 ready, 2 spectating
}

impl LobbyInfoData {
    pub const SIZE: usize = 54;

    fn read(c: &mut Reader<'_>) -> io::Result<Self> {
        Ok(Self {
            ai_controlled: c.read_u8()?,
            team_id: c.read_u8()?,
            nationality: c.read_u8()?,
            platform: c.read_u8()?,
            name_raw: wire::read_bytes::<48>(c)?,
            car_number: c.read_u8()?,
            ready_status: c.read_u8()?,
        })
    }

    pub fn name(&self) -> String {
        wire::c_string(&self.name_raw)
    }
}

/// Packet 9: multiplayer lobby.
#[derive(Clone, Debug, PartialEq)]
pub struct LobbyInfoPacket {
    pub header: PacketHeader,
    pub num_players: u8,
    pub players: [LobbyInfoData; NUM_CARS],
}

impl LobbyInfoPacket {
    pub const SIZE: usize = HEADER_SIZE + 1 + NUM_CARS * LobbyInfoData::SIZE;

    pub fn decode(header: PacketHeader, raw: &[u8]) -> Result<Self, DecodeError> {
        let mut c = wire::body(raw);
        Ok(Self {
            header,
            num_players: c.read_u8()?,
            players: wire::read_array(&mut c, LobbyInfoData::read)?,
        })
    }

    pub fn active(&self) -> &[LobbyInfoData] {
        super::active(&self.players, self.num_players)
    }
}

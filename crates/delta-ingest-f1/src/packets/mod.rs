//! Fixed layouts for the fourteen packet types.
//!
//! Every layout is packed little-endian with no padding; sizes below are the
//! full datagram lengths and double as the registry's minimum lengths. Per-car
//! arrays always hold [`NUM_CARS`](crate::NUM_CARS) slots; entries past the
//! active-car count are whatever the game left there.

mod car_damage;
mod car_setups;
mod car_status;
mod car_telemetry;
mod event;
mod final_classification;
mod lap_data;
mod lobby_info;
mod motion;
mod motion_ex;
mod participants;
mod session;
mod session_history;
mod tyre_sets;

pub use car_damage::{CarDamageData, CarDamagePacket};
pub use car_setups::{CarSetupData, CarSetupsPacket};
pub use car_status::{CarStatusData, CarStatusPacket};
pub use car_telemetry::{CarTelemetryData, CarTelemetryPacket};
pub use event::{EventDetails, EventPacket};
pub use final_classification::{FinalClassificationData, FinalClassificationPacket};
pub use lap_data::{LapData, LapDataPacket};
pub use lobby_info::{LobbyInfoData, LobbyInfoPacket};
pub use motion::{CarMotionData, MotionPacket};
pub use motion_ex::MotionExPacket;
pub use participants::{ParticipantData, ParticipantsPacket};
pub use session::{MarshalZone, SessionPacket, WeatherForecastSample};
pub use session_history::{
    LapHistoryData, SessionHistoryPacket, TyreStintHistoryData, MAX_LAPS_IN_HISTORY, MAX_TYRE_STINTS,
};
pub use tyre_sets::{TyreSetData, TyreSetsPacket, NUM_TYRE_SETS};

/// Clamp a reported count to the number of slots actually present.
pub(crate) fn active<T>(items: &[T], count: u8) -> &[T] {
    &items[..(count as usize).min(items.len())]
}

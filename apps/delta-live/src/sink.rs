use tracing::{debug, info};

use delta_ingest_f1::packets::EventDetails;
use delta_ingest_f1::{PacketRecord, PacketSink};

/// Logs race events as they arrive. Everything else is ignored.
pub struct EventLogSink;

impl PacketSink for EventLogSink {
    fn on_packet(&self, record: &PacketRecord) {
        let PacketRecord::Event(event) = record else {
            return;
        };
        let t = event.header.session_time;
        match event.details {
            EventDetails::FastestLap { vehicle_idx, lap_time } => {
                info!(t, car = vehicle_idx, lap_time, "fastest lap");
            }
            EventDetails::Penalty { penalty_type, infringement_type, vehicle_idx, time, lap_num, .. } => {
                info!(t, car = vehicle_idx, penalty_type, infringement_type, time, lap = lap_num, "penalty");
            }
            EventDetails::SpeedTrap { vehicle_idx, speed, .. } => {
                debug!(t, car = vehicle_idx, speed, "speed trap");
            }
            EventDetails::Overtake { overtaking_vehicle_idx, being_overtaken_vehicle_idx } => {
                debug!(t, car = overtaking_vehicle_idx, passed = being_overtaken_vehicle_idx, "overtake");
            }
            EventDetails::Buttons { .. } => {}
            EventDetails::Unknown(code) => {
                debug!(t, code = %String::from_utf8_lossy(&code), "unknown event");
            }
            other => info!(t, code = event.code_str(), "{}", other.description()),
        }
    }
}

use anyhow::Context;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, info, trace, warn};

use delta_ingest_core::{
    IngestError, LiveContext, LiveInputSample, LivePositionSample, TelemetrySource,
};

use crate::{DecodeError, DecoderRegistry, PacketRecord, DEFAULT_PORT, MAX_PACKET_BYTES, PACKET_FORMAT_2023};

#[derive(Clone, Debug)]
pub struct F1Config {
    pub bind_addr: String,    // e.g. "0.0.0.0:20777"
    pub expected_format: u16, // 2023
    pub recv_buffer: usize,
}

impl Default for F1Config {
    fn default() -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            expected_format: PACKET_FORMAT_2023,
            recv_buffer: MAX_PACKET_BYTES,
        }
    }
}

impl F1Config {
    /// Defaults overridden by `DELTA_F1_BIND` and `DELTA_F1_FORMAT`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(bind) = env_string("DELTA_F1_BIND") {
            cfg.bind_addr = bind;
        }
        cfg.expected_format = env_u16("DELTA_F1_FORMAT", cfg.expected_format);
        cfg
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn env_u16(name: &str, fallback: u16) -> u16 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u16>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(fallback)
}

/// Receives every successfully decoded packet, before live samples are
/// extracted from it. Called on the receive task, so it must not block.
pub trait PacketSink: Send + Sync {
    fn on_packet(&self, record: &PacketRecord);
}

/// Samples pushed into the live rings for one datagram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Published {
    pub inputs: usize,
    pub positions: usize,
}

/// Decode one datagram and publish the controlled car's samples.
///
/// Every outcome is counted in `ctx.stats`. An out-of-range controlled-car
/// index only fails sample extraction: the record has already been handed to
/// `sink` by then.
pub fn process_datagram(
    registry: &DecoderRegistry,
    ctx: &LiveContext,
    raw: &[u8],
    sink: Option<&dyn PacketSink>,
) -> Result<Published, DecodeError> {
    ctx.stats.record_received();
    let record = match registry.decode(raw) {
        Ok(record) => record,
        Err(err) => {
            if err.is_unrecognized() {
                ctx.stats.record_unrecognized();
            } else {
                ctx.stats.record_rejected();
            }
            return Err(err);
        }
    };
    ctx.stats.record_decoded();
    if let Some(sink) = sink {
        sink.on_packet(&record);
    }
    publish(ctx, &record).inspect_err(|err| {
        if matches!(err, DecodeError::CarIndexOutOfRange { .. }) {
            ctx.stats.record_car_index_out_of_range();
        }
    })
}

fn publish(ctx: &LiveContext, record: &PacketRecord) -> Result<Published, DecodeError> {
    let mut out = Published::default();
    match record {
        PacketRecord::CarTelemetry(p) => {
            let car = p.player()?;
            ctx.inputs.push(LiveInputSample {
                throttle: car.throttle,
                brake: car.brake,
                steer: car.steer,
                clutch: car.clutch,
                gear: car.gear,
                engine_rpm: car.engine_rpm,
                drs: car.drs != 0,
                rev_lights_percent: car.rev_lights_percent,
                speed_kph: f32::from(car.speed),
                timestamp_ms: p.header.timestamp_ms(),
            });
            ctx.stats.record_input();
            out.inputs = 1;
        }
        PacketRecord::Motion(p) => {
            let car = p.player()?;
            ctx.positions.push(LivePositionSample {
                x: car.world_position_x,
                y: car.world_position_y,
                z: car.world_position_z,
                timestamp_ms: p.header.timestamp_ms(),
            });
            ctx.stats.record_position();
            out.positions = 1;
        }
        PacketRecord::Session(p) => ctx.update_session(p.info()),
        _ => {}
    }
    Ok(out)
}

/// The F1 UDP receive loop. The only writer of the context's rings while
/// [`run`](TelemetrySource::run) is executing.
pub struct F1Source {
    cfg: F1Config,
    registry: DecoderRegistry,
    sink: Option<Arc<dyn PacketSink>>,
}

impl F1Source {
    pub fn new(cfg: F1Config) -> Self {
        let registry = DecoderRegistry::with_format(cfg.expected_format);
        Self { cfg, registry, sink: None }
    }

    pub fn with_sink(mut self, sink: Arc<dyn PacketSink>) -> Self {
        self.sink = Some(sink);
        self
    }
}

#[async_trait::async_trait]
impl TelemetrySource for F1Source {
    async fn run(&self, ctx: Arc<LiveContext>) -> Result<(), IngestError> {
        let socket = UdpSocket::bind(&self.cfg.bind_addr)
            .await
            .with_context(|| format!("bind {}", self.cfg.bind_addr))?;
        info!(
            addr = %self.cfg.bind_addr,
            format = self.cfg.expected_format,
            "F1 UDP source bound"
        );

        let sink = self.sink.as_deref();
        let mut buf = vec![0u8; self.cfg.recv_buffer.max(crate::HEADER_SIZE)];
        loop {
            let len = match socket.recv_from(&mut buf).await {
                Ok((0, _)) => continue,
                Ok((len, _peer)) => len,
                Err(err) => {
                    warn!(error = %err, "F1 UDP receive error");
                    continue;
                }
            };

            match process_datagram(&self.registry, &ctx, &buf[..len], sink) {
                Ok(_) => {}
                Err(err) if err.is_unrecognized() => {
                    trace!(error = %err, len, "skipping packet");
                }
                Err(err) => {
                    debug!(error = %err, len, "dropped datagram");
                }
            }
        }
    }
}

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use delta_ingest_core::{IngestError, LiveContext, TelemetrySource, TrackId};
use delta_ingest_f1::{
    process_datagram, DecodeError, DecoderRegistry, F1Config, F1Source, PacketId, PacketRecord,
    PacketSink, Published,
};

#[test]
fn car_telemetry_publishes_one_input_and_no_position() {
    let registry = DecoderRegistry::f1_23();
    let ctx = LiveContext::with_capacity(16);

    let raw = common::car_telemetry(3, 120, 0.5, 0.0, 4);
    let published = process_datagram(&registry, &ctx, &raw, None).unwrap();
    assert_eq!(published, Published { inputs: 1, positions: 0 });

    assert_eq!(ctx.inputs.write_count(), 1);
    assert_eq!(ctx.positions.write_count(), 0);
    let input = ctx.inputs.peek_latest().unwrap();
    assert_eq!(input.throttle, 0.5);
    assert_eq!(input.gear, 4);
    assert_eq!(input.speed_kph, 120.0);
    assert!(input.drs);
    assert_eq!(input.timestamp_ms, 1500);
}

#[test]
fn motion_publishes_position() {
    let registry = DecoderRegistry::f1_23();
    let ctx = LiveContext::with_capacity(16);

    process_datagram(&registry, &ctx, &common::motion(5, 10.0, -2.0, 300.5), None).unwrap();
    let pos = ctx.positions.peek_latest().unwrap();
    assert_eq!((pos.x, pos.y, pos.z), (10.0, -2.0, 300.5));
    assert!(ctx.inputs.is_empty());
}

#[test]
fn out_of_range_index_drops_sample_only() {
    let registry = DecoderRegistry::f1_23();
    let ctx = LiveContext::with_capacity(16);

    let err = process_datagram(&registry, &ctx, &common::car_telemetry(22, 1, 0.0, 0.0, 0), None)
        .unwrap_err();
    assert!(matches!(err, DecodeError::CarIndexOutOfRange { index: 22 }));
    assert!(ctx.inputs.is_empty());

    let stats = ctx.stats.snapshot();
    assert_eq!(stats.decoded, 1);
    assert_eq!(stats.car_index_out_of_range, 1);
    assert_eq!(stats.rejected, 0);
}

#[test]
fn session_packet_sets_current_track() {
    let registry = DecoderRegistry::f1_23();
    let ctx = LiveContext::with_capacity(4);
    assert_eq!(ctx.current_track(), None);

    let published = process_datagram(&registry, &ctx, &common::session(13, 5148), None).unwrap();
    assert_eq!(published, Published::default());
    assert_eq!(ctx.current_track(), Some(TrackId(13)));
    assert_eq!(ctx.session().track_length_m, 5148);
}

#[test]
fn bad_datagrams_are_counted() {
    let registry = DecoderRegistry::f1_23();
    let ctx = LiveContext::with_capacity(4);

    let _ = process_datagram(&registry, &ctx, &[0u8; 3], None);
    let mut unknown = common::zeroed(PacketId::Motion, 0, 100);
    unknown[6] = 42;
    let _ = process_datagram(&registry, &ctx, &unknown, None);
    let _ = process_datagram(&registry, &ctx, &common::zeroed(PacketId::LapData, 0, 200), None);

    let stats = ctx.stats.snapshot();
    assert_eq!(stats.received, 3);
    assert_eq!(stats.unrecognized, 1);
    assert_eq!(stats.rejected, 2);
    assert_eq!(stats.decoded, 0);
}

#[derive(Default)]
struct Recorder(Mutex<Vec<PacketId>>);

impl PacketSink for Recorder {
    fn on_packet(&self, record: &PacketRecord) {
        self.0.lock().unwrap().push(record.packet_id());
    }
}

#[test]
fn sink_sees_record_even_when_index_invalid() {
    let registry = DecoderRegistry::f1_23();
    let ctx = LiveContext::with_capacity(4);
    let sink = Recorder::default();

    let _ = process_datagram(&registry, &ctx, &common::motion(200, 0.0, 0.0, 0.0), Some(&sink));
    let _ = process_datagram(&registry, &ctx, &common::event(b"LGOT", &[]), Some(&sink));
    assert_eq!(*sink.0.lock().unwrap(), vec![PacketId::Motion, PacketId::Event]);
}

#[tokio::test]
async fn udp_source_survives_garbage() {
    let free = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    let addr = free.local_addr().unwrap();
    drop(free);

    let cfg = F1Config { bind_addr: addr.to_string(), ..F1Config::default() };
    let source = F1Source::new(cfg);
    let ctx = Arc::new(LiveContext::with_capacity(32));
    let task = {
        let ctx = Arc::clone(&ctx);
        tokio::spawn(async move { source.run(ctx).await })
    };

    let sender = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while ctx.inputs.is_empty() && tokio::time::Instant::now() < deadline {
        sender.send_to(&[1, 2, 3], addr).await.unwrap();
        sender.send_to(&common::car_telemetry(0, 50, 1.0, 0.0, 2), addr).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert!(!task.is_finished());
    assert_eq!(ctx.inputs.peek_latest().map(|s| s.gear), Some(2));
    assert!(ctx.stats.snapshot().rejected >= 1);
    task.abort();
}

#[test]
fn config_from_env_overrides_defaults() {
    let default = F1Config::default();
    assert_eq!(default.bind_addr, "0.0.0.0:20777");
    assert_eq!(default.expected_format, 2023);
    assert_eq!(default.recv_buffer, 2048);

    std::env::set_var("DELTA_F1_FORMAT", "2024");
    let cfg = F1Config::from_env();
    std::env::remove_var("DELTA_F1_FORMAT");
    assert_eq!(cfg.expected_format, 2024);
}

#[tokio::test]
async fn bind_failure_is_reported_with_address() {
    let cfg = F1Config { bind_addr: "not-an-address".into(), ..F1Config::default() };
    let err = F1Source::new(cfg).run(Arc::new(LiveContext::new())).await.unwrap_err();
    assert!(matches!(err, IngestError::Other(_)));
    assert!(err.to_string().contains("bind not-an-address"), "{err}");
}

use serde::Serialize;

use model::LiveInputSample;

/// Input statistics over a window of live samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct InputSummary {
    pub samples: usize,
    pub throttle_max: f32,
    pub brake_max: f32,
    pub steer_min: f32,
    pub steer_max: f32,
    pub speed_max_kph: f32,
}

pub fn input_summary(samples: &[LiveInputSample]) -> InputSummary {
    let Some(first) = samples.first() else {
        return InputSummary::default();
    };
    samples.iter().fold(
        InputSummary {
            samples: 0,
            throttle_max: first.throttle,
            brake_max: first.brake,
            steer_min: first.steer,
            steer_max: first.steer,
            speed_max_kph: first.speed_kph,
        },
        |acc, s| InputSummary {
            samples: acc.samples + 1,
            throttle_max: acc.throttle_max.max(s.throttle),
            brake_max: acc.brake_max.max(s.brake),
            steer_min: acc.steer_min.min(s.steer),
            steer_max: acc.steer_max.max(s.steer),
            speed_max_kph: acc.speed_max_kph.max(s.speed_kph),
        },
    )
}

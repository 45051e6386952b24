use ahash::AHashMap;

/// Per-pass inputs that come from outside the graph: wall-clock time and device readings.
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    time_ms: u64,
    sensor_readings: AHashMap<String, f64>,
}

impl EvalContext {
    pub fn new(time_ms: u64) -> Self {
        Self {
            time_ms,
            ..Default::default()
        }
    }

    pub fn with_reading(mut self, channel: impl Into<String>, value: f64) -> Self {
        self.set_reading(channel, value);
        self
    }

    pub fn set_reading(&mut self, channel: impl Into<String>, value: f64) {
        self.sensor_readings.insert(channel.into(), value);
    }

    pub fn set_time_ms(&mut self, time_ms: u64) {
        self.time_ms = time_ms;
    }

    pub fn time_ms(&self) -> u64 {
        self.time_ms
    }

    pub fn reading(&self, channel: &str) -> Option<f64> {
        self.sensor_readings.get(channel).copied()
    }
}

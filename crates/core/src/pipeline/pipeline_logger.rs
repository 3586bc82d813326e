use std::collections::BTreeMap;
use std::time::Instant;

/// Sink for what the annotation loops observe while they run.
///
/// Use cases report through this trait so callers choose where stage
/// timings and counts end up.
pub trait PipelineLogger {
    /// Report frame-level progress. `total` is `None` for live sources.
    fn progress(&mut self, current: usize, total: Option<usize>);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a per-frame value, e.g. objects found.
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Running count, sum and range of one series.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Tally {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
}

impl Tally {
    fn record(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

fn record_into(series: &mut BTreeMap<String, Tally>, name: &str, value: f64) {
    match series.get_mut(name) {
        Some(tally) => tally.record(value),
        None => {
            let mut tally = Tally::default();
            tally.record(value);
            series.insert(name.to_string(), tally);
        }
    }
}

/// Logs throttled progress through `log` and keeps one running tally per
/// stage and metric, so memory stays flat however long a camera runs.
pub struct StdoutPipelineLogger {
    throttle_frames: usize,
    stages: BTreeMap<String, Tally>,
    metrics: BTreeMap<String, Tally>,
    started: Instant,
    frames: usize,
}

impl StdoutPipelineLogger {
    /// Progress is logged every `throttle_frames` frames (at least 1).
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            stages: BTreeMap::new(),
            metrics: BTreeMap::new(),
            started: Instant::now(),
            frames: 0,
        }
    }

    /// The end-of-run report, or `None` when nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.stages.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_s = self.started.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Run summary ({} frames, {elapsed_s:.1}s):",
            self.frames
        )];

        for (stage, t) in &self.stages {
            lines.push(format!(
                "  {stage:10}: avg {:6.1}ms  min {:6.1}ms  max {:6.1}ms  total {:7.0}ms",
                t.mean(),
                t.min,
                t.max,
                t.sum
            ));
        }
        for (name, t) in &self.metrics {
            lines.push(format!("  {name}: avg {:.1}, max {:.0}", t.mean(), t.max));
        }

        if self.frames > 0 && elapsed_s > 0.0 {
            lines.push(format!(
                "  Throughput: {:.1} fps",
                self.frames as f64 / elapsed_s
            ));
        }
        Some(lines.join("\n"))
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: Option<usize>) {
        self.frames = current;
        let due = current % self.throttle_frames == 0;
        match total {
            Some(total) if total > 0 => {
                if due || current == total {
                    let pct = current as f64 / total as f64 * 100.0;
                    log::info!("Processing: {current}/{total} frames ({pct:.1}%)");
                }
            }
            _ if due => log::info!("Processing: {current} frames"),
            _ => {}
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        record_into(&mut self.stages, stage, duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        record_into(&mut self.metrics, name, value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

use log::info;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

/// Valeur de métrique typée
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(usize),
    Value(f32),
}

impl MetricValue {
    fn as_f32(self) -> f32 {
        match self {
            MetricValue::Count(c) => c as f32,
            MetricValue::Value(v) => v,
        }
    }
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        MetricValue::Count(v)
    }
}

impl From<f32> for MetricValue {
    fn from(v: f32) -> Self {
        MetricValue::Value(v)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(c) => write!(f, "{}", c),
            MetricValue::Value(v) => write!(f, "{:.2}", v),
        }
    }
}

/// (moyenne, min, max) d'une série
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub avg: f32,
    pub min: f32,
    pub max: f32,
}

impl Summary {
    fn of(series: impl Iterator<Item = f32>) -> Option<Self> {
        let (mut sum, mut n) = (0.0, 0usize);
        let (mut min, mut max) = (f32::MAX, f32::MIN);
        for x in series {
            sum += x;
            n += 1;
            min = min.min(x);
            max = max.max(x);
        }
        (n > 0).then(|| Summary {
            avg: sum / n as f32,
            min,
            max,
        })
    }
}

#[derive(Debug, Default)]
struct ProfilerInner {
    samples: BTreeMap<String, VecDeque<f32>>,
    metrics: BTreeMap<String, VecDeque<MetricValue>>,
    frame_times: VecDeque<f32>,
    max_samples: usize,
}

fn push_bounded<T>(buffer: &mut VecDeque<T>, value: T, max: usize) {
    if buffer.len() >= max {
        buffer.pop_front();
    }
    buffer.push_back(value);
}

/// Profiler partagé : fenêtres glissantes de durées (ms) et de métriques.
#[derive(Debug, Clone)]
pub struct Profiler {
    inner: Arc<RwLock<ProfilerInner>>,
}

impl Profiler {
    pub fn new(max_samples: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ProfilerInner {
                max_samples: max_samples.max(1),
                ..ProfilerInner::default()
            })),
        }
    }

    // Un thread qui panique en tenant le verrou ne rend pas les mesures inutilisables.
    fn read(&self) -> RwLockReadGuard<'_, ProfilerInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProfilerInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Mesure globale d'une frame (RAII)
    pub fn frame(&self) -> FrameGuard<'_> {
        FrameGuard {
            profiler: self,
            start: Instant::now(),
        }
    }

    /// Mesure d'un bloc labelisé (RAII)
    pub fn measure(&self, label: impl Into<String>) -> MeasureGuard<'_> {
        MeasureGuard {
            profiler: self,
            label: label.into(),
            start: Instant::now(),
        }
    }

    pub fn record_metric<T: Into<MetricValue>>(&self, label: impl Into<String>, value: T) {
        let mut inner = self.write();
        let max = inner.max_samples;
        let buffer = inner.metrics.entry(label.into()).or_default();
        push_bounded(buffer, value.into(), max);
    }

    fn record_sample(&self, label: &str, ms: f32) {
        let mut inner = self.write();
        let max = inner.max_samples;
        let buffer = inner.samples.entry(label.to_owned()).or_default();
        push_bounded(buffer, ms, max);
    }

    /// FPS moyen sur la fenêtre courante (0 sans mesure)
    pub fn fps(&self) -> f32 {
        match Summary::of(self.read().frame_times.iter().copied()) {
            Some(s) if s.avg > 0.0 => 1000.0 / s.avg,
            _ => 0.0,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.read().frame_times.len()
    }

    pub fn summary(&self) -> BTreeMap<String, Summary> {
        self.read()
            .samples
            .iter()
            .filter_map(|(k, v)| Summary::of(v.iter().copied()).map(|s| (k.clone(), s)))
            .collect()
    }

    pub fn metric_summary(&self, label: &str) -> Option<Summary> {
        let inner = self.read();
        let series = inner.metrics.get(label)?;
        Summary::of(series.iter().map(|v| v.as_f32()))
    }

    pub fn last_metric(&self, label: &str) -> Option<MetricValue> {
        self.read().metrics.get(label)?.back().copied()
    }

    /// Log toutes les métriques avec un target spécifique
    pub fn log_metrics_for_target(&self, target: &str, show_fps: bool) {
        if show_fps {
            info!(target: target, "{:.2} FPS", self.fps());
        }
        for (label, s) in self.summary() {
            info!(
                target: target,
                "{}: avg = {:.3} ms | min = {:.3} ms | max = {:.3} ms", label, s.avg, s.min, s.max
            );
        }
        let labels: Vec<String> = self.read().metrics.keys().cloned().collect();
        for label in labels {
            if let (Some(s), Some(last)) = (self.metric_summary(&label), self.last_metric(&label)) {
                info!(
                    target: target,
                    "{label}: last={last}, avg={:.2}, min={:.2}, max={:.2}", s.avg, s.min, s.max
                );
            }
        }
    }
}

pub struct FrameGuard<'a> {
    profiler: &'a Profiler,
    start: Instant,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        let dt = self.start.elapsed().as_secs_f32() * 1000.0;
        let mut inner = self.profiler.write();
        let max = inner.max_samples;
        push_bounded(&mut inner.frame_times, dt, max);
    }
}

pub struct MeasureGuard<'a> {
    profiler: &'a Profiler,
    label: String,
    start: Instant,
}

impl Drop for MeasureGuard<'_> {
    fn drop(&mut self) {
        let dt = self.start.elapsed().as_secs_f32() * 1000.0;
        self.profiler.record_sample(&self.label, dt);
    }
}

/// Le target de log est le module appelant (`module_path!()`).
#[macro_export]
macro_rules! log_metrics {
    ($profiler:expr) => {
        $profiler.log_metrics_for_target(module_path!(), false);
    };
}

#[macro_export]
macro_rules! log_metrics_and_fps {
    ($profiler:expr) => {
        $profiler.log_metrics_for_target(module_path!(), true);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_window_keeps_last_samples() {
        let profiler = Profiler::new(3);
        for n in [1usize, 2, 3, 10] {
            profiler.record_metric("particles", n);
        }
        let s = profiler.metric_summary("particles").unwrap();
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 10.0);
        assert_eq!(s.avg, 5.0);
        assert_eq!(profiler.last_metric("particles"), Some(MetricValue::Count(10)));
        assert!(profiler.metric_summary("rockets").is_none());
    }

    #[test]
    fn test_guards_record_durations() {
        let profiler = Profiler::new(10);
        {
            let _frame = profiler.frame();
            let _m = profiler.measure("step");
        }
        assert_eq!(profiler.frame_count(), 1);
        assert!(profiler.summary().contains_key("step"));
        log_metrics_and_fps!(profiler);
    }
}

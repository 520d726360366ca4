//! Count/sum summary for the `prometheus` crate, which only ships histograms.
//!
//! The exposition carries `<name>_sum` and `<name>_count` without quantiles.

use prometheus::core::{Atomic, AtomicF64, AtomicU64, Collector, Desc};
use prometheus::proto::{self, MetricFamily, MetricType};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct DurationSummary {
    core: Arc<SummaryCore>,
}

struct SummaryCore {
    desc: Desc,
    count: AtomicU64,
    sum: AtomicF64,
}

impl DurationSummary {
    pub fn new(name: &str, help: &str) -> prometheus::Result<Self> {
        let desc = Desc::new(name.to_string(), help.to_string(), vec![], HashMap::new())?;
        Ok(Self {
            core: Arc::new(SummaryCore {
                desc,
                count: AtomicU64::new(0),
                sum: AtomicF64::new(0.0),
            }),
        })
    }

    pub fn observe(&self, seconds: f64) {
        self.core.sum.inc_by(seconds);
        self.core.count.inc_by(1);
    }

    /// The returned timer observes the elapsed time once, on drop at the latest.
    pub fn start_timer(&self) -> SummaryTimer {
        SummaryTimer {
            summary: self.clone(),
            start: Instant::now(),
            observed: false,
        }
    }

    pub fn sample_count(&self) -> u64 {
        self.core.count.get()
    }

    pub fn sample_sum(&self) -> f64 {
        self.core.sum.get()
    }
}

impl Collector for DurationSummary {
    fn desc(&self) -> Vec<&Desc> {
        vec![&self.core.desc]
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut summary = proto::Summary::default();
        summary.set_sample_count(self.sample_count());
        summary.set_sample_sum(self.sample_sum());

        let mut metric = proto::Metric::default();
        metric.set_summary(summary);

        let mut family = MetricFamily::default();
        family.set_name(self.core.desc.fq_name.clone());
        family.set_help(self.core.desc.help.clone());
        family.set_field_type(MetricType::SUMMARY);
        family.set_metric(vec![metric].into());
        vec![family]
    }
}

pub struct SummaryTimer {
    summary: DurationSummary,
    start: Instant,
    observed: bool,
}

impl SummaryTimer {
    /// Records the elapsed time and returns it.
    pub fn observe_duration(mut self) -> Duration {
        self.observe()
    }

    fn observe(&mut self) -> Duration {
        let elapsed = self.start.elapsed();
        if !self.observed {
            self.observed = true;
            self.summary.observe(elapsed.as_secs_f64());
        }
        elapsed
    }
}

impl Drop for SummaryTimer {
    fn drop(&mut self) {
        self.observe();
    }
}

//! Run-level statistics derived from the step series.
//!
//! Growth and decay rates come from ordinary least squares of
//! `log2(exposed)` on `day` over the exponential regime.  A fit that cannot be
//! made is not an error: no growth reads as containment
//! (`doubling_days = ∞`) and an unmeasurable decline as `halving_days = None`.

use epi_sim::StepRecord;

/// Growth must peak later than this (days) to be measured.
const MIN_PEAK_DAY: f64 = 3.0;
/// The decline must span at least this many steps to be measured.
const MIN_HALVING_STEPS: usize = 20;
/// The decline fit stops below `peak / DECLINE_FACTOR` ...
const DECLINE_FACTOR: f64 = 5.0;
/// ... but above this many exposed, where counts get noisy.
const DECLINE_FLOOR: f64 = 5.0;

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub population:    usize,
    pub steps_per_day: u32,
    /// Number of step records summarised.
    pub records:       usize,
    /// Day of the last record.
    pub duration:      f64,

    pub peak_infected_time:     f64,
    pub peak_infected:          usize,
    pub peak_fraction_infected: f64,
    pub peak_exposed_time:      f64,
    pub peak_exposed:           usize,

    /// Days for Exposed to double early on.  `f64::INFINITY` means no
    /// exponential growth was found.
    pub doubling_days: f64,
    /// Days for Exposed to halve after the peak, if measurable.
    pub halving_days:  Option<f64>,

    /// Final Recovered share: everyone who was ever infected.
    pub fraction_infected:        f64,
    /// Person-days in quarantine per agent.
    pub fraction_quarantine_time: f64,
    /// Tests performed per agent.
    pub fraction_tests:           f64,
    /// Highest smoothed daily test rate per agent.
    pub peak_test_rate:           f64,
}

impl RunSummary {
    /// Summarise `records`.  Returns `None` for an empty series.
    pub fn from_records(records: &[StepRecord], population: usize, steps_per_day: u32) -> Option<Self> {
        let last = records.last()?;
        let n = population.max(1) as f64;
        let spd = steps_per_day.max(1) as f64;

        let infected_peak = argmax(records.iter().map(|r| r.infected));
        let exposed_peak = argmax(records.iter().map(|r| r.exposed));
        let rates = test_rate(records, steps_per_day);

        let days: Vec<f64> = records.iter().map(|r| r.day).collect();
        let exposed: Vec<f64> = records.iter().map(|r| r.exposed as f64).collect();
        let peak_exposed_time = days[exposed_peak];

        Some(Self {
            population,
            steps_per_day,
            records: records.len(),
            duration: last.day,
            peak_infected_time: days[infected_peak],
            peak_infected: records[infected_peak].infected,
            peak_fraction_infected: records[infected_peak].infected as f64 / n,
            peak_exposed_time,
            peak_exposed: records[exposed_peak].exposed,
            doubling_days: doubling_days(&days, &exposed, peak_exposed_time),
            halving_days: halving_days(&days, &exposed, exposed_peak),
            fraction_infected: last.recovered as f64 / n,
            fraction_quarantine_time: records.iter().map(|r| r.quarantined as f64).sum::<f64>()
                / n
                / spd,
            fraction_tests: rates.iter().sum::<f64>() / spd / n,
            peak_test_rate: rates.iter().copied().fold(0.0, f64::max) / n,
        })
    }

    /// `(name, value)` pairs in output order.  `None` marks an undefined value.
    pub fn fields(&self) -> [(&'static str, Option<f64>); 15] {
        [
            ("population", Some(self.population as f64)),
            ("steps_per_day", Some(self.steps_per_day as f64)),
            ("records", Some(self.records as f64)),
            ("duration", Some(self.duration)),
            ("peak_infected_time", Some(self.peak_infected_time)),
            ("peak_infected", Some(self.peak_infected as f64)),
            ("peak_fraction_infected", Some(self.peak_fraction_infected)),
            ("peak_exposed_time", Some(self.peak_exposed_time)),
            ("peak_exposed", Some(self.peak_exposed as f64)),
            ("doubling_days", Some(self.doubling_days)),
            ("halving_days", self.halving_days),
            ("fraction_infected", Some(self.fraction_infected)),
            ("fraction_quarantine_time", Some(self.fraction_quarantine_time)),
            ("fraction_tests", Some(self.fraction_tests)),
            ("peak_test_rate", Some(self.peak_test_rate)),
        ]
    }
}

/// Tests per step summed over a window of `steps_per_day` steps centred on
/// each step, i.e. a daily test rate.  Same length as `records`.
pub fn test_rate(records: &[StepRecord], steps_per_day: u32) -> Vec<f64> {
    let tests: Vec<f64> = records
        .iter()
        .map(|r| r.tests().tests_performed() as f64)
        .collect();
    let w = steps_per_day.max(1) as usize;
    let half = (w - 1) / 2;
    let n = tests.len();

    (0..n)
        .map(|i| {
            let hi = (i + half).min(n.saturating_sub(1));
            let lo = (i + half).saturating_sub(w - 1);
            tests[lo..=hi].iter().sum()
        })
        .collect()
}

// ── Regression ────────────────────────────────────────────────────────────────

fn doubling_days(days: &[f64], exposed: &[f64], peak_time: f64) -> f64 {
    let peak = exposed.iter().copied().fold(0.0, f64::max);
    // End of the exponential regime: first point above half the peak.
    let end = exposed.iter().position(|&e| e > peak * 0.5).unwrap_or(0);
    if peak_time < MIN_PEAK_DAY || end == 0 {
        return f64::INFINITY;
    }

    // Skip the initial dip: start once Exposed exceeds twice its minimum.
    let (min_idx, min) = exposed[..end]
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::INFINITY), |acc, (i, e)| if e < acc.1 { (i, e) } else { acc });
    let Some(start) = (min_idx..end).find(|&i| exposed[i] > 2.0 * min) else {
        return f64::INFINITY;
    };

    match log2_slope(&days[start..end], &exposed[start..end]) {
        Some(slope) if slope > 0.0 => 1.0 / slope,
        _ => f64::INFINITY,
    }
}

fn halving_days(days: &[f64], exposed: &[f64], peak_idx: usize) -> Option<f64> {
    let peak = exposed[peak_idx];
    let end = (peak_idx..exposed.len())
        .find(|&i| exposed[i] < peak / DECLINE_FACTOR && exposed[i] > DECLINE_FLOOR)?;
    if end - peak_idx < MIN_HALVING_STEPS {
        return None;
    }
    match log2_slope(&days[peak_idx..end], &exposed[peak_idx..end]) {
        Some(slope) if slope < 0.0 => Some(-1.0 / slope),
        _ => None,
    }
}

/// OLS slope of `log2(y)` against `x`.  `None` if the fit is degenerate.
fn log2_slope(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 2 || y.iter().any(|&v| v <= 0.0) {
        return None;
    }
    let ly: Vec<f64> = y.iter().map(|v| v.log2()).collect();
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = ly.iter().sum::<f64>() / n;
    let sxx: f64 = x.iter().map(|&xi| (xi - mx) * (xi - mx)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = x.iter().zip(&ly).map(|(&xi, &yi)| (xi - mx) * (yi - my)).sum();
    Some(sxy / sxx)
}

/// Index of the first maximum.
fn argmax(values: impl Iterator<Item = usize>) -> usize {
    let mut best = (0, 0);
    for (i, v) in values.enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best.0
}

//! `epi-sim` — spread kernel, step engine and run driver.
//!
//! # Step loop
//!
//! ```text
//! loop:
//!   snapshot   — aggregate counts + previous step's testing counters
//!   ① Infection   S → E   spread() from 4 infectious groups, unioned
//!   ② Incubation  E → I   timer < EPSILON
//!   ③ Testing             results, symptomatic, general, tracing
//!   ④ Quarantine          releases, then admissions from ③
//!   ⑤ Recovery    I → R   per-agent Bernoulli
//!   stop when E = I = 0, or warn at max_steps
//! snapshot (final)
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Connection counting in `spread` runs on Rayon.           |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `StepRecord`.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use epi_core::EpiConfig;
//! use epi_sim::{SimBuilder, SnapshotRecorder};
//!
//! let mut sim = SimBuilder::new(EpiConfig::default()).build()?;
//! let mut recorder = SnapshotRecorder::new();
//! let outcome = sim.run(&mut recorder);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod params;
pub mod sim;
pub mod snapshot;
pub mod spread;
pub mod steps;
pub mod testing;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use params::StepParams;
pub use sim::{RunOutcome, Sim, Termination};
pub use snapshot::{SnapshotRecorder, StepRecord};
pub use spread::{connection_counts, spread};
pub use steps::{incubation_step, infection_step, quarantine_step, recovery_step, QuarantineChange};
pub use testing::{testing_step, TestCounters, TestingOutcome};

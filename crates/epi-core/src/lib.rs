//! `epi-core` — foundational types for the contact-network epidemic simulator.
//!
//! This crate is a dependency of every other `epi-*` crate.  It has no
//! `epi-*` dependencies and only a few external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId` (agent index == contact-graph node id)          |
//! | [`time`]    | `Step`, `SimClock`                                        |
//! | [`rng`]     | `SimRng` (seeded run-level RNG)                           |
//! | [`config`]  | `EpiConfig`, `GraphSpec`, `StepRates`, `GammaParams`      |
//! | [`error`]   | `EpiError`, `EpiResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and id types.     |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EpiConfig, GammaParams, GraphSpec, StepRates, EPSILON, SATURATION_THRESHOLD};
pub use error::{EpiError, EpiResult};
pub use ids::AgentId;
pub use rng::SimRng;
pub use time::{SimClock, Step};

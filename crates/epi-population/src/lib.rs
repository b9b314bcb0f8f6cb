//! `epi-population` — Structure-of-Arrays storage for per-agent epidemic state.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`store`]       | `Population` (SoA arrays), `Compartment`, `CompartmentCounts` |
//! | [`builder`]     | `PopulationBuilder` (initial cases, asymptomatic share)  |
//! | [`error`]       | `PopulationError`, `PopulationResult<T>`                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Compartment` and counts. |

pub mod builder;
pub mod error;
pub mod store;


pub use builder::{InitialCases, PopulationBuilder};
pub use error::{PopulationError, PopulationResult};
pub use store::{Compartment, CompartmentCounts, Population, NOT_APPLICABLE};

//! # lotplan-core: Lot-Sizing Problem Data
//!
//! Provides the shared vocabulary for single-item lot-sizing: time slots,
//! validated problem instances, and the parameter sources that generate them.
//!
//! A planning problem covers a horizon of 1-based [`Slot`]s. Each slot has a
//! unit production cost, a fixed setup cost, a unit holding cost, and a
//! demand; the instance also carries the stock on hand before the first
//! slot. [`ProblemInstance`] validates all of this once at construction so
//! model builders can index freely.
//!
//! ## Quick Start
//!
//! ```rust
//! use lotplan_core::{FixedSource, ProblemInstance};
//!
//! // Flat costs and demand over ten slots
//! let mut source = FixedSource::default();
//! let instance = ProblemInstance::from_source(&mut source).unwrap();
//!
//! assert_eq!(instance.horizon().len(), 10);
//! assert_eq!(instance.total_demand(), 2000.0);
//! ```
//!
//! ## Modules
//!
//! - [`slot`] - Slots and horizons
//! - [`instance`] - Validated instance data
//! - [`params`] - Parameter sources (fixed and uniform-random)
//! - [`error`] - Unified error type

pub mod error;
pub mod instance;
pub mod params;
pub mod slot;

pub use error::{LotError, LotResult};
pub use instance::{InstanceData, ProblemInstance};
pub use params::{FixedSource, ParameterSource, UniformSource, HORIZON_LADDER};
pub use slot::{Horizon, Slot};

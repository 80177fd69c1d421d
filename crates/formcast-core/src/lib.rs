//! # formcast-core — Foundational Types for formcast
//!
//! This crate defines the value model every other formcast crate works on.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed value model.** [`Value`] is a finite sum type. Every
//!    conversion rule downstream is an exhaustive `match`, never runtime
//!    type inspection.
//!
//! 2. **Missing is not Null.** Absence of an input key and an explicit null
//!    are separate variants. Option semantics (`required`, `default`) rely
//!    on the distinction.
//!
//! 3. **UTC instants.** Datetimes are normalized to UTC at parse time; the
//!    source offset is kept alongside only when asked for.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `formcast-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod temporal;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{FormcastError, TemporalError};
pub use temporal::{format_date, format_datetime, parse_date, parse_datetime};
pub use value::{Map, Value};

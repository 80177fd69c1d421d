//! # formcast-cli — Command-Line Interface
//!
//! Thin clap front end over `formcast-schema`, for trying schemas against
//! sample payloads and checking schema documents in CI.
//!
//! ## Subcommands
//!
//! - `normalize` — normalize a parameters document against a schema file
//! - `check` — load a schema document and print its field summary
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handlers write results to a caller-supplied writer and return the
//!   process exit code; diagnostics go through `tracing` to stderr.
//! - Handlers hold no normalization logic of their own; they call into
//!   `formcast-schema`.

pub mod check;
pub mod input;
pub mod normalize;

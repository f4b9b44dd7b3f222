//! Core of the venturelink investor platform: the investor application wizard, the
//! builder/investor match scorer, and the client for the platform API they talk to.

pub mod config;
pub mod error;
pub mod remote;
pub mod storage;
pub mod telemetry;
pub mod workflows;

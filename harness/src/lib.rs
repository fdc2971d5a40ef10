//! SNLP harness: problem files, plan rendering, and the `snlp` CLI.
//!
//! The harness reads problems and writes plans. It does NOT plan; search
//! lives in `snlp_search`. Built-in worlds provide problem text only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod problem;
pub mod render;
pub mod runner;
pub mod worlds;

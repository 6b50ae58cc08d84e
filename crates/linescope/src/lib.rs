// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! linescope library
//!
//! This module exports the explorer, its rendering sink contract and the
//! project gallery for use by the `linescope` binary and in integration
//! tests.

pub mod config;
pub mod explorer;
pub mod gallery;
pub mod legend;
pub mod narrative;
pub mod sink;

pub use explorer::{Explorer, Interaction};
pub use sink::{Frame, NdjsonSink, RecordingSink, RenderSink, SinkError};

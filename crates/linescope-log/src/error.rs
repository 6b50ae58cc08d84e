// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for linescope-log

use thiserror::Error;

use crate::loader::SkipReason;

/// Errors that can occur while loading a line log
#[derive(Debug, Error)]
pub enum LogError {
    /// Error from the csv reader (bad quoting, unreadable header, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error reading the log file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A row that strict loading refuses to accept
    #[error("Invalid row {row}: {reason}")]
    InvalidRow {
        /// 1-based data row number (header excluded)
        row: usize,
        /// Why the row was rejected
        reason: SkipReason,
    },
}

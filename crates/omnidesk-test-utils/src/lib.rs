// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Omnidesk integration tests.
//!
//! Provides wire-event builders with sensible defaults and an event capture
//! sink for asserting on gateway dispatches.

pub mod capture;
pub mod events;

pub use capture::CaptureSink;

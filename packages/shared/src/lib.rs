//! Shared utilities for the Idobata chat relay binaries.

pub mod logger;

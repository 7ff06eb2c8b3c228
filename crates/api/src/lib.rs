//! HTTP API: the outbound query surface (approval tiers, stock gate).
//!
//! No authentication here; callers sit behind their own security context.

pub mod app;

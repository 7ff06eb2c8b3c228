//! Domain events emitted by procurement aggregates.

pub mod event;

pub use event::Event;

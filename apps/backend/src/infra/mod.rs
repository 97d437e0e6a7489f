//! Infrastructure layer: wiring of stores, services and transport.

pub mod state;

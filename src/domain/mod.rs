//! Domain layer: the per-request data model and the ports the pipeline
//! depends on. Nothing in here performs IO.

pub mod form;
pub mod outcome;
pub mod passphrase;
pub mod ports;
pub mod submission;

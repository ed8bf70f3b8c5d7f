// Composition root for the tracker import context.
//
// Responsibilities
// - Read config from environment.
// - Instantiate concrete in memory implementations.
// - Wire implementations into use case handlers.

pub mod config;
pub mod state;

//! Command table and dispatch for termfeed.
//!
//! The host describes its commands up front; the dispatcher matches each
//! submitted line against them and records the result in the transcript.

pub mod definitions;
pub mod dispatcher;
pub mod effects;
pub mod output;

pub use definitions::{CommandDefinition, Lookup, Registry, SideEffect, CLEAR_COMMAND};
pub use dispatcher::{default_not_found, DispatchOutcome, Dispatcher, NotFoundHandler, Prompt};
pub use effects::{build_side_effect, EffectSignals};
pub use output::Payload;

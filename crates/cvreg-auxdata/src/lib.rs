//! # cvreg-auxdata — Streaming Auxiliary-Data Hashing
//!
//! Computes, without buffering the encoding, the two digests a signing device
//! needs for a CIP-15 / CIP-36 voter registration:
//!
//! - the **registration payload** digest over `{61284: payload}`, which the
//!   staking key signs;
//! - the **auxiliary data** digest over
//!   `[{61284: payload, 61285: {1: signature}}, []]`, which the transaction
//!   body commits to.
//!
//! ## Modules
//!
//! - **Sink** (`sink.rs`): routes each encoded token into one or both hash
//!   contexts.
//! - **Builder** (`builder.rs`): the state machine; one entry point per field,
//!   strict call order, poisoned on the first violation.
//! - **Registration** (`registration.rs`): a serde model of a whole
//!   registration and the driver that runs it through the builder.

pub mod builder;
pub mod registration;
pub mod sink;

pub use builder::{AuxDataHashBuilder, BuilderState};
pub use registration::{
    hash_registration, Delegation, RegistrationDigests, VoteRegistration, Voting,
};
pub use sink::{DualSink, SinkSet};

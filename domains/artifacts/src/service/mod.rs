//! Pull and push services for the Artifacts domain

pub mod pull;
pub mod push;

pub use pull::{GroupOutcome, GroupStatus, PullReport};
pub use push::{PushOutcome, PushRequest};

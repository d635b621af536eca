//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong to
//! a single entity.
//!
//! - **invitation**: Decoding of the invited-user list sent on chat creation

mod invitation;

pub use invitation::*;

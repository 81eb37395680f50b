//! RPC protocol definitions for the appointment scheduler
//!
//! Request and response bodies exchanged between clients and the scheduler
//! server, plus the error envelope returned on failure.

mod error;
pub mod requests;
pub mod responses;

pub use error::*;

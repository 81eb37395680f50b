//! Core entity definitions for the appointment scheduler.
//!
//! These are passive data records shared by the store, the RPC protocol and
//! the server. They carry no persistence behavior of their own.

mod appointment;
mod span;
mod user;

pub use appointment::*;
pub use span::*;
pub use user::*;

//! Mail transport implementations.

pub mod memory;
pub mod resend;

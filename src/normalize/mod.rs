//! Value normalizers shared by column inference and series building
//!
//! Both normalizers are stateless and never fail loudly: a value that does
//! not fit the supported conventions comes back as `None` so callers can
//! drop it explicitly.
//!
//! - [`number`] - European comma-decimal number parsing
//! - [`date`] - multi-format calendar instant parsing

pub mod date;
pub mod number;

#[cfg(test)]
mod tests;

pub use date::{format_date, parse_date};
pub use number::parse_number;

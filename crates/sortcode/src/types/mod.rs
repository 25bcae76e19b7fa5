//! The value model shared by the value and index codecs.

mod decimal;
mod value;

pub use decimal::Decimal;
pub use value::Value;

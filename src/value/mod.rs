//! Runtime values interpreted against type descriptors.

mod bits;
#[allow(clippy::module_inception)]
mod value;

pub use bits::Bits;
pub use value::Value;

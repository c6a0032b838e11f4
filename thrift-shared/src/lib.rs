pub mod masked;
pub mod money;

pub use masked::Masked;

mod payment;
mod plan;

pub use payment::*;
pub use plan::*;

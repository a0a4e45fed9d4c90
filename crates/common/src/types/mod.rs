mod market;
mod spec;
mod valuation;

pub use market::*;
pub use spec::*;
pub use valuation::*;

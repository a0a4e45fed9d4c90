pub mod intake;
pub mod market;
pub mod records;

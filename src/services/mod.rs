pub mod cars;
pub mod trips;

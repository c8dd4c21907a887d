pub mod car;
pub mod trip;

pub mod client;
pub mod error;

pub use client::{HttpParkingApi, ParkingApi};
pub use error::ApiError;

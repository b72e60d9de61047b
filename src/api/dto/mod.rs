//! Data Transfer Objects for REST response serialization.
//!
//! All decimal quantities are serialized as JSON strings to prevent
//! precision loss.

pub mod farm_dto;

pub use farm_dto::FarmValuationDto;

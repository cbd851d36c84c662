//! Data Transfer Objects for REST request/response serialization.

pub mod admin_dto;
pub mod common_dto;
pub mod contact_dto;

pub use admin_dto::*;
pub use common_dto::*;
pub use contact_dto::*;

pub mod ask;
pub mod error;
pub mod health;
pub mod openapi;

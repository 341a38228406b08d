// catalog/src/models/mod.rs

//! Contains data structures representing database entities and the request
//! payloads that create or modify them.

pub mod product;
pub mod role;
pub mod user;

// Re-export the model structs for convenient access
pub use product::{Product, ProductData};
pub use role::Role;
pub use user::{User, UserModificationData, UserRegistrationData, UserResultData};

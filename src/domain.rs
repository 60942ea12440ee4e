// Domain layer modules
pub mod product;
pub mod product_validator;

// Re-exports
pub use product::Product;
pub use product_validator::{ProductValidator, ValidationError};

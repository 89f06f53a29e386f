pub mod products;

pub use products::{MessageResponse, ProductFields, ProductResponse};

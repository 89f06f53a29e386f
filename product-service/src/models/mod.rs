pub mod product;

pub use product::{parse_product_id, Product};

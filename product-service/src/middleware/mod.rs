pub mod product_body;

pub use product_body::ProductBody;

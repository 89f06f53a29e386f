pub mod database;
pub mod memory;
pub mod seed;
pub mod store;

pub use database::MongoDb;
pub use memory::InMemoryProductStore;
pub use seed::{initialize_products, SeedOutcome};
pub use store::ProductStore;

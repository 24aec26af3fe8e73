pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;

pub use lariat_core::{ReadRepository, Repository};

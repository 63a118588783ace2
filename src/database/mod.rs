pub mod associations;
pub mod manager;
pub mod models;
pub mod repository;
pub mod schema;

pub use associations::{Include, IncludeSet};
pub use manager::{Database, DatabaseError};
pub use repository::{Paranoid, Repository};

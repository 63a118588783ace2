pub mod params;
pub mod response;

pub use params::{parse_id, RestoreQuery, UserReadQuery};
pub use response::{ApiResponse, ApiResult};

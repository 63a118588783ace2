pub mod contact_service;
pub mod customer_service;
pub mod profile_service;
pub mod subject_service;
pub mod test_user_service;
pub mod user_service;

pub use contact_service::ContactService;
pub use customer_service::{CustomerService, LinkOutcome};
pub use profile_service::ProfileService;
pub use subject_service::SubjectService;
pub use test_user_service::TestUserService;
pub use user_service::{Page, UserPage, UserService};

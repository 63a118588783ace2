// handlers/mod.rs - one module per resource
//
// Handlers translate HTTP input into service calls and service results into
// responses. Every persistence failure is converted into an ApiError here;
// nothing escapes to the transport layer.

pub mod contacts;
pub mod customers;
pub mod profiles;
pub mod subjects;
pub mod system;
pub mod users;

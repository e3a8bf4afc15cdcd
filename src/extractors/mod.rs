pub mod bearer;
pub mod json;

pub use bearer::BearerClaims;
pub use json::ApiJson;

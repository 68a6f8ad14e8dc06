pub mod clinic;
pub mod error;

pub use clinic::ClinicApiClient;
pub use error::ApiError;

pub mod errors;
pub mod ports;
pub mod service;

pub use errors::OtpError;
pub use service::generate_code;
pub use service::OtpExchange;

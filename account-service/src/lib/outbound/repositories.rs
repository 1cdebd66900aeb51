pub mod account;
pub mod otp_codes;

pub use account::PostgresAccountRepository;
pub use otp_codes::PostgresCodeStore;

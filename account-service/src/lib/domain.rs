pub mod account;
pub mod errors;
pub mod otp;

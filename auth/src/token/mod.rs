pub mod errors;
pub mod maker;
pub mod payload;

pub use errors::TokenError;
pub use maker::TokenMaker;
pub use payload::TokenPayload;

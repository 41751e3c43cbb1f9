pub mod token;

pub use token::HmacTokenAuthenticator;

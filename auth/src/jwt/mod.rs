pub mod claims;
pub mod errors;
pub mod handler;
pub mod issuer;
pub mod settings;
pub mod verifier;

pub use claims::split_roles;
pub use claims::Claims;
pub use errors::JwtError;
pub use errors::TokenError;
pub use handler::JwtHandler;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use issuer::TokenSubject;
pub use settings::TokenSettings;
pub use verifier::TokenVerifier;

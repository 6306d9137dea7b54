mod cookie;
mod credential;
mod gate;
mod session;
mod token;

pub use credential::hash_password;
pub use session::Authenticator;

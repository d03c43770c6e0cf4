//! Authentication: credentials, access tokens, and the session store every
//! authorized request reads its bearer token from.

mod credentials;
mod password;
mod session;
mod tokens;

pub use credentials::Credentials;
pub use password::{MIN_PASSWORD_LEN, PasswordChange, check_new_password};
pub use session::{MemorySession, SessionProvider, SessionStore};
pub use tokens::AccessToken;

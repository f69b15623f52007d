//! Account routes: signup, email verification, login, profile.

pub mod login;
pub mod me;
pub mod signup;
pub mod verify_email;

pub use login::login;
pub use me::me;
pub use signup::signup;
pub use verify_email::verify_email;

//! Top-level screens

mod home;
mod sign_in;
mod status;

pub use home::Home;
pub use sign_in::{Credentials, SignIn};
pub use status::StatusScreen;

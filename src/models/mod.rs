//! Domain entities owned by the user store.

mod user;

pub use user::User;

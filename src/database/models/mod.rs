pub mod movie;
pub mod user;

pub use movie::{Movie, MovieFields};
pub use user::{NewUser, User};

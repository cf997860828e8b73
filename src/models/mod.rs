mod pagination;
mod user;

pub use pagination::UserPage;
pub use user::User;
pub(crate) use user::deserialize_id;

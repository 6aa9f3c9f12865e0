mod user;

pub use user::{cmd_user_add, cmd_user_list};

pub mod task;
pub mod user;
pub mod config;

pub use task::*;
pub use user::*;
pub use config::*;

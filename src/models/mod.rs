pub mod priority;
pub mod task;
pub mod user;

pub use priority::Priority;
pub use task::Task;
pub use user::User;

pub mod lockers;
pub mod users;

pub use lockers::LockerService;
pub use users::UserService;

pub mod attendance;
pub mod local_time;
pub mod salary;
pub mod sales;

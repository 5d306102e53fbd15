pub mod client;
pub mod expenses;
pub mod habits;
pub mod tasks;

pub use client::ApiClient;
pub use expenses::ExpenseApi;
pub use habits::HabitApi;
pub use tasks::TaskApi;

pub mod health;
pub mod questions;
pub mod test;
pub mod uploads;

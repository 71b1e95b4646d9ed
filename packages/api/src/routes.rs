pub mod gesture;
pub mod health;

pub mod auth;
pub mod catalog;
pub mod reservation;
pub mod warehouse;

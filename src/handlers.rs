pub mod admin;
pub mod catalog;
pub mod companies;
pub mod reservations;

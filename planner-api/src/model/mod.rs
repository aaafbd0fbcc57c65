pub mod catalog;
pub mod center;
pub mod cost;
pub mod error;
pub mod identity;
pub mod option;
pub mod request;

pub mod analytics;
pub mod customer;
pub mod errors;
pub mod input;
pub mod ports;
pub mod pricing;
pub mod product;
pub mod sale;
pub mod user;

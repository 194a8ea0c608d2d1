pub mod agent;
pub mod errors;
pub mod models;
pub mod patterns;
pub mod providers;
pub mod toolkits;

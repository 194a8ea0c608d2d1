pub mod calculator;
pub mod filesystem;
pub mod price;
pub mod toolkit;
pub mod web;

pub use calculator::CalculatorToolkit;
pub use filesystem::FilesystemToolkit;
pub use price::PriceToolkit;
pub use toolkit::Toolkit;
pub use web::WebToolkit;

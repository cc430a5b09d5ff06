pub mod filter_service;
mod property_service;

pub use filter_service::FilterCriteria;
pub use property_service::PropertyService;

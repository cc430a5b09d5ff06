mod property;

pub use property::{Property, PropertyCategory, PropertySpecs};

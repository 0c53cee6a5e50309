pub mod value_objects;

pub use value_objects::Email;

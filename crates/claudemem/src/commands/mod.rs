pub mod hooks;
pub mod tools;
pub mod version;

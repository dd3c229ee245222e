pub mod entry;
pub mod language;
pub mod session;
pub mod store;
pub mod template;

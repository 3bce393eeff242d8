pub mod connection;
pub mod meals;
pub(crate) mod schema;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_utils;

pub use connection::Database;
pub use settings::DEFAULT_TARGET_CALORIES;

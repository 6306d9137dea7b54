mod config;
mod types;

pub(crate) use config::{DEFAULT_DATABASE_URL, connect_data_store};
pub(crate) use types::DataStore;

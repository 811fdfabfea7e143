pub mod completion;
pub mod logging;
pub mod models;
pub mod settings;

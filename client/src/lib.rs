pub mod config;
pub mod index_client;
pub mod models;
pub mod render;
pub mod shell;
pub mod view_model;

pub use config::ClientConfig;
pub use index_client::{IndexApi, IndexClient};
pub use models::*;
pub use render::render;
pub use shell::Shell;
pub use view_model::{Effect, Event, ViewState};

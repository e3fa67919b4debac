pub mod messages;
pub mod network;
pub mod refresher;
pub mod settings;

pub mod directory;
pub mod handle_websocket;
pub mod streaming;
pub mod worker;

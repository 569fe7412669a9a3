mod ask;
mod health;
mod upload;

pub use ask::handle_ask;
pub use health::health_check;
pub use upload::handle_upload;

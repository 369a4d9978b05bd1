pub mod app;
pub mod context;
pub mod speech;
pub mod views;
pub mod vm;

pub use app::App;
pub use context::{AppContext, UiApp, build_app_context};
pub use speech::WebSpeech;

pub mod actions;
pub mod carousel;
pub mod config;
pub mod dialogue;
pub mod font_scale;
pub mod persistence;
pub mod preferences;
pub mod reducer;
pub mod render;
pub mod reply;
pub mod scheduler;
pub mod site;
pub mod state;
pub mod theme;

pub use actions::*;
pub use reducer::*;
pub use state::*;

pub use config::*;
pub use persistence::*;
pub use preferences::*;

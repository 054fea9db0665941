//! Text level format
//!
//! Reads the line-oriented map format into a [`Level`] and spawns its
//! placements into a [`World`](crate::ecs::World):
//!
//! ```text
//! arena
//! model <basename>
//! pos <x> <y> <z>
//! rot <x> <y> <z>
//! scl <x> <y> <z>
//! ```

mod error;
mod loader;
mod options;
mod parser;
mod placement;
mod scene;
mod token;

pub use error::LevelError;
pub use loader::LevelLoader;
pub use options::{DEFAULT_MAX_LINE_LEN, LevelOptions};
pub use parser::{LevelParser, RULES, Rule, Scope, Section, parse_file, parse_str};
pub use placement::{
    LEVEL_FORMAT_VERSION, Level, MODEL_DIR, MODEL_EXTENSION, Placement, model_path,
};
pub use scene::SceneError;
pub use token::Keyword;

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod exercise;
mod history;
mod id;
mod muscle;
mod plan;
mod progression;
mod session;
mod settings;
mod strength;
mod summary;
mod training;
mod translate;
mod volume;

pub use exercise::*;
pub use history::*;
pub use id::*;
pub use muscle::*;
pub use plan::*;
pub use progression::*;
pub use session::*;
pub use settings::*;
pub use strength::*;
pub use summary::*;
pub use training::*;
pub use translate::*;
pub use volume::*;

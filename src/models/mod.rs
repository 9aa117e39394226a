//! Security and Compliance Center API model types.

mod attachment;
mod control_library;
mod profile;
mod scan;
mod settings;

pub use attachment::*;
pub use control_library::*;
pub use profile::*;
pub use scan::*;
pub use settings::*;

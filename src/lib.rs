//! # modtoggle
//!
//! Core library for the PAYDAY 3 overlay mod toggler.
//!
//! The engine superimposes three independently managed source trees
//! (`overrides`, `additions`, `~mods`) onto a game installation with
//! backup-and-restore semantics, and toggles between "mods active" and
//! "mods inactive" by inspecting the installation each run. No state is
//! persisted between invocations.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod error;
pub mod game;
pub mod locate;
pub mod overlay;

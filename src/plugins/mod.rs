mod input;
mod startup;

pub use input::InputPlugin;
pub use startup::StartupPlugin;

// Input and application event handling

pub mod events;
pub mod input;

pub use events::EventHandler;
pub use input::InputHandler;

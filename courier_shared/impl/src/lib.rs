pub mod settings;
pub mod time;
pub mod transient_state;

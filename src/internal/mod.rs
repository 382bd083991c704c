// Internal utilities shared by the codec and protocol layers

pub mod error;

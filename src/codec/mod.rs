// Codec module: bounds-checked field decoding and encoding over byte buffers

pub mod cursor;
pub mod decode;
pub mod encode;
pub mod field;
pub mod types;
pub mod varint;

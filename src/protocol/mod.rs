// Protocol module: records, framing and integrity trailers built on the codec

pub mod checksum;
pub mod digest;
pub mod frame;
pub mod tlv;

// Translation module - inbound path URLs and outbound provider payloads

pub mod path;
pub mod payload;

pub use path::parse_prompt_path;
pub use payload::build_payload;

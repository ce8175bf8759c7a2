pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;

/// Fixed marker used as the genesis block's own hash.
pub const GENESIS_HASH: &str = "2020";
pub const GENESIS_PREVIOUS_HASH: &str = "";
pub const GENESIS_DATA: &str = "First block";

/// Payloads appended by the demo entry point.
pub const DEMO_PAYLOADS: [&str; 2] = ["Hello", "Bye"];

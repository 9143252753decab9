//! Core AES implementation for encryption and decryption of a 16 byte block. Exports encrypt_block and decrypt_block.
//!
//! The state is a `[u8; 16]` holding the 4x4 byte matrix in column-major order, so byte `col * 4 + row`
//! is row `row` of column `col`. Round keys use the same layout.

pub mod constants;
pub mod gf256;
mod util;
mod decryption;
mod encryption;

pub use decryption::decrypt_block;
pub use encryption::encrypt_block;

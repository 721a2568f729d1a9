//! Message hashing
//!
//! A message hash is the keccak256 of the message's canonical JSON encoding,
//! as produced by `cosmwasm_std::to_json_vec`. Source and destination
//! instances hash the same bytes, so they agree on the id of a relayed message.

use cosmwasm_std::{to_json_vec, HexBinary, StdResult};
use tiny_keccak::{Hasher, Keccak};

use common::bridge::Message;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

pub fn message_hash(message: &Message) -> StdResult<HexBinary> {
    Ok(HexBinary::from(keccak256(&to_json_vec(message)?).to_vec()))
}

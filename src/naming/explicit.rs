use uuid::Uuid;

use super::{MemberContext, MemberNameConverter};
use crate::core::types::MemberOrigin;

/// Namespace seed for contract hashes; fixed so output is stable across
/// runs and machines.
const CONTRACT_HASH_NAMESPACE: Uuid = uuid::uuid!("d8dd89f4-0dbe-4e32-84f4-2cb3d34601b1");

/// Base64 alphabet with `+` and `/` replaced by `_` and `$`, which are
/// valid in TypeScript identifiers.
const IDENTIFIER_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_$";

/// Disambiguates members that implement a same-named declaration from more
/// than one contract.
///
/// Flat output has no notion of interface-owned members, so two contracts
/// both declaring `Value` would collide on the implementing type. For
/// contract-origin members this converter strips any qualifier from the
/// running name and appends `_<hash>`, where the hash is a uuid-v5 digest
/// of the declaring contract's fully-qualified name, encoded with
/// [`IDENTIFIER_ALPHABET`] and truncated to 10 characters. That keeps the
/// effective space around 60 bits, enough to treat collisions between two
/// arbitrary contracts as negligible.
pub struct ContractPostfixConverter;

impl MemberNameConverter for ContractPostfixConverter {
    fn convert(&self, name: &str, ctx: &MemberContext<'_>) -> String {
        let MemberOrigin::Contract { contract } = &ctx.member.origin else {
            return name.to_string();
        };

        let stem = name.rsplit_once('.').map(|(_, s)| s).unwrap_or(name);

        let digest = Uuid::new_v5(&CONTRACT_HASH_NAMESPACE, contract.qualifier().as_bytes());
        format!("{}_{}", stem, identifier_hash(digest.as_bytes()))
    }
}

/// First 10 characters of the base64 form of `bytes`, using the
/// identifier-safe alphabet.
fn identifier_hash(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(10);
    for chunk in bytes.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let triple = (b0 << 16) | (b1 << 8) | b2;
        for shift in [18u32, 12, 6, 0] {
            out.push(IDENTIFIER_ALPHABET[((triple >> shift) & 0x3f) as usize] as char);
            if out.len() == 10 {
                return out;
            }
        }
    }
    out
}

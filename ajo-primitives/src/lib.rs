// This file is part of Gear.

// Copyright (C) 2025 Gear Technologies Inc.
// SPDX-License-Identifier: GPL-3.0-or-later WITH Classpath-exception-2.0

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Ajo primitive types.

#![warn(missing_docs)]

pub use units::{MIST_PER_SUI, mist_to_sui, parse_sui, sui_to_mist};

pub mod units;
pub mod utils;

mod macros;

use core::{fmt, str::FromStr};
use derive_more::{AsMut, AsRef, From, Into};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// The error type returned when conversion fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Invalid slice length.
    #[error("Slice should be 32 length")]
    InvalidSliceLength,
    /// Invalid hex string.
    #[error("Invalid hex string")]
    InvalidHexString,
    /// Invalid base58 string.
    #[error("Invalid base58 digest")]
    InvalidBase58,
    /// Invalid decimal SUI amount.
    #[error("Invalid SUI amount")]
    InvalidAmount,
}

/// Account address.
///
/// Derived from the signer's public key, see `ajo_ring::Keypair::address`.
#[derive(Clone, Copy, Default, Hash, Ord, PartialEq, PartialOrd, Eq, From, Into, AsRef, AsMut)]
#[as_ref(forward)]
#[as_mut(forward)]
pub struct Address([u8; 32]);

macros::impl_primitive!(new zero from_str try_from_slice display serde, Address);

/// On-chain object identifier.
///
/// Shares the address space with [`Address`]; the savings group itself, the
/// gas coins and the system clock are all objects.
#[derive(Clone, Copy, Default, Hash, Ord, PartialEq, PartialOrd, Eq, From, Into, AsRef, AsMut)]
#[as_ref(forward)]
#[as_mut(forward)]
pub struct ObjectId([u8; 32]);

macros::impl_primitive!(new zero from_str try_from_slice display serde, ObjectId);

impl ObjectId {
    /// The shared system clock object (`0x6`).
    pub const CLOCK: Self = {
        let mut id = [0; 32];
        id[31] = 6;
        Self(id)
    };
}

impl From<Address> for ObjectId {
    fn from(address: Address) -> Self {
        Self(address.0)
    }
}

impl From<ObjectId> for Address {
    fn from(id: ObjectId) -> Self {
        Self(id.0)
    }
}

/// Transaction or object digest.
///
/// Rendered as base58 in JSON and as a length-prefixed byte vector in BCS.
#[derive(Clone, Copy, Default, Hash, Ord, PartialEq, PartialOrd, Eq, From, Into, AsRef)]
#[as_ref(forward)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Creates a new `Digest` from a 32-byte array.
    pub const fn new(array: [u8; 32]) -> Self {
        Self(array)
    }

    /// Hashes the given data into a digest.
    pub fn of(data: &[u8]) -> Self {
        Self(utils::hash(data))
    }

    /// Returns `Digest` as bytes array.
    pub const fn into_bytes(self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

impl FromStr for Digest {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| ConversionError::InvalidBase58)?;
        Self::try_from(bytes.as_slice())
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = ConversionError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; 32] = slice
            .try_into()
            .map_err(|_| ConversionError::InvalidSliceLength)?;
        Ok(Self(array))
    }
}

impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = <String>::deserialize(deserializer)?;
            s.parse().map_err(de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            Self::try_from(bytes.as_slice()).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_id() -> ObjectId {
        "0x6a519a19ffdfd8f45c310b44aecf156b080c713bf841a8cb695b0ea5f765ed3e"
            .parse()
            .unwrap()
    }

    #[test]
    fn formatting_test() {
        let id = object_id();

        assert_eq!(
            format!("{id}"),
            "0x6a519a19ffdfd8f45c310b44aecf156b080c713bf841a8cb695b0ea5f765ed3e"
        );
        assert_eq!(format!("{id:.4}"), "0x6a519a19..f765ed3e");
        assert_eq!(format!("{id:.0}"), "0x..");
        assert_eq!(
            format!("{id:#}"),
            "ObjectId(0x6a519a19ffdfd8f45c310b44aecf156b080c713bf841a8cb695b0ea5f765ed3e)"
        );
    }

    #[test]
    fn short_hex_is_left_padded() {
        let clock: ObjectId = "0x6".parse().unwrap();
        assert_eq!(clock, ObjectId::CLOCK);

        let address: Address = "0x2".parse().unwrap();
        assert_eq!(address.into_bytes()[31], 2);
        assert!(address.into_bytes()[..31].iter().all(|b| *b == 0));
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert_eq!(
            "0x".parse::<Address>(),
            Err(ConversionError::InvalidHexString)
        );
        assert_eq!(
            "6a519a19ffdfd8f45c310b44aecf156b080c713bf841a8cb695b0ea5f765ed3e".parse::<Address>(),
            Err(ConversionError::InvalidHexString)
        );
        assert_eq!("2".parse::<ObjectId>(), Err(ConversionError::InvalidHexString));
        assert_eq!(
            "0xzz".parse::<Address>(),
            Err(ConversionError::InvalidHexString)
        );
        assert_eq!(
            format!("0x{}", "1".repeat(65)).parse::<Address>(),
            Err(ConversionError::InvalidHexString)
        );
    }

    #[test]
    fn json_and_bcs_forms_differ() {
        let id = object_id();

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        assert_eq!(serde_json::from_str::<ObjectId>(&json).unwrap(), id);

        let bytes = bcs::to_bytes(&id).unwrap();
        assert_eq!(bytes, id.into_bytes());
        assert_eq!(bcs::from_bytes::<ObjectId>(&bytes).unwrap(), id);
    }

    #[test]
    fn digest_is_length_prefixed_in_bcs() {
        let digest = Digest::of(b"ajo");

        let bytes = bcs::to_bytes(&digest).unwrap();
        assert_eq!(bytes[0], 32);
        assert_eq!(bytes[1..], digest.into_bytes());
        assert_eq!(bcs::from_bytes::<Digest>(&bytes).unwrap(), digest);

        let encoded = digest.to_string();
        assert_eq!(encoded.parse::<Digest>().unwrap(), digest);
    }
}

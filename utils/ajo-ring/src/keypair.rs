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

//! ed25519 key pair in the Sui keystore encoding.

use crate::{Error, Result};
use ajo_primitives::{Address, utils};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier as _, VerifyingKey};
use rand::{RngCore, rngs::OsRng};
use std::fmt;
use zeroize::Zeroizing;

/// Signature scheme flag of ed25519 keys.
pub const SCHEME_FLAG_ED25519: u8 = 0x00;

const SEED_LENGTH: usize = 32;
const PUBLIC_LENGTH: usize = 32;
const SIGNATURE_LENGTH: usize = 64;

/// Serialized signature: `flag || signature || public key`.
pub type SignatureBytes = [u8; 1 + SIGNATURE_LENGTH + PUBLIC_LENGTH];

/// ed25519 key pair.
#[derive(Clone)]
pub struct Keypair {
    seed: Zeroizing<[u8; SEED_LENGTH]>,
    public: VerifyingKey,
}

impl Keypair {
    /// Generate a new random key pair.
    pub fn generate() -> Self {
        let mut seed = Zeroizing::new([0u8; SEED_LENGTH]);
        OsRng.fill_bytes(seed.as_mut());
        Self::from_seed(*seed)
    }

    /// Create a key pair from raw 32-byte seed.
    pub fn from_seed(seed: [u8; SEED_LENGTH]) -> Self {
        let public = SigningKey::from_bytes(&seed).verifying_key();
        Self {
            seed: Zeroizing::new(seed),
            public,
        }
    }

    /// Decode `base64(flag || seed)`.
    pub fn from_keystore_string(encoded: &str) -> Result<Self> {
        let raw = Zeroizing::new(
            STANDARD
                .decode(encoded.trim())
                .map_err(|e| Error::InvalidKey(format!("bad base64: {e}")))?,
        );

        let Some((&flag, seed)) = raw.split_first() else {
            return Err(Error::InvalidKey("empty key".into()));
        };

        if flag != SCHEME_FLAG_ED25519 {
            return Err(Error::InvalidKey(format!(
                "unsupported scheme flag {flag:#04x}"
            )));
        }

        let seed: [u8; SEED_LENGTH] = seed.try_into().map_err(|_| {
            Error::InvalidKey(format!(
                "expected {SEED_LENGTH} bytes of seed, got {}",
                seed.len()
            ))
        })?;

        Ok(Self::from_seed(seed))
    }

    /// Encode as `base64(flag || seed)`.
    pub fn to_keystore_string(&self) -> String {
        let mut raw = Zeroizing::new(Vec::with_capacity(1 + SEED_LENGTH));
        raw.push(SCHEME_FLAG_ED25519);
        raw.extend_from_slice(self.seed.as_ref());
        STANDARD.encode(raw.as_slice())
    }

    /// The public key bytes.
    pub fn public(&self) -> [u8; PUBLIC_LENGTH] {
        self.public.to_bytes()
    }

    /// The account address: BLAKE2b-256 of `flag || public key`.
    pub fn address(&self) -> Address {
        address_of(&self.public)
    }

    /// Sign a message with the raw ed25519 scheme.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        SigningKey::from_bytes(&self.seed).sign(message).to_bytes()
    }

    /// Sign a message and serialize the signature with the scheme flag and
    /// the public key attached.
    pub fn sign_serialized(&self, message: &[u8]) -> SignatureBytes {
        let mut out = [0u8; 1 + SIGNATURE_LENGTH + PUBLIC_LENGTH];
        out[0] = SCHEME_FLAG_ED25519;
        out[1..=SIGNATURE_LENGTH].copy_from_slice(&self.sign(message));
        out[1 + SIGNATURE_LENGTH..].copy_from_slice(self.public.as_bytes());
        out
    }

    /// Verify a serialized signature over `message`, returning the address
    /// of the embedded public key.
    pub fn verify_serialized(message: &[u8], serialized: &[u8]) -> Result<Address> {
        let serialized: &SignatureBytes = serialized
            .try_into()
            .map_err(|_| Error::InvalidKey("bad signature length".into()))?;

        if serialized[0] != SCHEME_FLAG_ED25519 {
            return Err(Error::InvalidKey(format!(
                "unsupported scheme flag {:#04x}",
                serialized[0]
            )));
        }

        let mut public = [0u8; PUBLIC_LENGTH];
        public.copy_from_slice(&serialized[1 + SIGNATURE_LENGTH..]);
        let public = VerifyingKey::from_bytes(&public)
            .map_err(|e| Error::InvalidKey(e.to_string()))?;

        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature.copy_from_slice(&serialized[1..=SIGNATURE_LENGTH]);

        public
            .verify(message, &Signature::from_bytes(&signature))
            .map_err(|e| Error::InvalidKey(e.to_string()))?;

        Ok(address_of(&public))
    }
}

fn address_of(public: &VerifyingKey) -> Address {
    Address::new(utils::hash_of_array([
        [SCHEME_FLAG_ED25519].as_slice(),
        public.as_bytes().as_slice(),
    ]))
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
    }
}

impl Eq for Keypair {}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address())
            .field("seed", &"<redacted>")
            .finish()
    }
}

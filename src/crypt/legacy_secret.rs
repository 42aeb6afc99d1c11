//-
// Copyright (c) 2024, Jason Lingle
//
// This file is part of Recast.
//
// Recast is free software: you can  redistribute it and/or modify it under the
// terms of  the GNU General Public  License as published by  the Free Software
// Foundation, either version  3 of the License, or (at  your option) any later
// version.
//
// Recast is distributed  in the hope that  it will be useful,  but WITHOUT ANY
// WARRANTY; without  even the implied  warranty of MERCHANTABILITY  or FITNESS
// FOR  A PARTICULAR  PURPOSE.  See the  GNU General  Public  License for  more
// details.
//
// You should have received a copy of the GNU General Public License along with
// Recast. If not, see <http://www.gnu.org/licenses/>.

//! Decoding of secrets stored in the legacy `$aes$` form.
//!
//! Old releases kept secrets in configuration as
//!
//! `$aes$` KEY `$` HEX(nonce || ciphertext || tag)
//!
//! where KEY is the lowercase hex form of 16 random bytes generated per
//! secret. The 32 ASCII characters of KEY, not the bytes they encode, are the
//! AES-256 key. `nonce` is 12 bytes, and the ciphertext and 16-byte tag are
//! produced by AES-256-GCM with no additional data. The key travels with the
//! ciphertext, so this offers obfuscation only; decoded secrets are therefore
//! returned as `Plain`.

use openssl::symm::{self, Cipher};

use crate::account::secret::Secret;
use crate::compat::secret::SecretDecoder;
use crate::support::error::DecodeError;

const PREFIX: &str = "$aes$";
/// Length of the KEY field, which is also the AES-256 key length.
const KEY_SIZE: usize = 32;
const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;

/// The decoder for `$aes$` secrets.
#[derive(Clone, Copy, Debug, Default)]
pub struct AesCompatDecoder;

impl SecretDecoder for AesCompatDecoder {
    fn decode(&self, encoded: &str) -> Result<Secret, DecodeError> {
        decrypt(encoded).map(Secret::plain)
    }
}

/// Decrypt a `$aes$` string into the cleartext secret.
pub fn decrypt(encoded: &str) -> Result<String, DecodeError> {
    if !encoded.starts_with(PREFIX) {
        return Err(DecodeError::BadFormat);
    }

    let mut parts = encoded[PREFIX.len()..].split('$');
    let (key, sealed) = match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(sealed), None) => (key, sealed),
        _ => return Err(DecodeError::BadFormat),
    };

    if KEY_SIZE != key.len() {
        return Err(DecodeError::BadFormat);
    }
    // Used as text, but always hex
    hex::decode(key)?;

    let sealed = hex::decode(sealed)?;
    if sealed.len() < NONCE_SIZE + TAG_SIZE {
        return Err(DecodeError::BadFormat);
    }

    let (nonce, rest) = sealed.split_at(NONCE_SIZE);
    let (ciphertext, tag) = rest.split_at(rest.len() - TAG_SIZE);
    let cleartext = symm::decrypt_aead(
        Cipher::aes_256_gcm(),
        key.as_bytes(),
        Some(nonce),
        &[],
        ciphertext,
        tag,
    )?;

    String::from_utf8(cleartext).map_err(|_| DecodeError::NotUtf8)
}

/// Produce the `$aes$` form of `cleartext` with a fresh key and nonce.
pub fn encrypt(cleartext: &str) -> Result<String, DecodeError> {
    let mut key_bytes = [0u8; KEY_SIZE / 2];
    let mut nonce = [0u8; NONCE_SIZE];
    openssl::rand::rand_bytes(&mut key_bytes)?;
    openssl::rand::rand_bytes(&mut nonce)?;
    let key = hex::encode(key_bytes);

    let mut tag = [0u8; TAG_SIZE];
    let ciphertext = symm::encrypt_aead(
        Cipher::aes_256_gcm(),
        key.as_bytes(),
        Some(&nonce[..]),
        &[],
        cleartext.as_bytes(),
        &mut tag,
    )?;

    let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len() + TAG_SIZE);
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    sealed.extend_from_slice(&tag);

    Ok(format!("{}{}${}", PREFIX, key, hex::encode(sealed)))
}

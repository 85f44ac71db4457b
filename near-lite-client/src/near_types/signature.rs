use alloc::{format, string::ToString};
use borsh::io::{Error, ErrorKind, Read, Write};
use borsh::{BorshDeserialize, BorshSerialize};
use core::fmt;
use ed25519_dalek::Verifier;

/// 256 bit elliptic curve based public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ED25519PublicKey(pub [u8; ed25519_dalek::PUBLIC_KEY_LENGTH]);

/// Public key container supporting different curves.
///
/// The tag byte preceding the key payload is part of the wire format;
/// only the ed25519 arm is in use on the light client path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    ED25519(ED25519PublicKey),
}

#[derive(Debug, Clone, Copy)]
pub enum KeyType {
    ED25519 = 0,
}

/// Signature container supporting different curves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    ED25519([u8; ed25519_dalek::SIGNATURE_LENGTH]),
}

impl Signature {
    /// Verifies that this signature indeed signs the data with the given
    /// public key. Returns `false` for a key that is not a valid curve
    /// point as well as for a mismatched signature.
    pub fn verify(&self, data: &[u8], public_key: &PublicKey) -> bool {
        match (&self, public_key) {
            (Signature::ED25519(sig_bytes), PublicKey::ED25519(public_key)) => {
                match ed25519_dalek::PublicKey::from_bytes(&public_key.0) {
                    Err(_) => false,
                    Ok(public_key) => {
                        if let Ok(signature) = ed25519_dalek::Signature::from_bytes(sig_bytes) {
                            public_key.verify(data, &signature).is_ok()
                        } else {
                            false
                        }
                    }
                }
            }
        }
    }
}

impl TryFrom<u8> for KeyType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        match value {
            0 => Ok(KeyType::ED25519),
            _unknown_key_type => Err(Error::new(
                ErrorKind::InvalidData,
                format!("unknown key type: {}", value),
            )),
        }
    }
}

impl BorshSerialize for PublicKey {
    fn serialize<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        match self {
            PublicKey::ED25519(public_key) => {
                BorshSerialize::serialize(&(KeyType::ED25519 as u8), writer)?;
                writer.write_all(&public_key.0)?;
            }
        }
        Ok(())
    }
}

impl BorshDeserialize for PublicKey {
    fn deserialize_reader<R: Read>(reader: &mut R) -> Result<Self, Error> {
        let key_type = KeyType::try_from(u8::deserialize_reader(reader)?)
            .map_err(|err| Error::new(ErrorKind::InvalidData, err.to_string()))?;
        match key_type {
            KeyType::ED25519 => Ok(PublicKey::ED25519(ED25519PublicKey(
                BorshDeserialize::deserialize_reader(reader)?,
            ))),
        }
    }
}

impl BorshSerialize for Signature {
    fn serialize<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        match self {
            Signature::ED25519(signature) => {
                BorshSerialize::serialize(&(KeyType::ED25519 as u8), writer)?;
                writer.write_all(signature)?;
            }
        }
        Ok(())
    }
}

impl BorshDeserialize for Signature {
    fn deserialize_reader<R: Read>(reader: &mut R) -> Result<Self, Error> {
        let key_type = KeyType::try_from(u8::deserialize_reader(reader)?)
            .map_err(|err| Error::new(ErrorKind::InvalidData, err.to_string()))?;
        match key_type {
            KeyType::ED25519 => Ok(Signature::ED25519(BorshDeserialize::deserialize_reader(
                reader,
            )?)),
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicKey::ED25519(public_key) => {
                write!(f, "ed25519:{}", bs58::encode(&public_key.0).into_string())
            }
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signature::ED25519(signature) => {
                write!(f, "ed25519:{}", bs58::encode(&signature[..]).into_string())
            }
        }
    }
}

use rand::RngCore;
use rand::rngs::OsRng;
use secp256k1::{All, Secp256k1};
use sha2::{Digest, Sha256};

/// Source of the opaque identifiers the ledger hands out.
///
/// Production uses [`RandomIds`]; tests plug in [`SequentialIds`] so runs are
/// reproducible. Address derivation is a one-way digest shared by both.
pub trait IdGenerator {
    /// 32 random bytes, hex encoded. Used for transaction ids.
    fn next_id(&mut self) -> String;

    /// 64 opaque bytes, hex encoded. Never verified.
    fn next_signature(&mut self) -> String;

    /// A fresh hex-encoded private key.
    fn next_private_key(&mut self) -> String;

    fn next_nonce(&mut self) -> u64;

    /// Same secret, same address. Always.
    fn derive_address(&self, secret: &str) -> String {
        derive_address(secret)
    }
}

/// SHA-256 of the secret, hex encoded.
pub fn derive_address(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// OS-entropy backed generator; private keys are real secp256k1 secrets.
pub struct RandomIds {
    secp: Secp256k1<All>,
}

impl RandomIds {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }

    fn random_hex(len: usize) -> String {
        let mut bytes = vec![0u8; len];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        Self::random_hex(32)
    }

    fn next_signature(&mut self) -> String {
        Self::random_hex(64)
    }

    fn next_private_key(&mut self) -> String {
        let (sk, _pk) = self.secp.generate_keypair(&mut OsRng);
        hex::encode(sk.secret_bytes())
    }

    fn next_nonce(&mut self) -> u64 {
        OsRng.next_u64() % 100_000
    }
}

/// Deterministic generator: every value is a digest of a running counter.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { counter: 0 }
    }

    fn tick(&mut self, label: &str) -> String {
        self.counter += 1;
        derive_address(&format!("{label}-{}", self.counter))
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.tick("id")
    }

    fn next_signature(&mut self) -> String {
        let first = self.tick("sig");
        let second = derive_address(&first);
        format!("{first}{second}")
    }

    fn next_private_key(&mut self) -> String {
        self.tick("key")
    }

    fn next_nonce(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }
}

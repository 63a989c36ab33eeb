use std::fmt;

use zeroize::Zeroizing;

use crate::error::{InstallError, InstallResult};

/// Smallest amount of entropy a generated secret may carry.
pub const MIN_SECRET_BYTES: usize = 16;

/// Source of cryptographically secure random bytes.
pub trait EntropySource {
    /// Fill `buf` entirely with random bytes.
    fn fill(&self, buf: &mut [u8]) -> InstallResult<()>;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> InstallResult<()> {
        getrandom::fill(buf).map_err(|e| InstallError::RandomSource(e.to_string()))
    }
}

/// A hex-encoded random token. The backing memory is wiped on
/// drop and `Debug` never prints the value.
#[derive(Clone)]
pub struct GeneratedSecret(Zeroizing<String>);

impl GeneratedSecret {
    /// Draw `bytes` bytes from `source` (at least
    /// [`MIN_SECRET_BYTES`]) and hex-encode them.
    pub fn generate(source: &dyn EntropySource, bytes: usize) -> InstallResult<Self> {
        let mut raw = Zeroizing::new(vec![0u8; bytes.max(MIN_SECRET_BYTES)]);
        source.fill(&mut raw)?;
        Ok(Self(Zeroizing::new(hex::encode(raw.as_slice()))))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GeneratedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GeneratedSecret(***)")
    }
}

/// The three secrets one installation needs. Each one is drawn
/// separately from the entropy source.
#[derive(Debug, Clone)]
pub struct SecretSet {
    pub db_password: GeneratedSecret,
    pub cache_password: GeneratedSecret,
    pub admin_password: GeneratedSecret,
}

impl SecretSet {
    pub fn generate(source: &dyn EntropySource, bytes: usize) -> InstallResult<Self> {
        Ok(Self {
            db_password: GeneratedSecret::generate(source, bytes)?,
            cache_password: GeneratedSecret::generate(source, bytes)?,
            admin_password: GeneratedSecret::generate(source, bytes)?,
        })
    }
}

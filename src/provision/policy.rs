use crate::secret::MIN_SECRET_BYTES;

/// Knobs on which earlier installer scripts disagreed.
///
/// # Example
///
/// ```
/// use easy_install::ProvisionPolicy;
///
/// let policy = ProvisionPolicy::new()
///     .secret_bytes(32)
///     .include_cache_password(true);
///
/// assert_eq!(policy.secret_bytes, 32);
/// assert!(policy.include_cache_password);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionPolicy {
    /// Bytes of entropy per secret, never below
    /// [`MIN_SECRET_BYTES`].
    pub secret_bytes: usize,
    /// Also record the Redis password in the credential file.
    pub include_cache_password: bool,
}

impl ProvisionPolicy {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            secret_bytes: MIN_SECRET_BYTES,
            include_cache_password: false,
        }
    }

    #[must_use]
    pub fn secret_bytes(mut self, bytes: usize) -> Self {
        self.secret_bytes = bytes.max(MIN_SECRET_BYTES);
        self
    }

    #[must_use]
    pub const fn include_cache_password(mut self, include: bool) -> Self {
        self.include_cache_password = include;
        self
    }
}

impl Default for ProvisionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

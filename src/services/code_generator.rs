use rand::Rng;
use tracing::warn;

use crate::constants::codes;
use crate::db::Store;
use crate::services::card_service::CardError;

/// Produces short shareable card codes, unique within the store at the
/// moment of generation.
pub struct CodeGenerator {
    store: Store,
    length: usize,
    max_attempts: u32,
}

impl CodeGenerator {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self::with_options(store, codes::CODE_LENGTH, codes::MAX_GENERATION_ATTEMPTS)
    }

    #[must_use]
    pub const fn with_options(store: Store, length: usize, max_attempts: u32) -> Self {
        Self {
            store,
            length,
            max_attempts,
        }
    }

    /// Rejection sampling: draw a candidate, probe the store, retry on
    /// collision. The loop is bounded; a saturated code space surfaces as
    /// [`CardError::CodeSpaceExhausted`] instead of spinning forever.
    ///
    /// Two concurrent callers can still pass the probe with the same
    /// candidate; the store's unique code index catches that insert, not
    /// this loop.
    pub async fn generate(&self) -> Result<String, CardError> {
        for _ in 0..self.max_attempts {
            let candidate = random_code(self.length);

            if !self.store.card_code_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        warn!(
            "Code generation exhausted after {} attempts",
            self.max_attempts
        );

        Err(CardError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}

/// Uniform draw of `length` characters from `A-Z0-9`.
fn random_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..codes::ALPHABET.len());
            codes::ALPHABET[idx] as char
        })
        .collect()
}

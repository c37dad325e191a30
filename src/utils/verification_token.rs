//! Verification token generation.

/// Number of random bytes in a verification token.
const TOKEN_BYTES: usize = 24;

/// Generates a fresh verification token.
///
/// Uses `getrandom` for entropy and hex-encodes the result, producing a
/// 48-character lowercase token. Tokens are generated once per domain and
/// never regenerated.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_verification_token() -> String {
    let mut buffer = [0u8; TOKEN_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    hex::encode(buffer)
}

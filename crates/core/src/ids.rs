use std::fmt;

/// Opaque map identifier, as it appears in the map configuration file and
/// the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct MapId(String);

impl MapId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MapId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Office identifier, scoped to a single map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct OfficeId(String);

impl OfficeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for OfficeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dog identifier: a monotonic counter local to the owning session. Unique
/// within a session, not globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct DogId(u64);

impl DogId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bearer auth token: 32 lowercase hex characters, unique across live
/// players. Rendered from two independently drawn `u64`s, giving 128 bits
/// of entropy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Token(String);

impl Token {
    /// Draws a new token from the given RNG. Callers that need global
    /// uniqueness are responsible for retrying on collision against their
    /// own live-player set (collisions are astronomically unlikely but not
    /// impossible).
    pub fn generate(rng: &mut impl rand::RngCore) -> Self {
        let hi: u64 = rng.next_u64();
        let lo: u64 = rng.next_u64();
        Self(format!("{:016x}{:016x}", hi, lo))
    }

    /// True iff `s` has the shape a valid token must have: exactly 32
    /// lowercase hex characters. Does not check liveness.
    pub fn is_well_formed(s: &str) -> bool {
        s.len() == 32 && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Token {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Token::is_well_formed(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn generated_token_is_well_formed() {
        let mut rng = SmallRng::seed_from_u64(7);
        let token = Token::generate(&mut rng);
        assert_eq!(token.as_str().len(), 32);
        assert!(Token::is_well_formed(token.as_str()));
    }

    #[test]
    fn rejects_wrong_length_and_non_hex() {
        assert!(!Token::is_well_formed("short"));
        assert!(!Token::is_well_formed(&"g".repeat(32)));
        assert!(Token::is_well_formed(&"a".repeat(32)));
    }
}

use crate::env::parsed;
use crate::error::ConfigError;

#[derive(Clone, Debug)]
pub struct PasswordConfig {
    pub hash_cost: u32,
}

impl PasswordConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::with_cost(parsed("BCRYPT_COST", 10)?)
    }

    pub fn with_cost(hash_cost: u32) -> Result<Self, ConfigError> {
        if !(4..=31).contains(&hash_cost) {
            return Err(ConfigError::Invalid {
                var: "BCRYPT_COST",
                reason: format!("{hash_cost} is outside 4..=31"),
            });
        }
        Ok(Self { hash_cost })
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { hash_cost: 10 }
    }
}

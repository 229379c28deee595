//! Review list configuration

use serde::Deserialize;

use crate::domain::review::ReviewPolicy;

/// How review lists handle superseded reviews
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewsConfig {
    /// Invalidate a review once its author reviews again
    #[serde(default = "default_invalidate_superseded")]
    pub invalidate_superseded: bool,
}

impl ReviewsConfig {
    /// Build the domain policy from this configuration
    pub fn policy(&self) -> ReviewPolicy {
        ReviewPolicy {
            invalidate_superseded: self.invalidate_superseded,
        }
    }
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            invalidate_superseded: default_invalidate_superseded(),
        }
    }
}

fn default_invalidate_superseded() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_invalidates_superseded() {
        let config = ReviewsConfig::default();
        assert_eq!(config.policy(), ReviewPolicy::default());
    }

    #[test]
    fn test_policy_follows_flag() {
        let config = ReviewsConfig {
            invalidate_superseded: false,
        };
        assert!(!config.policy().invalidate_superseded);
    }
}

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// Whether a player may accuse themselves during voting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfVotePolicy {
    /// Self-accusations are recorded like any other vote
    Allowed,
    /// Self-accusations are rejected as a validation error
    Forbidden,
}

impl FromStr for SelfVotePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allowed" | "allow" | "true" => Ok(Self::Allowed),
            "forbidden" | "forbid" | "false" => Ok(Self::Forbidden),
            other => Err(AppError::config(format!(
                "CHAMELEON_SELF_VOTE must be 'allowed' or 'forbidden', got '{other}'"
            ))),
        }
    }
}

/// Tunable rules of a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Minimum number of players required by start-game
    pub min_players: usize,
    /// Maximum number of players a session accepts
    pub max_players: usize,
    /// How long a voting round stays open before it is force-resolved
    pub voting_duration: Duration,
    /// Delay between end-session and deletion, so clients can read the result
    pub end_session_grace: Duration,
    pub self_vote: SelfVotePolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 4,
            max_players: 8,
            voting_duration: Duration::from_secs(30),
            end_session_grace: Duration::from_secs(5),
            self_vote: SelfVotePolicy::Allowed,
        }
    }
}

impl GameConfig {
    /// Read the game rules from the environment, falling back to defaults.
    ///
    /// - `CHAMELEON_MIN_PLAYERS` (default 4)
    /// - `CHAMELEON_MAX_PLAYERS` (default 8)
    /// - `CHAMELEON_VOTING_SECS` (default 30)
    /// - `CHAMELEON_END_GRACE_SECS` (default 5)
    /// - `CHAMELEON_SELF_VOTE` (`allowed` | `forbidden`, default `allowed`)
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            min_players: parse_var("CHAMELEON_MIN_PLAYERS", defaults.min_players)?,
            max_players: parse_var("CHAMELEON_MAX_PLAYERS", defaults.max_players)?,
            voting_duration: Duration::from_secs(parse_var(
                "CHAMELEON_VOTING_SECS",
                defaults.voting_duration.as_secs(),
            )?),
            end_session_grace: Duration::from_secs(parse_var(
                "CHAMELEON_END_GRACE_SECS",
                defaults.end_session_grace.as_secs(),
            )?),
            self_vote: match env::var("CHAMELEON_SELF_VOTE") {
                Ok(raw) => raw.parse()?,
                Err(_) => defaults.self_vote,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.min_players == 0 {
            return Err(AppError::config("min_players must be at least 1"));
        }
        if self.max_players < self.min_players {
            return Err(AppError::config(format!(
                "max_players ({}) must not be below min_players ({})",
                self.max_players, self.min_players
            )));
        }
        if self.voting_duration.is_zero() {
            return Err(AppError::config("voting duration must be positive"));
        }
        Ok(())
    }

    pub fn with_min_players(mut self, min_players: usize) -> Self {
        self.min_players = min_players;
        self
    }

    pub fn with_max_players(mut self, max_players: usize) -> Self {
        self.max_players = max_players;
        self
    }

    pub fn with_voting_duration(mut self, voting_duration: Duration) -> Self {
        self.voting_duration = voting_duration;
        self
    }

    pub fn with_end_session_grace(mut self, grace: Duration) -> Self {
        self.end_session_grace = grace;
        self
    }

    pub fn with_self_vote(mut self, policy: SelfVotePolicy) -> Self {
        self.self_vote = policy;
        self
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const VARS: &[&str] = &[
        "CHAMELEON_MIN_PLAYERS",
        "CHAMELEON_MAX_PLAYERS",
        "CHAMELEON_VOTING_SECS",
        "CHAMELEON_END_GRACE_SECS",
        "CHAMELEON_SELF_VOTE",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn defaults_when_env_is_empty() {
        clear_env();
        let config = GameConfig::from_env().unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.min_players, 4);
        assert_eq!(config.voting_duration, Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn reads_overrides_from_env() {
        clear_env();
        env::set_var("CHAMELEON_MIN_PLAYERS", "3");
        env::set_var("CHAMELEON_VOTING_SECS", "45");
        env::set_var("CHAMELEON_SELF_VOTE", "forbidden");

        let config = GameConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.min_players, 3);
        assert_eq!(config.voting_duration, Duration::from_secs(45));
        assert_eq!(config.self_vote, SelfVotePolicy::Forbidden);
    }

    #[test]
    #[serial]
    fn rejects_garbage_and_inconsistent_values() {
        clear_env();
        env::set_var("CHAMELEON_MIN_PLAYERS", "four");
        assert!(matches!(
            GameConfig::from_env(),
            Err(AppError::Config { .. })
        ));

        env::set_var("CHAMELEON_MIN_PLAYERS", "6");
        env::set_var("CHAMELEON_MAX_PLAYERS", "5");
        assert!(matches!(
            GameConfig::from_env(),
            Err(AppError::Config { .. })
        ));

        env::set_var("CHAMELEON_MAX_PLAYERS", "8");
        env::set_var("CHAMELEON_SELF_VOTE", "sometimes");
        assert!(GameConfig::from_env().is_err());
        clear_env();
    }
}

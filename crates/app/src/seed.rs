use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use dungeon_core::mapgen::mix_seed_stream;

/// Where the run seed came from. Logged at startup so a run can be repeated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Config(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Config(seed) | Self::Generated(seed) => seed,
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            Self::Cli(_) => "command line",
            Self::Config(_) => "config file",
            Self::Generated(_) => "generated",
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64) ^ ((now_nanos >> 64) as u64) ^ pid.rotate_left(17);
    mix_seed_stream(entropy, counter)
}

/// Command line beats the config file; without either the generated seed is used.
pub fn choose_seed(cli: Option<u64>, config: Option<u64>, generated: u64) -> SeedChoice {
    match (cli, config) {
        (Some(seed), _) => SeedChoice::Cli(seed),
        (None, Some(seed)) => SeedChoice::Config(seed),
        (None, None) => SeedChoice::Generated(generated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_generated_seed_when_nothing_is_configured() {
        assert_eq!(choose_seed(None, None, 9_876_543), SeedChoice::Generated(9_876_543));
    }

    #[test]
    fn command_line_seed_wins_over_config() {
        assert_eq!(choose_seed(Some(4_242), Some(7), 1), SeedChoice::Cli(4_242));
        assert_eq!(choose_seed(None, Some(7), 1), SeedChoice::Config(7));
        assert_eq!(SeedChoice::Config(7).value(), 7);
    }

    #[test]
    fn generated_seed_changes_between_calls() {
        let first = generate_runtime_seed();
        let second = generate_runtime_seed();
        assert_ne!(first, second, "runtime seed generation should vary per call");
    }
}

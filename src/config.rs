//! Engine configuration
//!
//! Recursion over value graphs is bounded by `max_depth`. Rust ownership
//! rules out reference cycles between `Value`s, but a `Record` implementation
//! may synthesize unbounded nesting from `get_field`, and externally supplied
//! documents can be arbitrarily deep.
//!
//! Writes past the end of a sequence grow it with nulls, at most
//! `max_sequence_growth` slots per write.

use std::sync::OnceLock;

/// Environment variable overriding the default depth limit.
pub const MAX_DEPTH_ENV: &str = "ANYSHAPE_MAX_DEPTH";

/// Default maximum nesting depth for traversal, validation and mapping.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Environment variable overriding the default sequence growth limit.
pub const MAX_SEQUENCE_GROWTH_ENV: &str = "ANYSHAPE_MAX_SEQUENCE_GROWTH";

/// Default number of slots a single indexed write may append.
pub const DEFAULT_MAX_SEQUENCE_GROWTH: usize = 10_000;

static GLOBAL: OnceLock<EngineConfig> = OnceLock::new();

/// Configuration shared by path traversal, validation and mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of nested levels visited below a root value.
    pub max_depth: usize,
    /// Maximum number of null slots one indexed write may append.
    pub max_sequence_growth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_sequence_growth: DEFAULT_MAX_SEQUENCE_GROWTH,
        }
    }
}

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
}

impl EngineConfig {
    /// Create config with an explicit depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Replace the sequence growth limit.
    pub fn with_sequence_growth(mut self, max_sequence_growth: usize) -> Self {
        self.max_sequence_growth = max_sequence_growth;
        self
    }

    /// Create config from `ANYSHAPE_MAX_DEPTH` and
    /// `ANYSHAPE_MAX_SEQUENCE_GROWTH`. Unset or unparsable variables keep
    /// their defaults; a depth of zero is ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(depth) = env_usize(MAX_DEPTH_ENV).filter(|depth| *depth > 0) {
            config.max_depth = depth;
        }
        if let Some(growth) = env_usize(MAX_SEQUENCE_GROWTH_ENV) {
            config.max_sequence_growth = growth;
        }
        config
    }

    /// Process-wide configuration, read from the environment once.
    pub fn global() -> EngineConfig {
        *GLOBAL.get_or_init(Self::from_env)
    }

    /// Returns true if `depth` levels may still be descended.
    #[inline]
    pub fn allows(&self, depth: usize) -> bool {
        depth <= self.max_depth
    }

    /// Returns true if writing `index` into a sequence of length `len`
    /// stays within the growth limit and `index + 1` is representable.
    pub fn allows_index(&self, len: usize, index: usize) -> bool {
        if index < len {
            return true;
        }
        index.checked_add(1).is_some() && index - len < self.max_sequence_growth
    }
}

//! Compile configuration.

/// Default number of day slots in an availability mask.
pub const DEFAULT_MASK_LENGTH: usize = 406;

/// Configuration parameters for a feed compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileConfig {
    /// Number of day slots in every availability mask.
    /// Dates beyond the last slot are a fatal error, never truncated.
    pub mask_length: usize,

    /// The `stop_sequence` value that marks the first stop of a trip.
    pub first_stop_sequence: u32,

    /// Prefix of route references in departure and route facts.
    pub route_prefix: String,

    /// Arrival offset written for the first stop of a pattern, where an
    /// arrival offset does not apply.
    pub first_arrival_sentinel: i32,
}

impl CompileConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        mask_length: usize,
        first_stop_sequence: u32,
        route_prefix: impl Into<String>,
        first_arrival_sentinel: i32,
    ) -> Self {
        Self {
            mask_length,
            first_stop_sequence,
            route_prefix: route_prefix.into(),
            first_arrival_sentinel,
        }
    }

    /// Set a custom mask length.
    pub fn with_mask_length(mut self, mask_length: usize) -> Self {
        self.mask_length = mask_length;
        self
    }

    /// Set the sequence number that starts a trip.
    pub fn with_first_stop_sequence(mut self, first_stop_sequence: u32) -> Self {
        self.first_stop_sequence = first_stop_sequence;
        self
    }
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            mask_length: DEFAULT_MASK_LENGTH,
            first_stop_sequence: 0,
            route_prefix: "bus".to_string(),
            first_arrival_sentinel: 999,
        }
    }
}

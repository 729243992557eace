//! Encoder and decoder options.

/// Sorting strategy for the forward Burrows-Wheeler Transform.
///
/// Both strategies produce byte-identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BwtAlgorithm {
    /// Rank-doubling sort of cyclic rotations, O(n log² n).
    #[default]
    PrefixDoubling,
    /// Direct comparator sort of rotations, O(n² log n) worst case.
    /// Fine for small or non-repetitive blocks.
    RotationSort,
}

/// How the decoder treats truncated or inconsistent streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncationPolicy {
    /// Report every malformed or truncated stream as an error. Nothing is
    /// written to the sink when decoding fails.
    #[default]
    Strict,
    /// Decode as much as possible. A bad header or tree writes nothing
    /// and returns success; a short payload is silently truncated.
    Lenient,
}

impl TruncationPolicy {
    /// Whether this is the strict policy.
    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }
}

/// Options for the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    /// Forward BWT sorter.
    pub bwt_algorithm: BwtAlgorithm,
}

impl EncodeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the BWT sorter.
    pub fn with_bwt_algorithm(mut self, algorithm: BwtAlgorithm) -> Self {
        self.bwt_algorithm = algorithm;
        self
    }
}

/// Options for the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Truncation handling.
    pub truncation: TruncationPolicy,
}

impl DecodeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for lenient decoding.
    pub fn lenient() -> Self {
        Self {
            truncation: TruncationPolicy::Lenient,
        }
    }

    /// Select the truncation policy.
    pub fn with_truncation(mut self, policy: TruncationPolicy) -> Self {
        self.truncation = policy;
        self
    }
}

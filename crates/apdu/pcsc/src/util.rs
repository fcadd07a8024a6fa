//! ATR matching for PC/SC readers

/// Match an ATR against a pattern with an optional mask
///
/// If a mask is provided, only the bits set in the mask are compared.
pub fn match_atr(atr: &[u8], pattern: &[u8], mask: Option<&[u8]>) -> bool {
    if pattern.len() > atr.len() {
        return false;
    }

    match mask {
        Some(mask) if mask.len() < pattern.len() => false,
        Some(mask) => atr
            .iter()
            .zip(pattern)
            .zip(mask)
            .all(|((a, p), m)| (a & m) == (p & m)),
        None => atr.starts_with(pattern),
    }
}

/// An ATR a caller is willing to accept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtrPattern {
    /// The card ATR must equal these bytes
    Exact(&'static [u8]),
    /// The card ATR must start with these bytes
    Prefix(&'static [u8]),
}

impl AtrPattern {
    /// Check whether a card ATR is accepted by this pattern
    pub fn matches(&self, atr: &[u8]) -> bool {
        match self {
            Self::Exact(expected) => atr.len() == expected.len() && match_atr(atr, expected, None),
            Self::Prefix(prefix) => match_atr(atr, prefix, None),
        }
    }

    /// Check an ATR against a set of accepted patterns
    pub fn any_matches(patterns: &[Self], atr: &[u8]) -> bool {
        patterns.iter().any(|pattern| pattern.matches(atr))
    }
}

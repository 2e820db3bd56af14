//! Probability → label thresholding.

use urlguard_types::Label;

/// Cut-off used when no threshold is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Labels a probability as malicious when it is strictly above the threshold.
///
/// A probability equal to the threshold is benign. NaN never compares
/// greater, so it is benign too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionRule {
    threshold: f64,
}

impl DecisionRule {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn decide(&self, probability: f64) -> Label {
        if probability > self.threshold {
            Label::Malicious
        } else {
            Label::Benign
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for DecisionRule {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }
}

/// [`DecisionRule::decide`] at [`DEFAULT_THRESHOLD`].
pub fn decide(probability: f64) -> Label {
    DecisionRule::default().decide(probability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_benign() {
        assert_eq!(decide(0.5), Label::Benign);
        assert_eq!(decide(0.5000001), Label::Malicious);
    }

    #[test]
    fn extremes() {
        assert_eq!(decide(0.0), Label::Benign);
        assert_eq!(decide(1.0), Label::Malicious);
    }

    #[test]
    fn nan_is_benign() {
        assert_eq!(decide(f64::NAN), Label::Benign);
    }

    #[test]
    fn custom_threshold_keeps_strict_comparison() {
        let rule = DecisionRule::with_threshold(0.8);
        assert_eq!(rule.decide(0.8), Label::Benign);
        assert_eq!(rule.decide(0.81), Label::Malicious);
        assert_eq!(rule.decide(0.6), Label::Benign);
        assert_eq!(rule.threshold(), 0.8);
    }
}

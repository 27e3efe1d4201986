//! Animation property sets
//!
//! The target of an animation is either an ordered list of transform
//! functions, combined into one transform declaration, or a mapping of
//! style properties to values. The shape decides how many transition-end
//! signals each node owes: one for a combined transform, one per declared
//! property otherwise.

/// What an animation drives toward
#[derive(Debug, Clone, PartialEq)]
pub enum PropertySet {
    /// Ordered transform function strings, joined into one declaration
    Transform(Vec<String>),
    /// Style property/value pairs, each transitioned independently
    Styles(Vec<(String, String)>),
}

impl PropertySet {
    /// Build a transform set from function strings
    pub fn transform<I, S>(functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Transform(functions.into_iter().map(Into::into).collect())
    }

    /// Build a style set from property/value pairs
    pub fn styles<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Styles(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Transition-end signals one node owes for this set.
    ///
    /// Zero means there is nothing to animate and no watcher is armed.
    pub fn expected_signals(&self) -> usize {
        match self {
            PropertySet::Transform(functions) if functions.is_empty() => 0,
            PropertySet::Transform(_) => 1,
            PropertySet::Styles(pairs) => pairs.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_counts_as_one_signal() {
        let set = PropertySet::transform(["scale(2,2)", "translate3d(1px,2px,0)"]);
        assert_eq!(set.expected_signals(), 1);
    }

    #[test]
    fn styles_count_one_signal_per_property() {
        let set = PropertySet::styles([("opacity", "0"), ("width", "0px")]);
        assert_eq!(set.expected_signals(), 2);
    }

    #[test]
    fn empty_sets_expect_nothing() {
        assert_eq!(PropertySet::transform(Vec::<String>::new()).expected_signals(), 0);
        assert_eq!(
            PropertySet::styles(Vec::<(String, String)>::new()).expected_signals(),
            0
        );
    }
}

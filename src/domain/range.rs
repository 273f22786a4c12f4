use std::fmt;

/// How a range's endpoints were chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    Branch,
    Tag,
    FeatureDivergence,
    ExplicitRange,
}

/// Lower end of a range; commits reachable from it are excluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary {
    /// Nothing excluded: the full history of `to`
    Root,
    /// Any branch, tag or revision
    Ref(String),
    /// The merge-base of `to` and the named base branch
    MergeBase(String),
}

/// A commit range in unresolved, symbolic form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    pub mode: RangeMode,
    pub from: Boundary,
    pub to: String,
}

impl Range {
    /// Full history of a branch
    pub fn branch(name: impl Into<String>) -> Self {
        Range {
            mode: RangeMode::Branch,
            from: Boundary::Root,
            to: name.into(),
        }
    }

    /// Commits added by `tag` since `previous` (or its full history)
    pub fn tag(tag: impl Into<String>, previous: Option<String>) -> Self {
        Range {
            mode: RangeMode::Tag,
            from: previous.map_or(Boundary::Root, Boundary::Ref),
            to: tag.into(),
        }
    }

    /// Commits on `feature` since it diverged from `base`
    pub fn feature(feature: impl Into<String>, base: impl Into<String>) -> Self {
        Range {
            mode: RangeMode::FeatureDivergence,
            from: Boundary::MergeBase(base.into()),
            to: feature.into(),
        }
    }

    /// `from..to` exactly as given
    pub fn explicit(from: impl Into<String>, to: impl Into<String>) -> Self {
        Range {
            mode: RangeMode::ExplicitRange,
            from: Boundary::Ref(from.into()),
            to: to.into(),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.from {
            Boundary::Root => write!(f, "{}", self.to),
            Boundary::Ref(from) => write!(f, "{}..{}", from, self.to),
            Boundary::MergeBase(base) => write!(f, "{} since divergence from {}", self.to, base),
        }
    }
}

use crate::CurvePrimitive;

/// Closed chain of curves; consecutive curves share an endpoint and the last connects
/// back to the first.
#[derive(Debug, Clone, Default)]
pub struct Loop {
    pub curves: Vec<CurvePrimitive>,
    pub is_outer: bool,
}

/// One outer loop plus any number of holes.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub loops: Vec<Loop>,
}

#[derive(Debug, Clone, Default)]
pub struct Part {
    pub profiles: Vec<Profile>,
}

impl Loop {
    #[must_use]
    pub fn new(curves: Vec<CurvePrimitive>, is_outer: bool) -> Self {
        Self { curves, is_outer }
    }

    #[must_use]
    pub fn outer(curves: Vec<CurvePrimitive>) -> Self {
        Self::new(curves, true)
    }

    #[must_use]
    pub fn hole(curves: Vec<CurvePrimitive>) -> Self {
        Self::new(curves, false)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

impl Profile {
    #[must_use]
    pub fn new(loops: Vec<Loop>) -> Self {
        Self { loops }
    }

    #[must_use]
    pub fn outer_loop(&self) -> Option<&Loop> {
        self.loops.iter().find(|l| l.is_outer)
    }

    pub fn holes(&self) -> impl Iterator<Item = &Loop> {
        self.loops.iter().filter(|l| !l.is_outer)
    }
}

impl Part {
    #[must_use]
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    /// The profile with the most loops; the first one wins ties.
    #[must_use]
    pub fn canonical_profile(&self) -> Option<&Profile> {
        self.profiles
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| a.loops.len().cmp(&b.loops.len()).then(ib.cmp(ia)))
            .map(|(_, p)| p)
    }
}

impl From<Profile> for Part {
    fn from(profile: Profile) -> Self {
        Part::new(vec![profile])
    }
}

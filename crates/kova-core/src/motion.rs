/// The user's motion preference, read once by the host at startup and passed
/// to every animated component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionPreference {
    #[default]
    Full,
    /// `prefers-reduced-motion: reduce`. Components render their final state
    /// immediately and register no triggers, timers or frame callbacks.
    Reduced,
}

impl MotionPreference {
    pub fn from_reduced_flag(reduced: bool) -> Self {
        if reduced {
            Self::Reduced
        } else {
            Self::Full
        }
    }

    #[inline]
    pub fn is_reduced(self) -> bool {
        self == Self::Reduced
    }
}

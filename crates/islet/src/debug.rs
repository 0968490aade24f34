/// Logging toggles for the tick driver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IsletLogging {
    /// Wrap each update phase (animations, transforms, skins, render) in an INFO span.
    pub update_timings: bool,
}

impl IsletLogging {
    pub(crate) fn span(&self, phase: &'static str) -> Option<tracing::Span> {
        self.update_timings
            .then(|| tracing::info_span!("islet", phase))
    }
}

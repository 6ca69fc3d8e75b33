//! Recognition backend trait and outcome type.

use crate::audio::AudioClip;

/// What a single backend call produced. Transport and service failures that
/// should trigger the next backend map to `Unavailable`; anything unexpected
/// is an `Err` on the call itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
    /// Best hypothesis, raw backend text.
    Hypothesis(String),
    /// The backend ran but heard nothing confident.
    Unintelligible,
    /// The backend is unreachable or not installed.
    Unavailable,
}

/// A speech recognition backend.
#[allow(async_fn_in_trait)]
pub trait SpeechBackend {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn is_available(&self) -> bool;
    async fn recognize(&self, clip: &AudioClip) -> Result<Recognition, String>;
}

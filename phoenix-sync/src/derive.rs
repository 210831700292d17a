//! Values computed from preferences plus live environment queries.

use std::str::FromStr;

use phoenix_core::{ConfigDocument, PreferenceStore};
use phoenix_platform::{DisplayProvider, Platform, ProviderError};

use crate::error::{malformed, SyncError};
use crate::keys;
use crate::settings::PushConfig;

/// Substituted when the display reports a rate outside [`REFRESH_BAND`].
pub const FALLBACK_REFRESH_RATE: f64 = 59.95;

/// Reported display rates inside this band are trusted.
pub const REFRESH_BAND: std::ops::RangeInclusive<f64> = 58.0..=61.0;

// ---------------------------------------------------------------------------
// Preference parsing
// ---------------------------------------------------------------------------

/// Read a string preference and parse it as an integer.
pub fn int_preference(
    prefs: &dyn PreferenceStore,
    key: &str,
    default: &str,
) -> Result<i64, SyncError> {
    let raw = prefs.get_string(key, default);
    raw.parse::<i32>()
        .map(i64::from)
        .map_err(|e| malformed(key, &raw, e))
}

/// Parse a provider's property text as an integer.
fn parse_property(provider: &'static str, raw: &str) -> Result<i64, ProviderError> {
    raw.trim()
        .parse::<i32>()
        .map(i64::from)
        .map_err(|e| ProviderError::Malformed {
            provider,
            value: raw.to_owned(),
            reason: e.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

/// Output sample rate for `audio_out_rate`.
///
/// Low-latency tiers ask the audio service for its output sample rate;
/// older tiers fall back to the native output rate of the music stream.
pub fn optimal_sampling_rate(platform: &Platform<'_>) -> Result<i64, SyncError> {
    let rate = if platform.api_level.supports_low_latency_audio() {
        let raw = platform.audio.output_sample_rate_property()?;
        parse_property("output sample rate", &raw)?
    } else {
        i64::from(platform.audio.native_output_sample_rate()?)
    };
    tracing::info!("using sampling rate: {rate} Hz");
    Ok(rate)
}

/// `audio_latency` and, in the automatic branch, `audio_block_frames`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioLatency {
    pub latency: i64,
    /// `None` leaves `audio_block_frames` untouched in the document.
    pub block_frames: Option<i64>,
}

impl AudioLatency {
    pub fn apply(self, doc: &mut ConfigDocument) {
        doc.set_int(keys::AUDIO_LATENCY, self.latency);
        if let Some(frames) = self.block_frames {
            doc.set_int(keys::AUDIO_BLOCK_FRAMES, frames);
        }
    }
}

/// Pick latency settings.
///
/// Automatic latency (low-latency tier and `audio_latency_auto`) uses the
/// fixed latency and the device buffer size, or zero block frames when the
/// device lacks the low-latency feature. Otherwise the latency preference is
/// used as-is.
pub fn audio_latency(
    platform: &Platform<'_>,
    prefs: &dyn PreferenceStore,
    config: &PushConfig,
) -> Result<AudioLatency, SyncError> {
    if platform.api_level.supports_low_latency_audio()
        && prefs.get_bool(keys::AUDIO_LATENCY_AUTO, true)
    {
        let raw = platform.audio.frames_per_buffer_property()?;
        let buffer_size = parse_property("frames per buffer", &raw)?;
        tracing::info!("queried ideal buffer size (frames): {buffer_size}");

        let low_latency = platform.audio.has_low_latency_audio()?;
        tracing::info!("audio is low latency: {}", if low_latency { "yes" } else { "no" });

        Ok(AudioLatency {
            latency: config.auto_latency,
            block_frames: Some(if low_latency { buffer_size } else { 0 }),
        })
    } else {
        Ok(AudioLatency {
            latency: int_preference(prefs, keys::AUDIO_LATENCY, "64")?,
            block_frames: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Refresh rate
// ---------------------------------------------------------------------------

/// Refresh rate for `video_refresh_rate`.
///
/// A non-empty preference wins when it parses; an empty or unparsable one
/// falls back to [`display_refresh_rate`].
pub fn resolve_refresh_rate(
    prefs: &dyn PreferenceStore,
    display: &dyn DisplayProvider,
) -> Result<f64, SyncError> {
    let raw = prefs.get_string(keys::VIDEO_REFRESH_RATE, "");
    let rate = if raw.is_empty() {
        display_refresh_rate(display)?
    } else {
        match raw.trim().parse::<f64>() {
            Ok(rate) => rate,
            Err(_) => {
                tracing::warn!("cannot parse refresh rate '{raw}'; querying display");
                display_refresh_rate(display)?
            }
        }
    };
    tracing::info!("using refresh rate: {rate} Hz");
    Ok(rate)
}

/// Live display rate, replaced by [`FALLBACK_REFRESH_RATE`] outside
/// [`REFRESH_BAND`].
pub fn display_refresh_rate(display: &dyn DisplayProvider) -> Result<f64, ProviderError> {
    let rate = display.refresh_rate()?;
    if REFRESH_BAND.contains(&rate) {
        Ok(rate)
    } else {
        tracing::debug!("display reported {rate} Hz; using {FALLBACK_REFRESH_RATE}");
        Ok(FALLBACK_REFRESH_RATE)
    }
}

// ---------------------------------------------------------------------------
// Aspect ratio
// ---------------------------------------------------------------------------

/// The `video_aspect_ratio` preference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AspectPolicy {
    /// Stretch to fill.
    Full,
    /// Core-reported aspect.
    Auto,
    /// Square pixels.
    Square,
    /// Explicit ratio.
    Ratio(f64),
}

impl FromStr for AspectPolicy {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "full" => AspectPolicy::Full,
            "auto" => AspectPolicy::Auto,
            "square" => AspectPolicy::Square,
            other => AspectPolicy::Ratio(other.trim().parse()?),
        })
    }
}

impl AspectPolicy {
    pub fn from_prefs(prefs: &dyn PreferenceStore) -> Result<Self, SyncError> {
        let raw = prefs.get_string(keys::VIDEO_ASPECT_RATIO, "auto");
        raw.parse()
            .map_err(|e| malformed(keys::VIDEO_ASPECT_RATIO, &raw, e))
    }

    /// Write the policy. Keys a branch does not name are left as they are.
    pub fn apply(self, doc: &mut ConfigDocument) {
        match self {
            AspectPolicy::Full => {
                doc.set_bool(keys::VIDEO_FORCE_ASPECT, false);
            }
            AspectPolicy::Auto => {
                doc.set_bool(keys::VIDEO_FORCE_ASPECT, true);
                doc.set_bool(keys::VIDEO_FORCE_ASPECT_AUTO, true);
                doc.set_double(keys::VIDEO_ASPECT_RATIO, -1.0);
            }
            AspectPolicy::Square => {
                doc.set_bool(keys::VIDEO_FORCE_ASPECT, true);
                doc.set_bool(keys::VIDEO_FORCE_ASPECT_AUTO, false);
                doc.set_double(keys::VIDEO_ASPECT_RATIO, -1.0);
            }
            AspectPolicy::Ratio(ratio) => {
                doc.set_bool(keys::VIDEO_FORCE_ASPECT, true);
                doc.set_double(keys::VIDEO_ASPECT_RATIO, ratio);
            }
        }
    }
}

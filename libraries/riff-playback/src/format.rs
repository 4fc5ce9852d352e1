//! Time and progress formatting for the transport bar

/// Format seconds as `m:ss`
///
/// Minutes are not padded, seconds always take two digits. Negative and
/// non-finite input renders as `0:00`.
pub fn format_time(secs: f64) -> String {
    let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
    let total = secs.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// `current / total` label shown next to the song
pub fn time_label(current_time: f64, duration: f64) -> String {
    format!("{} / {}", format_time(current_time), format_time(duration))
}

/// Playback progress in percent
///
/// Returns 0.0 while the duration is unknown (zero or non-finite), so a fresh
/// session never yields NaN or infinity. The result is clamped to 0-100.
pub fn progress_percent(current_time: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current_time.is_finite() {
        return 0.0;
    }

    (current_time / duration * 100.0).clamp(0.0, 100.0)
}

use crate::assumptions::VolumeAssumptions;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionVolume {
    pub gross_sessions: f64,
    pub net_sessions: f64,
}

impl SessionVolume {
    /// Inputs are not clamped; out-of-range values flow through arithmetically.
    pub fn from_assumptions(volume: &VolumeAssumptions) -> Self {
        let gross_sessions = volume.hot_daily_sessions * volume.hot_days
            + volume.cold_daily_sessions * volume.cold_days;
        let net_sessions = gross_sessions * (1.0 - volume.no_show_rate);
        Self {
            gross_sessions,
            net_sessions,
        }
    }
}

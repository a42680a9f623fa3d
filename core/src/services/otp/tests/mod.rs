
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use crate::services::otp::{ManualClock, OtpService, OtpServiceConfig};

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// Engine with default policy on a manual clock
pub fn engine() -> (OtpService, Arc<ManualClock>) {
    engine_with(OtpServiceConfig::default())
}

pub fn engine_with(config: OtpServiceConfig) -> (OtpService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = OtpService::with_clock(config, clock.clone()).unwrap();
    (service, clock)
}

// Query-window formatting for the remote listing API.

use chrono::{TimeZone, Utc};
use payledger::modules::transactions::services::ImportWindow;

#[test]
fn test_window_params_use_the_listing_time_format() {
    let window = ImportWindow {
        start: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2020, 2, 15, 13, 45, 9).unwrap(),
    };

    assert_eq!(window.start_param(), "2020-01-01T00:00:00Z");
    assert_eq!(window.end_param(), "2020-02-15T13:45:09Z");
}

#[test]
fn test_window_params_truncate_subsecond_precision() {
    let start = Utc
        .timestamp_opt(1_577_836_800, 987_654_321)
        .single()
        .unwrap();
    let window = ImportWindow { start, end: start };

    assert_eq!(window.start_param(), "2020-01-01T00:00:00Z");
}

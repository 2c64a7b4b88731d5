//! Display lookups for device codes.
//!
//! These tables are for humans only. An unexpected code from newer firmware
//! maps to a fixed "unknown" text instead of failing.

use std::borrow::Cow;

/// Description returned for codes missing from a table.
pub const UNKNOWN_CODE: &str = "unknown";

/// Alarm code table; `FF` means no alarm.
pub static ALARM_CODES: &[(&str, &str)] = &[
    ("FF", "no alarm"),
    ("A1", "end switch"),
    ("A2", "motor current too high"),
    ("A3", "volume leakage"),
    ("A4", "time leakage"),
    ("A5", "maximum flow leakage"),
    ("A6", "micro leakage"),
    ("A7", "external sensor leakage"),
    ("A8", "turbine blocked"),
    ("A9", "pressure sensor error"),
    ("AA", "temperature sensor error"),
    ("AB", "conductivity sensor error"),
    ("AC", "conductivity too high"),
    ("AD", "low battery"),
    ("AE", "volume warning"),
    ("AF", "no power supply"),
];

/// Code reported while no alarm is active.
pub const NO_ALARM: &str = "FF";

/// Valve state table.
pub static VALVE_STATES: &[(&str, &str)] = &[
    ("10", "closed"),
    ("11", "closing"),
    ("20", "open"),
    ("21", "opening"),
    ("30", "undefined"),
];

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> &'static str {
    let code = code.trim();
    table
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, d)| *d)
        .unwrap_or(UNKNOWN_CODE)
}

/// Describe an alarm code.
pub fn alarm_description(code: &str) -> &'static str {
    lookup(ALARM_CODES, code)
}

/// Describe a valve state code.
pub fn valve_description(code: &str) -> &'static str {
    lookup(VALVE_STATES, code)
}

/// Unit suffixes the device appends to some numeric registers.
pub const UNIT_SUFFIXES: &[&str] = &[" mbar", "mL", "Vol[L]"];

/// Remove every known unit suffix from a register value.
pub fn strip_units(value: &str) -> Cow<'_, str> {
    if !UNIT_SUFFIXES.iter().any(|s| value.contains(s)) {
        return Cow::Borrowed(value);
    }
    let mut out = value.to_string();
    for suffix in UNIT_SUFFIXES {
        out = out.replace(suffix, "");
    }
    Cow::Owned(out)
}

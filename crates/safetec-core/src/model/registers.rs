//! Register catalog of the SafeTech device.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::protocol::commands::{canonical, Operation};

/// Mnemonics used by the client.
pub mod mnemonic {
    pub const VALVE: &str = "VLV";
    pub const PRESSURE: &str = "BAR";
    pub const FLOW: &str = "FLO";
    pub const VOLUME: &str = "AVO";
    pub const LAST_VOLUME: &str = "LTV";
    pub const TOTAL_VOLUME: &str = "VOL";
    pub const CONDUCTIVITY: &str = "CND";
    pub const TEMPERATURE: &str = "CEL";
    pub const ALARM: &str = "ALA";
    pub const ALARM_HISTORY: &str = "ALM";
    pub const SERIAL: &str = "SRN";
    pub const FIRMWARE: &str = "VER";
    pub const ACTIVE_PROFILE: &str = "PRF";
    pub const PROFILE_COUNT: &str = "PRN";
    pub const PROFILE_AVAILABLE: &str = "PA";
    pub const ADMIN: &str = "ADM";
    pub const CLOCK: &str = "RTC";
    pub const BATTERY: &str = "BAT";
    pub const SUPPLY: &str = "NET";
    pub const MAINTENANCE: &str = "SRV";
    pub const BUZZER: &str = "BUZ";
    pub const CONDUCTIVITY_LIMIT: &str = "CNL";
    pub const CONDUCTIVITY_FACTOR: &str = "CNF";
    pub const LEAK_WARNING: &str = "LWT";
    pub const LEAK_DISABLE_TIMER: &str = "TMP";
    pub const FLOOR_SENSOR: &str = "BSA";
}

/// Parameter written to [`mnemonic::ADMIN`] to enter admin mode.
pub const ADMIN_ENTER_PARAM: &str = "(1)";

/// Rough shape of a register's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueDomain {
    /// Number, possibly with a unit suffix
    Numeric,
    /// Fixed device code looked up in a table
    Code,
    /// Date or timestamp
    Date,
    /// 0/1 flag
    Flag,
    /// Free text
    Text,
}

/// Static description of one register.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Register {
    pub mnemonic: &'static str,
    pub description: &'static str,
    pub operations: &'static [Operation],
    pub domain: ValueDomain,
    /// Reading requires admin mode
    pub admin: bool,
}

impl Register {
    pub fn supports(&self, op: Operation) -> bool {
        self.operations.contains(&op)
    }
}

const R: &[Operation] = &[Operation::Read];
const RW: &[Operation] = &[Operation::Read, Operation::Write];
const RC: &[Operation] = &[Operation::Read, Operation::Clear];
const WC: &[Operation] = &[Operation::Write, Operation::Clear];

macro_rules! register {
    ($m:expr, $desc:expr, $ops:expr, $domain:ident) => {
        register!($m, $desc, $ops, $domain, false)
    };
    ($m:expr, $desc:expr, $ops:expr, $domain:ident, $admin:expr) => {
        Register {
            mnemonic: $m,
            description: $desc,
            operations: $ops,
            domain: ValueDomain::$domain,
            admin: $admin,
        }
    };
}

/// Fixed, non-indexed registers.
pub static REGISTERS: &[Register] = &[
    register!(mnemonic::VALVE, "Valve state", R, Code),
    register!(mnemonic::PRESSURE, "Water pressure (mbar)", R, Numeric),
    register!(mnemonic::FLOW, "Flow (L/h)", R, Numeric),
    register!(mnemonic::VOLUME, "Current consumption volume (mL)", R, Numeric),
    register!(mnemonic::LAST_VOLUME, "Last consumption volume (L)", R, Numeric),
    register!(mnemonic::TOTAL_VOLUME, "Total volume", R, Numeric, true),
    register!(mnemonic::CONDUCTIVITY, "Conductivity (uS/cm)", R, Numeric),
    register!(mnemonic::TEMPERATURE, "Water temperature (0.1 C)", R, Numeric),
    register!(mnemonic::ALARM, "Ongoing alarm", RC, Code),
    register!(mnemonic::ALARM_HISTORY, "Alarm history", R, Text, true),
    register!(mnemonic::SERIAL, "Serial number", R, Text),
    register!(mnemonic::FIRMWARE, "Firmware version", R, Text),
    register!(mnemonic::ACTIVE_PROFILE, "Active profile", RW, Numeric),
    register!(mnemonic::PROFILE_COUNT, "Number of profiles", R, Numeric),
    register!(mnemonic::ADMIN, "Admin mode", WC, Flag),
    register!(mnemonic::CLOCK, "Real-time clock (epoch seconds)", R, Date, true),
    register!(mnemonic::BATTERY, "Battery voltage", R, Numeric, true),
    register!(mnemonic::SUPPLY, "Supply voltage", R, Numeric, true),
    register!(mnemonic::MAINTENANCE, "Next maintenance date", R, Date, true),
    register!(mnemonic::BUZZER, "Buzzer enabled", RW, Flag, true),
    register!(mnemonic::CONDUCTIVITY_LIMIT, "Conductivity limit", RW, Numeric, true),
    register!(mnemonic::CONDUCTIVITY_FACTOR, "Conductivity factor", RW, Numeric, true),
    register!(mnemonic::LEAK_WARNING, "Leakage warning threshold (%)", RW, Numeric, true),
    register!(mnemonic::LEAK_DISABLE_TIMER, "Leak protection disable timer", RW, Numeric, true),
    register!(mnemonic::FLOOR_SENSOR, "Floor sensor enabled", RW, Flag, true),
];

/// Look up a fixed register by mnemonic (case-insensitive).
pub fn find_register(mnemonic: &str) -> Option<&'static Register> {
    let key = canonical(mnemonic);
    REGISTERS.iter().find(|r| r.mnemonic == key)
}

/// Index of one of the eight stored profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileIndex(u8);

impl ProfileIndex {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn new(index: i64) -> Result<Self, ConfigError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&index) {
            Ok(Self(index as u8))
        } else {
            Err(ConfigError::InvalidProfile(index))
        }
    }

    /// All profile indices in ascending order.
    pub fn all() -> impl Iterator<Item = ProfileIndex> {
        (Self::MIN..=Self::MAX).map(ProfileIndex)
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Mnemonic of the availability flag for this profile (`PA<n>`).
    pub fn availability_mnemonic(&self) -> String {
        format!("{}{}", mnemonic::PROFILE_AVAILABLE, self.0)
    }
}

impl fmt::Display for ProfileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for ProfileIndex {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

/// The eight per-profile attributes, each readable as `<prefix><index>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    VolumeLevel,
    TimeLevel,
    FlowLevel,
    MicroLeak,
    ReturnTime,
    Buzzer,
    LeakWarning,
}

impl ProfileField {
    /// All fields in display order.
    pub const ALL: [ProfileField; 8] = [
        ProfileField::Name,
        ProfileField::VolumeLevel,
        ProfileField::TimeLevel,
        ProfileField::FlowLevel,
        ProfileField::MicroLeak,
        ProfileField::ReturnTime,
        ProfileField::Buzzer,
        ProfileField::LeakWarning,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            ProfileField::Name => "PN",
            ProfileField::VolumeLevel => "PV",
            ProfileField::TimeLevel => "PT",
            ProfileField::FlowLevel => "PF",
            ProfileField::MicroLeak => "PM",
            ProfileField::ReturnTime => "PR",
            ProfileField::Buzzer => "PB",
            ProfileField::LeakWarning => "PW",
        }
    }

    /// Print label.
    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::VolumeLevel => "Volume level (L)",
            ProfileField::TimeLevel => "Time level (min)",
            ProfileField::FlowLevel => "Flow level (L/h)",
            ProfileField::MicroLeak => "Micro leakage detection",
            ProfileField::ReturnTime => "Return time (h)",
            ProfileField::Buzzer => "Buzzer",
            ProfileField::LeakWarning => "Leakage warning",
        }
    }

    pub fn mnemonic(&self, index: ProfileIndex) -> String {
        format!("{}{}", self.prefix(), index)
    }
}

//! TX Power Control
//!
//! Calibration tables mapping dBm values to PA settings, and the
//! controller that steps the transmit power between supported values.
//!
//! Stepping is table driven: the supported set is every table entry
//! inside the configured `[min, max]` window, and one step moves to the
//! adjacent entry. Gaps in the table (11..=13 dBm on the CC1352P-2 high-PA
//! table) are therefore jumped over in a single step.

use crate::config::{DEFAULT_TX_POWER_DBM, TX_POWER_MAX_DBM, TX_POWER_MIN_DBM};
use crate::error::{RadioFault, RadioResult};
use crate::types::{Adjustment, PowerLevel};

/// PA settings for one calibrated power level on the CC13xx/CC26xx 2.4 GHz PA
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaSetting {
    /// Default (internal) power amplifier
    Default {
        /// PA bias current
        bias: u8,
        /// PA gain
        gain: u8,
        /// Supply boost
        boost: bool,
        /// Temperature coefficient
        coefficient: u8,
    },
    /// External high-power amplifier
    HighPa {
        /// PA bias current
        bias: u8,
        /// Bias current boost
        ib_boost: u8,
        /// Supply boost
        boost: bool,
        /// Temperature coefficient
        coefficient: u8,
        /// LDO trim
        ldo_trim: u8,
    },
}

impl PaSetting {
    /// Internal PA entry
    #[must_use]
    pub const fn default_pa(bias: u8, gain: u8, boost: bool, coefficient: u8) -> Self {
        Self::Default {
            bias,
            gain,
            boost,
            coefficient,
        }
    }

    /// High-power PA entry
    #[must_use]
    pub const fn high_pa(bias: u8, ib_boost: u8, boost: bool, coefficient: u8, ldo_trim: u8) -> Self {
        Self::HighPa {
            bias,
            ib_boost,
            boost,
            coefficient,
            ldo_trim,
        }
    }

    /// Check if this entry routes through the high-power amplifier
    #[must_use]
    pub const fn is_high_pa(&self) -> bool {
        matches!(self, Self::HighPa { .. })
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PaSetting {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Default { bias, gain, .. } => defmt::write!(f, "PA(bias={}, gain={})", bias, gain),
            Self::HighPa { bias, ldo_trim, .. } => {
                defmt::write!(f, "HPA(bias={}, ldo={})", bias, ldo_trim);
            }
        }
    }
}

/// One calibration table row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxPowerEntry<E> {
    /// Output power this row produces
    pub power: PowerLevel,
    /// Opaque hardware setting consumed by the radio driver
    pub setting: E,
}

impl<E> TxPowerEntry<E> {
    /// Create a table row
    #[must_use]
    pub const fn new(dbm: i8, setting: E) -> Self {
        Self {
            power: PowerLevel::from_dbm(dbm),
            setting,
        }
    }
}

/// Read-only calibration table, ordered by ascending power
///
/// The slice end plays the role of the terminating sentinel row.
#[derive(Clone, Copy, Debug)]
pub struct CalibrationTable<'a, E> {
    entries: &'a [TxPowerEntry<E>],
}

impl<'a, E: Copy> CalibrationTable<'a, E> {
    /// Wrap a table, rejecting empty or unsorted data
    pub fn new(entries: &'a [TxPowerEntry<E>]) -> RadioResult<Self> {
        let ascending = entries.windows(2).all(|w| w[0].power < w[1].power);
        if entries.is_empty() || !ascending {
            return Err(RadioFault::InvalidCalibration);
        }
        Ok(Self { entries })
    }

    /// Find the hardware setting for an exact power value
    #[must_use]
    pub fn find(&self, level: PowerLevel) -> Option<E> {
        self.entries
            .iter()
            .find(|e| e.power == level)
            .map(|e| e.setting)
    }

    /// Check if a power value has a row
    #[must_use]
    pub fn contains(&self, level: PowerLevel) -> bool {
        self.find(level).is_some()
    }

    /// Smallest calibrated power strictly above `level`
    #[must_use]
    pub fn next_above(&self, level: PowerLevel) -> Option<PowerLevel> {
        self.entries.iter().map(|e| e.power).find(|&p| p > level)
    }

    /// Largest calibrated power strictly below `level`
    #[must_use]
    pub fn next_below(&self, level: PowerLevel) -> Option<PowerLevel> {
        self.entries.iter().rev().map(|e| e.power).find(|&p| p < level)
    }

    /// Iterate over the calibrated power values
    pub fn levels(&self) -> impl Iterator<Item = PowerLevel> + 'a {
        self.entries.iter().map(|e| e.power)
    }

    /// Number of rows
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Inclusive window of power levels the user may select
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerRange {
    /// Lowest selectable level
    pub min: PowerLevel,
    /// Highest selectable level
    pub max: PowerLevel,
}

impl PowerRange {
    /// Create a window from dBm bounds
    #[must_use]
    pub const fn new(min_dbm: i8, max_dbm: i8) -> Self {
        Self {
            min: PowerLevel::from_dbm(min_dbm),
            max: PowerLevel::from_dbm(max_dbm),
        }
    }

    /// Check if a level lies inside the window
    #[must_use]
    pub fn contains(&self, level: PowerLevel) -> bool {
        level >= self.min && level <= self.max
    }
}

impl Default for PowerRange {
    fn default() -> Self {
        Self::new(TX_POWER_MIN_DBM, TX_POWER_MAX_DBM)
    }
}

/// Steps the TX power through the calibrated values of a table
#[derive(Clone, Copy, Debug)]
pub struct PowerLevelController<'a, E> {
    table: CalibrationTable<'a, E>,
    range: PowerRange,
    level: PowerLevel,
}

impl<'a, E: Copy> PowerLevelController<'a, E> {
    /// Create a controller starting at `initial`
    ///
    /// `initial` must be calibrated and inside `range`.
    pub fn new(
        table: CalibrationTable<'a, E>,
        range: PowerRange,
        initial: PowerLevel,
    ) -> RadioResult<Self> {
        if !range.contains(initial) {
            return Err(RadioFault::InvalidCalibration);
        }
        if !table.contains(initial) {
            return Err(RadioFault::PowerNotCalibrated(initial));
        }
        Ok(Self {
            table,
            range,
            level: initial,
        })
    }

    /// Controller over the default 0..=20 dBm window starting at 0 dBm
    pub fn with_defaults(table: CalibrationTable<'a, E>) -> RadioResult<Self> {
        Self::new(
            table,
            PowerRange::default(),
            PowerLevel::from_dbm(DEFAULT_TX_POWER_DBM),
        )
    }

    /// Current power level
    #[must_use]
    pub const fn current_level(&self) -> PowerLevel {
        self.level
    }

    /// Selectable window
    #[must_use]
    pub const fn range(&self) -> PowerRange {
        self.range
    }

    /// Next supported level above the current one, if any
    #[must_use]
    pub fn next_level(&self) -> Option<PowerLevel> {
        self.table
            .next_above(self.level)
            .filter(|&p| p <= self.range.max)
    }

    /// Next supported level below the current one, if any
    #[must_use]
    pub fn previous_level(&self) -> Option<PowerLevel> {
        self.table
            .next_below(self.level)
            .filter(|&p| p >= self.range.min)
    }

    /// Apply one adjustment step, clamping at the window edges
    pub fn adjust(&mut self, adjustment: Adjustment) -> PowerLevel {
        let next = match adjustment {
            Adjustment::Increase => self.next_level(),
            Adjustment::Decrease => self.previous_level(),
            Adjustment::None => None,
        };
        if let Some(level) = next {
            info!("TX power {:?} -> {:?}", self.level, level);
            self.level = level;
        }
        self.level
    }

    /// Hardware setting for a level
    ///
    /// A miss cannot happen for levels produced by this controller and is
    /// reported as a fatal configuration fault.
    pub fn to_hardware_index(&self, level: PowerLevel) -> RadioResult<E> {
        self.table
            .find(level)
            .ok_or(RadioFault::PowerNotCalibrated(level))
    }

    /// Hardware setting for the current level
    pub fn current_setting(&self) -> RadioResult<E> {
        self.to_hardware_index(self.level)
    }
}

/// CC1352P-2, 2.4 GHz, default PA only (-20..=5 dBm)
pub const TX_POWER_TABLE_2400_PA5: &[TxPowerEntry<PaSetting>] = &[
    TxPowerEntry::new(-20, PaSetting::default_pa(6, 3, false, 2)),
    TxPowerEntry::new(-18, PaSetting::default_pa(8, 3, false, 3)),
    TxPowerEntry::new(-15, PaSetting::default_pa(10, 3, false, 3)),
    TxPowerEntry::new(-12, PaSetting::default_pa(12, 3, false, 5)),
    TxPowerEntry::new(-10, PaSetting::default_pa(15, 3, false, 5)),
    TxPowerEntry::new(-9, PaSetting::default_pa(16, 3, false, 5)),
    TxPowerEntry::new(-6, PaSetting::default_pa(20, 3, false, 8)),
    TxPowerEntry::new(-5, PaSetting::default_pa(22, 3, false, 9)),
    TxPowerEntry::new(-3, PaSetting::default_pa(19, 2, false, 12)),
    TxPowerEntry::new(0, PaSetting::default_pa(19, 1, false, 20)),
    TxPowerEntry::new(1, PaSetting::default_pa(22, 1, false, 20)),
    TxPowerEntry::new(2, PaSetting::default_pa(25, 1, false, 25)),
    TxPowerEntry::new(3, PaSetting::default_pa(29, 1, false, 28)),
    TxPowerEntry::new(4, PaSetting::default_pa(35, 1, false, 39)),
    TxPowerEntry::new(5, PaSetting::default_pa(23, 0, false, 57)),
];

/// CC1352P-2, 2.4 GHz, default PA plus 20 dBm high-power PA (-20..=20 dBm)
///
/// 11, 12 and 13 dBm are not calibrated.
pub const TX_POWER_TABLE_2400_PA5_20: &[TxPowerEntry<PaSetting>] = &[
    TxPowerEntry::new(-20, PaSetting::default_pa(6, 3, false, 2)),
    TxPowerEntry::new(-18, PaSetting::default_pa(8, 3, false, 3)),
    TxPowerEntry::new(-15, PaSetting::default_pa(10, 3, false, 3)),
    TxPowerEntry::new(-12, PaSetting::default_pa(12, 3, false, 5)),
    TxPowerEntry::new(-10, PaSetting::default_pa(15, 3, false, 5)),
    TxPowerEntry::new(-9, PaSetting::default_pa(16, 3, false, 5)),
    TxPowerEntry::new(-6, PaSetting::default_pa(20, 3, false, 8)),
    TxPowerEntry::new(-5, PaSetting::default_pa(22, 3, false, 9)),
    TxPowerEntry::new(-3, PaSetting::default_pa(19, 2, false, 12)),
    TxPowerEntry::new(0, PaSetting::default_pa(19, 1, false, 20)),
    TxPowerEntry::new(1, PaSetting::default_pa(22, 1, false, 20)),
    TxPowerEntry::new(2, PaSetting::default_pa(25, 1, false, 25)),
    TxPowerEntry::new(3, PaSetting::default_pa(29, 1, false, 28)),
    TxPowerEntry::new(4, PaSetting::default_pa(35, 1, false, 39)),
    TxPowerEntry::new(5, PaSetting::default_pa(23, 0, false, 57)),
    TxPowerEntry::new(6, PaSetting::high_pa(42, 0, true, 39, 20)),
    TxPowerEntry::new(7, PaSetting::high_pa(31, 1, false, 20, 20)),
    TxPowerEntry::new(8, PaSetting::high_pa(26, 1, true, 25, 16)),
    TxPowerEntry::new(9, PaSetting::high_pa(31, 1, true, 31, 16)),
    TxPowerEntry::new(10, PaSetting::high_pa(38, 1, true, 39, 16)),
    TxPowerEntry::new(14, PaSetting::high_pa(22, 3, true, 19, 27)),
    TxPowerEntry::new(15, PaSetting::high_pa(26, 3, true, 23, 27)),
    TxPowerEntry::new(16, PaSetting::high_pa(30, 3, true, 28, 27)),
    TxPowerEntry::new(17, PaSetting::high_pa(37, 3, true, 39, 27)),
    TxPowerEntry::new(18, PaSetting::high_pa(32, 3, true, 35, 48)),
    TxPowerEntry::new(19, PaSetting::high_pa(34, 3, true, 48, 63)),
    TxPowerEntry::new(20, PaSetting::high_pa(53, 3, true, 58, 63)),
];

/// nRF52840 RADIO.TXPOWER values (-40..=8 dBm); the setting is the dBm value itself
pub const TX_POWER_TABLE_NRF52840: &[TxPowerEntry<i8>] = &[
    TxPowerEntry::new(-40, -40),
    TxPowerEntry::new(-20, -20),
    TxPowerEntry::new(-16, -16),
    TxPowerEntry::new(-12, -12),
    TxPowerEntry::new(-8, -8),
    TxPowerEntry::new(-4, -4),
    TxPowerEntry::new(0, 0),
    TxPowerEntry::new(2, 2),
    TxPowerEntry::new(3, 3),
    TxPowerEntry::new(4, 4),
    TxPowerEntry::new(5, 5),
    TxPowerEntry::new(6, 6),
    TxPowerEntry::new(7, 7),
    TxPowerEntry::new(8, 8),
];

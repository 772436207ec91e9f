//! Register definitions and bitfield structures for the DS1307 RTC.
//!
//! The DS1307 exposes eight timekeeping registers at 0x00-0x07 followed by
//! 56 bytes of battery-backed SRAM. This module defines the register
//! addresses and a typed wrapper for each timekeeping register. The BCD
//! digits of every wrapper are read and written through [`crate::bcd`].

use bitfield::bitfield;

use crate::bcd;

/// Register addresses for the DS1307 RTC.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegAddr {
    /// Seconds register (0-59), bit 7 is the clock-halt flag
    Seconds = 0x00,
    /// Minutes register (0-59)
    Minutes = 0x01,
    /// Hours register (1-12 + AM/PM or 0-23)
    Hours = 0x02,
    /// Day of week register (1-7)
    Day = 0x03,
    /// Date register (1-31)
    Date = 0x04,
    /// Month register (1-12)
    Month = 0x05,
    /// Year register (0-99)
    Year = 0x06,
    /// Control register (square wave / OUT pin)
    Control = 0x07,
}

/// Time representation format for the hours register.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeRepresentation {
    /// 24-hour format (0-23)
    TwentyFourHour = 0,
    /// 12-hour format (1-12 + AM/PM)
    TwelveHour = 1,
}
impl From<u8> for TimeRepresentation {
    /// Creates a `TimeRepresentation` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => TimeRepresentation::TwentyFourHour,
            1 => TimeRepresentation::TwelveHour,
            _ => panic!("Invalid value for TimeRepresentation: {}", v),
        }
    }
}
impl From<TimeRepresentation> for u8 {
    fn from(v: TimeRepresentation) -> Self {
        v as u8
    }
}

/// Square wave output frequency (RS1/RS0 bits of the control register).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SquareWaveFrequency {
    /// 1 Hz square wave output
    Hz1 = 0b00,
    /// 4.096 kHz square wave output
    Hz4096 = 0b01,
    /// 8.192 kHz square wave output
    Hz8192 = 0b10,
    /// 32.768 kHz square wave output
    Hz32768 = 0b11,
}
impl From<u8> for SquareWaveFrequency {
    /// Creates a `SquareWaveFrequency` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0b00, 0b01, 0b10, or 0b11.
    fn from(v: u8) -> Self {
        match v {
            0b00 => SquareWaveFrequency::Hz1,
            0b01 => SquareWaveFrequency::Hz4096,
            0b10 => SquareWaveFrequency::Hz8192,
            0b11 => SquareWaveFrequency::Hz32768,
            _ => panic!("Invalid value for SquareWaveFrequency: {}", v),
        }
    }
}
impl From<SquareWaveFrequency> for u8 {
    fn from(v: SquareWaveFrequency) -> Self {
        v as u8
    }
}

/// Level driven on the SQW/OUT pin while the square wave is disabled.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputLevel {
    /// Pin is driven low
    Low = 0,
    /// Pin is released high
    High = 1,
}
impl From<u8> for OutputLevel {
    /// Creates an `OutputLevel` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => OutputLevel::Low,
            1 => OutputLevel::High,
            _ => panic!("Invalid value for OutputLevel: {}", v),
        }
    }
}
impl From<OutputLevel> for u8 {
    fn from(v: OutputLevel) -> Self {
        v as u8
    }
}

// This macro generates the From<u8> and Into<u8> implementations for the
// register type
macro_rules! from_register_u8 {
    ($typ:ty) => {
        impl From<u8> for $typ {
            fn from(v: u8) -> Self {
                paste::paste!([< $typ >](v))
            }
        }
        impl From<$typ> for u8 {
            fn from(v: $typ) -> Self {
                v.0
            }
        }
    };
}

bitfield! {
    /// Seconds register (0-59) with the clock-halt flag.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Seconds(u8);
    impl Debug;
    /// Clock halt (CH). While set the oscillator is stopped.
    pub clock_halt, set_clock_halt: 7;
    /// BCD seconds digits
    pub seconds_bcd, set_seconds_bcd: 6, 0;
}
from_register_u8!(Seconds);

impl Seconds {
    /// Decoded seconds, not range checked.
    pub fn seconds(&self) -> u8 {
        bcd::decode(self.seconds_bcd())
    }

    /// Stores `value` (0-59) as BCD, leaving the clock-halt flag untouched.
    pub fn set_seconds(&mut self, value: u8) {
        self.set_seconds_bcd(bcd::encode(value));
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Seconds {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Seconds({}s", self.seconds());
        if self.clock_halt() {
            defmt::write!(f, ", halted");
        }
        defmt::write!(f, ")");
    }
}

bitfield! {
    /// Minutes register (0-59) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Minutes(u8);
    impl Debug;
    pub minutes_bcd, set_minutes_bcd: 6, 0;
}
from_register_u8!(Minutes);

impl Minutes {
    pub fn minutes(&self) -> u8 {
        bcd::decode(self.minutes_bcd())
    }

    pub fn set_minutes(&mut self, value: u8) {
        self.set_minutes_bcd(bcd::encode(value));
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Minutes {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Minutes({}m)", self.minutes());
    }
}

bitfield! {
    /// Hours register with format selection and BCD encoding.
    ///
    /// In 24-hour mode bits 5-0 hold the hour. In 12-hour mode bit 5 is the
    /// PM flag and bits 4-0 hold the hour (1-12).
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Hours(u8);
    impl Debug;
    /// Time representation format (12/24 hour)
    pub from into TimeRepresentation, time_representation, set_time_representation: 6, 6;
    /// BCD hour digits in 24-hour mode
    pub hours24_bcd, set_hours24_bcd: 5, 0;
    /// PM flag in 12-hour mode
    pub pm, set_pm: 5;
    /// BCD hour digits in 12-hour mode
    pub hours12_bcd, set_hours12_bcd: 4, 0;
}
from_register_u8!(Hours);

impl Hours {
    /// Builds a 24-hour register value for `hour` (0-23).
    pub fn twenty_four_hour(hour: u8) -> Self {
        let mut value = Hours::default();
        value.set_time_representation(TimeRepresentation::TwentyFourHour);
        value.set_hours24_bcd(bcd::encode(hour));
        value
    }

    /// Builds a 12-hour register value from a 24-hour `hour` (0-23).
    pub fn twelve_hour(hour: u8) -> Self {
        let (hour12, is_pm) = match hour {
            0 => (12, false),
            1..=11 => (hour, false),
            12 => (12, true),
            _ => (hour - 12, true),
        };
        let mut value = Hours::default();
        value.set_time_representation(TimeRepresentation::TwelveHour);
        value.set_hours12_bcd(bcd::encode(hour12));
        value.set_pm(is_pm);
        value
    }

    /// Builds a register value for `hour` (0-23) in the given representation.
    pub fn from_hour(hour: u8, time_representation: TimeRepresentation) -> Self {
        match time_representation {
            TimeRepresentation::TwentyFourHour => Self::twenty_four_hour(hour),
            TimeRepresentation::TwelveHour => Self::twelve_hour(hour),
        }
    }

    /// Returns the hour as 0-23, or `None` if the register holds a value that
    /// is not a valid hour for its representation or has bit 7 set.
    pub fn hour(&self) -> Option<u8> {
        if self.0 & 0x80 != 0 {
            return None;
        }
        match self.time_representation() {
            TimeRepresentation::TwentyFourHour => bcd::decode_checked(self.hours24_bcd(), 0, 23),
            TimeRepresentation::TwelveHour => {
                let hour12 = bcd::decode_checked(self.hours12_bcd(), 1, 12)?;
                Some(match (hour12, self.pm()) {
                    (12, false) => 0,
                    (12, true) => 12,
                    (h, false) => h,
                    (h, true) => h + 12,
                })
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Hours {
    fn format(&self, f: defmt::Formatter) {
        match self.time_representation() {
            TimeRepresentation::TwentyFourHour => {
                defmt::write!(f, "Hours({}h 24h)", bcd::decode(self.hours24_bcd()));
            }
            TimeRepresentation::TwelveHour => {
                let hours = bcd::decode(self.hours12_bcd());
                defmt::write!(f, "Hours({}h {})", hours, if self.pm() { "PM" } else { "AM" });
            }
        }
    }
}

bitfield! {
    /// Day of week register (1-7). The mapping to weekdays is up to the user.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Day(u8);
    impl Debug;
    pub day, set_day: 2, 0;
}
from_register_u8!(Day);

#[cfg(feature = "defmt")]
impl defmt::Format for Day {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Day({})", self.day());
    }
}

bitfield! {
    /// Date register (1-31) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Date(u8);
    impl Debug;
    pub date_bcd, set_date_bcd: 5, 0;
}
from_register_u8!(Date);

impl Date {
    pub fn date(&self) -> u8 {
        bcd::decode(self.date_bcd())
    }

    pub fn set_date(&mut self, value: u8) {
        self.set_date_bcd(bcd::encode(value));
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Date {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Date({})", self.date());
    }
}

bitfield! {
    /// Month register (1-12) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Month(u8);
    impl Debug;
    pub month_bcd, set_month_bcd: 4, 0;
}
from_register_u8!(Month);

impl Month {
    pub fn month(&self) -> u8 {
        bcd::decode(self.month_bcd())
    }

    pub fn set_month(&mut self, value: u8) {
        self.set_month_bcd(bcd::encode(value));
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Month {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Month({})", self.month());
    }
}

bitfield! {
    /// Year register (0-99, offset from 2000) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Year(u8);
    impl Debug;
    pub year_bcd, set_year_bcd: 7, 0;
}
from_register_u8!(Year);

impl Year {
    pub fn year(&self) -> u8 {
        bcd::decode(self.year_bcd())
    }

    pub fn set_year(&mut self, value: u8) {
        self.set_year_bcd(bcd::encode(value));
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Year {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Year({})", 2000 + u16::from(self.year()));
    }
}

bitfield! {
    /// Control register for the SQW/OUT pin.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Control(u8);
    impl Debug;
    /// Output level while the square wave is disabled
    pub from into OutputLevel, output_level, set_output_level: 7, 7;
    /// Enable square wave output
    pub square_wave_enable, set_square_wave_enable: 4;
    /// Square wave output frequency selection
    pub from into SquareWaveFrequency, square_wave_frequency, set_square_wave_frequency: 1, 0;
}
from_register_u8!(Control);

#[cfg(feature = "defmt")]
impl defmt::Format for Control {
    fn format(&self, f: defmt::Formatter) {
        if self.square_wave_enable() {
            match self.square_wave_frequency() {
                SquareWaveFrequency::Hz1 => defmt::write!(f, "1 Hz square wave"),
                SquareWaveFrequency::Hz4096 => defmt::write!(f, "4096 Hz square wave"),
                SquareWaveFrequency::Hz8192 => defmt::write!(f, "8192 Hz square wave"),
                SquareWaveFrequency::Hz32768 => defmt::write!(f, "32768 Hz square wave"),
            }
        } else {
            match self.output_level() {
                OutputLevel::Low => defmt::write!(f, "OUT low"),
                OutputLevel::High => defmt::write!(f, "OUT high"),
            }
        }
    }
}

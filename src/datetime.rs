//! Date/time conversion for the DS1307 RTC.
//!
//! The DS1307 keeps the current instant in 7 consecutive BCD registers
//! (seconds, minutes, hours, day, date, month, year). This module converts
//! between those registers and [`Timestamp`], the plain calendar value the
//! driver hands to and receives from callers, and between [`Timestamp`] and
//! chrono's `NaiveDateTime`.
//!
//! # Error Handling
//!
//! Values supplied by the caller are checked before anything is encoded and
//! rejected with [`DS1307DateTimeError`]. Values decoded from the chip are
//! checked after the read and rejected with [`CorruptData`].

use core::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::{bcd, Date, Day, Hours, Minutes, Month, RegAddr, Seconds, TimeRepresentation, Year};

/// A calendar instant as stored by the DS1307.
///
/// Fields are plain integers so that any value a caller might construct can
/// be represented and then rejected by [`Timestamp::validate`]. The weekday
/// is stored as-is; the chip only increments it at midnight and the meaning
/// of 1-7 is up to the application.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    /// Year, 2000-2099
    pub year: u16,
    /// Month, 1-12
    pub month: u8,
    /// Day of month, 1-31 (bounded by the month's length)
    pub day: u8,
    /// Hour, 0-23
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
    /// Second, 0-59
    pub second: u8,
    /// Day of week, 1-7
    pub weekday: u8,
}

impl Timestamp {
    /// Builds a timestamp without checking any field.
    pub const fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        weekday: u8,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            weekday,
        }
    }

    /// Checks every field against the range the DS1307 can store.
    pub fn validate(&self) -> Result<(), DS1307DateTimeError> {
        check_date(self.year, self.month, self.day)?;
        check_time(self.hour, self.minute, self.second)?;
        check_weekday(self.weekday)
    }

    /// Builds a timestamp from a chrono datetime, numbering weekdays from
    /// Sunday = 1.
    pub fn from_datetime(datetime: &NaiveDateTime) -> Result<Self, DS1307DateTimeError> {
        let year = u16::try_from(datetime.year()).map_err(|_| {
            if datetime.year() < 2000 {
                DS1307DateTimeError::YearNotAfter1999
            } else {
                DS1307DateTimeError::YearNotBefore2100
            }
        })?;
        // chrono guarantees the remaining fields fit in a u8
        let timestamp = Self {
            year,
            month: datetime.month() as u8,
            day: datetime.day() as u8,
            hour: datetime.hour() as u8,
            minute: datetime.minute() as u8,
            second: datetime.second() as u8,
            weekday: datetime.weekday().number_from_sunday() as u8,
        };
        timestamp.validate()?;
        Ok(timestamp)
    }

    /// Converts to a chrono datetime. The weekday field is not consulted.
    pub fn to_datetime(&self) -> Result<NaiveDateTime, DS1307DateTimeError> {
        check_year(self.year)?;
        check_time(self.hour, self.minute, self.second)?;
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
        .ok_or(if (1..=12).contains(&self.month) {
            DS1307DateTimeError::InvalidDay
        } else {
            DS1307DateTimeError::InvalidMonth
        })?
        .and_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
        )
        .ok_or(DS1307DateTimeError::InvalidHour)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

fn check_year(year: u16) -> Result<(), DS1307DateTimeError> {
    if year < 2000 {
        error!("Year {} is too early! must be greater than 1999", year);
        return Err(DS1307DateTimeError::YearNotAfter1999);
    }
    if year > 2099 {
        error!("Year {} is too late! must be before 2100", year);
        return Err(DS1307DateTimeError::YearNotBefore2100);
    }
    Ok(())
}

pub(crate) fn check_date(year: u16, month: u8, day: u8) -> Result<(), DS1307DateTimeError> {
    check_year(year)?;
    if !(1..=12).contains(&month) {
        return Err(DS1307DateTimeError::InvalidMonth);
    }
    NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
        .map(|_| ())
        .ok_or(DS1307DateTimeError::InvalidDay)
}

pub(crate) fn check_time(hour: u8, minute: u8, second: u8) -> Result<(), DS1307DateTimeError> {
    if hour > 23 {
        return Err(DS1307DateTimeError::InvalidHour);
    }
    if minute > 59 {
        return Err(DS1307DateTimeError::InvalidMinute);
    }
    if second > 59 {
        return Err(DS1307DateTimeError::InvalidSecond);
    }
    Ok(())
}

fn check_weekday(weekday: u8) -> Result<(), DS1307DateTimeError> {
    if !(1..=7).contains(&weekday) {
        return Err(DS1307DateTimeError::InvalidWeekday);
    }
    Ok(())
}

/// Internal representation of the DS1307 date and time registers.
///
/// Models registers 0x00-0x06 with the typed bitfield wrappers and is the
/// unit of every time read and write.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct DS1307DateTime {
    pub(crate) seconds: Seconds,
    pub(crate) minutes: Minutes,
    pub(crate) hours: Hours,
    pub(crate) day: Day,
    pub(crate) date: Date,
    pub(crate) month: Month,
    pub(crate) year: Year,
}

impl DS1307DateTime {
    /// Encodes a validated timestamp. The clock-halt bit is always clear in
    /// the result so writing it starts the oscillator.
    pub(crate) fn from_timestamp(
        timestamp: &Timestamp,
        time_representation: TimeRepresentation,
    ) -> Result<Self, DS1307DateTimeError> {
        timestamp.validate()?;

        let mut seconds = Seconds::default();
        seconds.set_seconds(timestamp.second);
        seconds.set_clock_halt(false);

        let mut minutes = Minutes::default();
        minutes.set_minutes(timestamp.minute);

        let hours = Hours::from_hour(timestamp.hour, time_representation);

        let mut day = Day::default();
        day.set_day(timestamp.weekday);

        let mut date = Date::default();
        date.set_date(timestamp.day);

        let mut month = Month::default();
        month.set_month(timestamp.month);

        // validate() bounds the year to 2000-2099
        let mut year = Year::default();
        year.set_year((timestamp.year - 2000) as u8);

        let raw = DS1307DateTime {
            seconds,
            minutes,
            hours,
            day,
            date,
            month,
            year,
        };

        debug!("raw={:?}", raw);

        Ok(raw)
    }

    /// Decodes the registers. A set clock-halt bit is reported before any
    /// field is looked at.
    ///
    /// Every other field is decoded from its whole byte, so a set bit above
    /// the field's digits makes it out of range rather than being dropped.
    pub(crate) fn into_timestamp(self) -> Result<Timestamp, CorruptData> {
        if self.seconds.clock_halt() {
            return Err(CorruptData::ClockHalted);
        }

        let second = bcd::decode_checked(self.seconds.seconds_bcd(), 0, 59)
            .ok_or(CorruptData::InvalidField(RegAddr::Seconds))?;
        let minute = bcd::decode_checked(self.minutes.0, 0, 59)
            .ok_or(CorruptData::InvalidField(RegAddr::Minutes))?;
        let hour = self
            .hours
            .hour()
            .ok_or(CorruptData::InvalidField(RegAddr::Hours))?;
        let weekday = bcd::decode_checked(self.day.0, 1, 7)
            .ok_or(CorruptData::InvalidField(RegAddr::Day))?;
        let day = bcd::decode_checked(self.date.0, 1, 31)
            .ok_or(CorruptData::InvalidField(RegAddr::Date))?;
        let month = bcd::decode_checked(self.month.0, 1, 12)
            .ok_or(CorruptData::InvalidField(RegAddr::Month))?;
        let year = bcd::decode_checked(self.year.0, 0, 99)
            .ok_or(CorruptData::InvalidField(RegAddr::Year))?;
        let year = 2000 + u16::from(year);

        debug!(
            "raw_hour={:?} h={} m={} s={}",
            self.hours, hour, minute, second
        );

        // e.g. February 30th
        check_date(year, month, day).map_err(|_| CorruptData::InvalidField(RegAddr::Date))?;

        Ok(Timestamp {
            year,
            month,
            day,
            hour,
            minute,
            second,
            weekday,
        })
    }
}

impl From<[u8; 7]> for DS1307DateTime {
    fn from(data: [u8; 7]) -> Self {
        DS1307DateTime {
            seconds: Seconds(data[0]),
            minutes: Minutes(data[1]),
            hours: Hours(data[2]),
            day: Day(data[3]),
            date: Date(data[4]),
            month: Month(data[5]),
            year: Year(data[6]),
        }
    }
}

impl From<&DS1307DateTime> for [u8; 7] {
    fn from(dt: &DS1307DateTime) -> [u8; 7] {
        [
            dt.seconds.0,
            dt.minutes.0,
            dt.hours.0,
            dt.day.0,
            dt.date.0,
            dt.month.0,
            dt.year.0,
        ]
    }
}

/// Errors for caller-supplied date/time values the DS1307 cannot store.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DS1307DateTimeError {
    /// The year is not after 1999 (the DS1307 stores 2000-2099)
    YearNotAfter1999,
    /// The year is not before 2100 (the DS1307 stores 2000-2099)
    YearNotBefore2100,
    /// Month outside 1-12
    InvalidMonth,
    /// Day outside the length of its month
    InvalidDay,
    /// Hour outside 0-23
    InvalidHour,
    /// Minute outside 0-59
    InvalidMinute,
    /// Second outside 0-59
    InvalidSecond,
    /// Weekday outside 1-7
    InvalidWeekday,
}

impl fmt::Display for DS1307DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::YearNotAfter1999 => "year is before 2000",
            Self::YearNotBefore2100 => "year is after 2099",
            Self::InvalidMonth => "month is not within 1-12",
            Self::InvalidDay => "day does not exist in that month",
            Self::InvalidHour => "hour is not within 0-23",
            Self::InvalidMinute => "minute is not within 0-59",
            Self::InvalidSecond => "second is not within 0-59",
            Self::InvalidWeekday => "weekday is not within 1-7",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for DS1307DateTimeError {}

/// Ways the time registers read back from the chip can be unusable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CorruptData {
    /// The clock-halt bit is set: the oscillator is stopped, usually because
    /// the chip has never been set since losing power
    ClockHalted,
    /// The register holds a non-BCD nibble or a value outside its range
    InvalidField(RegAddr),
}

impl fmt::Display for CorruptData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClockHalted => f.write_str("clock is halted"),
            Self::InvalidField(reg) => write!(f, "register {:?} holds an invalid value", reg),
        }
    }
}

impl core::error::Error for CorruptData {}

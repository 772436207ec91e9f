//! A platform-agnostic driver for the DS1307 real-time clock.
//!
//! The DS1307 is a BCD clock/calendar with 56 bytes of battery-backed SRAM,
//! reached over I2C at address `0x68`. This crate works with any bus that
//! implements the `embedded-hal` 1.0 [`I2c`] trait, and with
//! `embedded-hal-async` when the `async` feature is enabled.
//!
//! # Features
//!
//! - `async`: adds [`asynch::DS1307`], the same driver over async I2C
//! - `log`: internal debug logging through the `log` crate
//! - `defmt`: internal debug logging and `defmt::Format` impls through `defmt`
//!
//! # Example
//!
//! ```rust,ignore
//! use ds1307::{Timestamp, DS1307};
//!
//! let mut rtc = DS1307::new(i2c);
//!
//! // 2022-01-01 12:00:00, weekday 6
//! rtc.set_time(&Timestamp::new(2022, 1, 1, 12, 0, 0, 6))?;
//! let now = rtc.get_time()?;
//!
//! // Keep a few bytes across power cycles
//! rtc.write_raw(ds1307::SRAM_START, &[0xCA, 0xFE])?;
//! ```
#![no_std]

#[macro_use]
mod fmt;

#[cfg(feature = "async")]
pub mod asynch;
pub mod bcd;
mod datetime;
mod registers;
mod sram;

use core::fmt as core_fmt;

use chrono::NaiveDateTime;
use embedded_hal::i2c::I2c;
use paste::paste;

pub(crate) use datetime::DS1307DateTime;
pub use datetime::{CorruptData, DS1307DateTimeError, Timestamp};
pub use registers::*;
pub use sram::{OutOfRange, SRAM_END, SRAM_SIZE, SRAM_START};

/// Fixed 7-bit bus address of the DS1307.
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Runtime configuration applied by [`DS1307::configure`].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Representation used for the hours register
    pub time_representation: TimeRepresentation,
    /// Drive a square wave on SQW/OUT
    pub square_wave_enable: bool,
    /// Square wave frequency, used when `square_wave_enable` is set
    pub square_wave_frequency: SquareWaveFrequency,
    /// Static SQW/OUT level, used when `square_wave_enable` is clear
    pub output_level: OutputLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_representation: TimeRepresentation::TwentyFourHour,
            square_wave_enable: false,
            square_wave_frequency: SquareWaveFrequency::Hz1,
            output_level: OutputLevel::Low,
        }
    }
}

impl Config {
    pub(crate) fn control(&self) -> Control {
        let mut control = Control::default();
        control.set_output_level(self.output_level);
        control.set_square_wave_enable(self.square_wave_enable);
        control.set_square_wave_frequency(self.square_wave_frequency);
        control
    }
}

/// Errors returned by the driver.
#[derive(Debug)]
pub enum DS1307Error<I2CE> {
    /// The bus failed while reading from the device
    I2cRead(I2CE),
    /// The bus failed while writing to the device
    I2cWrite(I2CE),
    /// A caller-supplied value cannot be stored; nothing was sent
    InvalidArgument(DS1307DateTimeError),
    /// The device returned registers that do not hold a valid time
    CorruptData(CorruptData),
    /// SRAM access outside 0x08-0x3F; nothing was sent
    OutOfRange,
}

impl<I2CE> From<OutOfRange> for DS1307Error<I2CE> {
    fn from(_: OutOfRange) -> Self {
        DS1307Error::OutOfRange
    }
}

impl<I2CE: core_fmt::Debug> core_fmt::Display for DS1307Error<I2CE> {
    fn fmt(&self, f: &mut core_fmt::Formatter<'_>) -> core_fmt::Result {
        match self {
            DS1307Error::I2cRead(e) => write!(f, "I2C read failed: {:?}", e),
            DS1307Error::I2cWrite(e) => write!(f, "I2C write failed: {:?}", e),
            DS1307Error::InvalidArgument(e) => write!(f, "invalid argument: {}", e),
            DS1307Error::CorruptData(e) => write!(f, "corrupt data: {}", e),
            DS1307Error::OutOfRange => f.write_str("address range outside SRAM window"),
        }
    }
}

impl<I2CE: core_fmt::Debug> core::error::Error for DS1307Error<I2CE> {}

/// DS1307 Real-Time Clock driver.
///
/// Every operation is one blocking bus exchange (read-modify-write helpers
/// use two). Bus errors are returned as-is; the driver never retries.
pub struct DS1307<I2C> {
    i2c: I2C,
    address: u8,
    time_representation: TimeRepresentation,
}

impl<I2C> DS1307<I2C> {
    /// Creates a driver for a DS1307 at the default address `0x68`.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Creates a driver for a device at a non-standard address, e.g. behind
    /// an address translator.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            time_representation: TimeRepresentation::TwentyFourHour,
        }
    }

    /// Returns the hour representation used when writing the time.
    pub fn time_representation(&self) -> TimeRepresentation {
        self.time_representation
    }

    /// Consumes the driver and returns the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> DS1307<I2C> {
    fn read_registers(
        &mut self,
        start: u8,
        buffer: &mut [u8],
    ) -> Result<(), DS1307Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[start], buffer)
            .map_err(DS1307Error::I2cRead)
    }

    fn write_registers(&mut self, frame: &[u8]) -> Result<(), DS1307Error<I2C::Error>> {
        self.i2c
            .write(self.address, frame)
            .map_err(DS1307Error::I2cWrite)
    }

    /// Configures the SQW/OUT pin and the hour representation.
    ///
    /// The current hour is re-encoded in the new representation so the
    /// clock keeps its value. The hours register is read and checked first;
    /// if it is corrupt nothing is written.
    pub fn configure(&mut self, config: &Config) -> Result<(), DS1307Error<I2C::Error>> {
        let hours = self.hour()?;
        let hour = hours
            .hour()
            .ok_or(DS1307Error::CorruptData(CorruptData::InvalidField(
                RegAddr::Hours,
            )))?;

        let control = config.control();
        debug!("DS1307: writing control: {:?}", control);
        self.set_control(control)?;
        self.set_hour(Hours::from_hour(hour, config.time_representation))?;
        self.time_representation = config.time_representation;
        Ok(())
    }

    fn read_raw_datetime(&mut self) -> Result<DS1307DateTime, DS1307Error<I2C::Error>> {
        let mut data = [0; 7];
        self.read_registers(RegAddr::Seconds as u8, &mut data)?;
        Ok(data.into())
    }

    fn write_raw_datetime(
        &mut self,
        datetime: &DS1307DateTime,
    ) -> Result<(), DS1307Error<I2C::Error>> {
        let data: [u8; 7] = datetime.into();
        self.write_registers(&[
            RegAddr::Seconds as u8,
            data[0],
            data[1],
            data[2],
            data[3],
            data[4],
            data[5],
            data[6],
        ])
    }

    /// Reads the current time.
    ///
    /// Fails with [`CorruptData::ClockHalted`] if the oscillator is stopped,
    /// which is the state of a chip that has not been set since it lost
    /// power.
    pub fn get_time(&mut self) -> Result<Timestamp, DS1307Error<I2C::Error>> {
        let raw = self.read_raw_datetime()?;
        raw.into_timestamp().map_err(DS1307Error::CorruptData)
    }

    /// Sets the time and starts the clock.
    ///
    /// All seven time registers are written in one transfer with the
    /// clock-halt bit clear. Nothing is sent if `timestamp` is invalid.
    pub fn set_time(&mut self, timestamp: &Timestamp) -> Result<(), DS1307Error<I2C::Error>> {
        let raw = DS1307DateTime::from_timestamp(timestamp, self.time_representation)
            .map_err(DS1307Error::InvalidArgument)?;
        self.write_raw_datetime(&raw)
    }

    /// Reads the current time as a chrono datetime.
    pub fn datetime(&mut self) -> Result<NaiveDateTime, DS1307Error<I2C::Error>> {
        let timestamp = self.get_time()?;
        timestamp
            .to_datetime()
            .map_err(|_| DS1307Error::CorruptData(CorruptData::InvalidField(RegAddr::Date)))
    }

    /// Sets the time from a chrono datetime, with the weekday numbered from
    /// Sunday = 1.
    pub fn set_datetime(
        &mut self,
        datetime: &NaiveDateTime,
    ) -> Result<(), DS1307Error<I2C::Error>> {
        let timestamp = Timestamp::from_datetime(datetime).map_err(DS1307Error::InvalidArgument)?;
        self.set_time(&timestamp)
    }

    /// Writes only the seconds, minutes and hours registers and starts the
    /// clock. The date registers are left alone.
    pub fn set_clock(
        &mut self,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<(), DS1307Error<I2C::Error>> {
        datetime::check_time(hour, minute, second).map_err(DS1307Error::InvalidArgument)?;
        let mut seconds = Seconds::default();
        seconds.set_seconds(second);
        let mut minutes = Minutes::default();
        minutes.set_minutes(minute);
        let hours = Hours::from_hour(hour, self.time_representation);
        self.write_registers(&[
            RegAddr::Seconds as u8,
            seconds.into(),
            minutes.into(),
            hours.into(),
        ])
    }

    /// Writes only the date, month and year registers. The weekday register
    /// is left alone.
    pub fn set_calendar(
        &mut self,
        day: u8,
        month: u8,
        year: u16,
    ) -> Result<(), DS1307Error<I2C::Error>> {
        datetime::check_date(year, month, day).map_err(DS1307Error::InvalidArgument)?;
        let mut date = Date::default();
        date.set_date(day);
        let mut month_reg = Month::default();
        month_reg.set_month(month);
        let mut year_reg = Year::default();
        // check_date bounds the year to 2000-2099
        year_reg.set_year((year - 2000) as u8);
        self.write_registers(&[
            RegAddr::Date as u8,
            date.into(),
            month_reg.into(),
            year_reg.into(),
        ])
    }

    /// Returns true if the oscillator is running (clock-halt bit clear).
    pub fn is_running(&mut self) -> Result<bool, DS1307Error<I2C::Error>> {
        Ok(!self.second()?.clock_halt())
    }

    /// Stops the oscillator, keeping the current seconds value.
    pub fn halt(&mut self) -> Result<(), DS1307Error<I2C::Error>> {
        self.update_clock_halt(true)
    }

    /// Restarts the oscillator from the stored time.
    pub fn resume(&mut self) -> Result<(), DS1307Error<I2C::Error>> {
        self.update_clock_halt(false)
    }

    fn update_clock_halt(&mut self, halt: bool) -> Result<(), DS1307Error<I2C::Error>> {
        let mut seconds = self.second()?;
        seconds.set_clock_halt(halt);
        debug!("DS1307: writing seconds: {:?}", seconds);
        self.set_second(seconds)
    }

    /// Reads `buffer.len()` bytes of SRAM starting at register `address`.
    ///
    /// The range must lie within 0x08-0x3F. An empty buffer is a no-op.
    pub fn read_raw(
        &mut self,
        address: u8,
        buffer: &mut [u8],
    ) -> Result<(), DS1307Error<I2C::Error>> {
        sram::check_window(address, buffer.len())?;
        if buffer.is_empty() {
            return Ok(());
        }
        self.read_registers(address, buffer)
    }

    /// Writes `data` to SRAM starting at register `address` in one transfer.
    ///
    /// The range must lie within 0x08-0x3F. Empty data is a no-op.
    pub fn write_raw(&mut self, address: u8, data: &[u8]) -> Result<(), DS1307Error<I2C::Error>> {
        let (frame, len) = sram::write_frame(address, data)?;
        if data.is_empty() {
            return Ok(());
        }
        self.write_registers(&frame[..len])
    }
}

// Register access implementations
macro_rules! impl_register_access {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+) => {
        impl<I2C: I2c> DS1307<I2C> {
            $(
                paste! {
                    #[doc = concat!("Gets the value of the ", stringify!($name), " register.")]
                    pub fn $name(&mut self) -> Result<$typ, DS1307Error<I2C::Error>> {
                        let mut data = [0];
                        self.read_registers($regaddr as u8, &mut data)?;
                        Ok(<$typ>::from(data[0]))
                    }

                    #[doc = concat!("Sets the value of the ", stringify!($name), " register.")]
                    pub fn [<set_ $name>](&mut self, value: $typ) -> Result<(), DS1307Error<I2C::Error>> {
                        self.write_registers(&[$regaddr as u8, value.into()])
                    }
                }
            )+
        }
    }
}

impl_register_access!(
    (second, RegAddr::Seconds, Seconds),
    (minute, RegAddr::Minutes, Minutes),
    (hour, RegAddr::Hours, Hours),
    (day, RegAddr::Day, Day),
    (date, RegAddr::Date, Date),
    (month, RegAddr::Month, Month),
    (year, RegAddr::Year, Year),
    (control, RegAddr::Control, Control)
);

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use alloc::vec;
    use chrono::NaiveDate;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    const DEVICE_ADDRESS: u8 = 0x68;

    fn setup_mock(expectations: &[I2cTrans]) -> I2cMock {
        I2cMock::new(expectations)
    }

    fn no_traffic() -> I2cMock {
        let expectations: [I2cTrans; 0] = [];
        I2cMock::new(&expectations)
    }

    #[test]
    fn test_set_time_writes_contiguous_bcd_block() {
        let mock = setup_mock(&[I2cTrans::write(
            DEVICE_ADDRESS,
            vec![
                RegAddr::Seconds as u8,
                0x00, // seconds, clock halt clear
                0x00, // minutes
                0x12, // hours (24-hour mode)
                0x06, // day
                0x01, // date
                0x01, // month
                0x22, // year
            ],
        )]);
        let mut dev = DS1307::new(mock);

        dev.set_time(&Timestamp::new(2022, 1, 1, 12, 0, 0, 6))
            .unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_get_time_decodes_registers() {
        let mock = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            vec![0x00, 0x00, 0x12, 0x06, 0x01, 0x01, 0x22],
        )]);
        let mut dev = DS1307::new(mock);

        let ts = dev.get_time().unwrap();
        assert_eq!(ts, Timestamp::new(2022, 1, 1, 12, 0, 0, 6));
        dev.i2c.done();
    }

    #[test]
    fn test_set_time_invalid_argument_sends_nothing() {
        let mut dev = DS1307::new(no_traffic());

        let err = dev
            .set_time(&Timestamp::new(2022, 13, 1, 12, 0, 0, 6))
            .unwrap_err();
        assert!(matches!(
            err,
            DS1307Error::InvalidArgument(DS1307DateTimeError::InvalidMonth)
        ));

        let err = dev
            .set_time(&Timestamp::new(2022, 1, 32, 12, 0, 0, 6))
            .unwrap_err();
        assert!(matches!(
            err,
            DS1307Error::InvalidArgument(DS1307DateTimeError::InvalidDay)
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_get_time_clock_halted() {
        let mock = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            vec![0x80, 0x00, 0x12, 0x06, 0x01, 0x01, 0x22],
        )]);
        let mut dev = DS1307::new(mock);

        let err = dev.get_time().unwrap_err();
        assert!(matches!(
            err,
            DS1307Error::CorruptData(CorruptData::ClockHalted)
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_get_time_corrupt_month() {
        let mock = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            vec![0x00, 0x00, 0x12, 0x06, 0x01, 0x13, 0x22],
        )]);
        let mut dev = DS1307::new(mock);

        let err = dev.get_time().unwrap_err();
        assert!(matches!(
            err,
            DS1307Error::CorruptData(CorruptData::InvalidField(RegAddr::Month))
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_get_time_month_with_high_bit_set() {
        // 0x81 would read back as January if bit 7 were masked off
        let mock = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            vec![0x00, 0x00, 0x12, 0x06, 0x01, 0x81, 0x22],
        )]);
        let mut dev = DS1307::new(mock);

        assert!(matches!(
            dev.get_time(),
            Err(DS1307Error::CorruptData(CorruptData::InvalidField(
                RegAddr::Month
            )))
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_get_time_read_error() {
        let mock = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            vec![0; 7],
        )
        .with_error(ErrorKind::Other)]);
        let mut dev = DS1307::new(mock);

        let err = dev.get_time().unwrap_err();
        assert!(matches!(err, DS1307Error::I2cRead(ErrorKind::Other)));
        dev.i2c.done();
    }

    #[test]
    fn test_set_time_write_error() {
        let mock = setup_mock(&[I2cTrans::write(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8, 0x00, 0x00, 0x12, 0x06, 0x01, 0x01, 0x22],
        )
        .with_error(ErrorKind::Other)]);
        let mut dev = DS1307::new(mock);

        let err = dev
            .set_time(&Timestamp::new(2022, 1, 1, 12, 0, 0, 6))
            .unwrap_err();
        assert!(matches!(err, DS1307Error::I2cWrite(ErrorKind::Other)));
        dev.i2c.done();
    }

    #[test]
    fn test_datetime_and_set_datetime() {
        // 2024-03-14 is a Thursday, weekday 5 counting Sunday as 1
        let mock = setup_mock(&[
            I2cTrans::write(
                DEVICE_ADDRESS,
                vec![RegAddr::Seconds as u8, 0x00, 0x30, 0x15, 0x05, 0x14, 0x03, 0x24],
            ),
            I2cTrans::write_read(
                DEVICE_ADDRESS,
                vec![RegAddr::Seconds as u8],
                vec![0x00, 0x30, 0x15, 0x05, 0x14, 0x03, 0x24],
            ),
        ]);
        let mut dev = DS1307::new(mock);

        let dt = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap();
        dev.set_datetime(&dt).unwrap();
        assert_eq!(dev.datetime().unwrap(), dt);
        dev.i2c.done();
    }

    #[test]
    fn test_set_datetime_rejects_unsupported_year() {
        let mut dev = DS1307::new(no_traffic());

        let dt = NaiveDate::from_ymd_opt(2100, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let err = dev.set_datetime(&dt).unwrap_err();
        assert!(matches!(
            err,
            DS1307Error::InvalidArgument(DS1307DateTimeError::YearNotBefore2100)
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_set_clock_and_set_calendar() {
        let mock = setup_mock(&[
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8, 0x45, 0x59, 0x23]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Date as u8, 0x29, 0x02, 0x24]),
        ]);
        let mut dev = DS1307::new(mock);

        dev.set_clock(23, 59, 45).unwrap();
        dev.set_calendar(29, 2, 2024).unwrap();

        // Rejected before reaching the bus
        assert!(matches!(
            dev.set_clock(24, 0, 0),
            Err(DS1307Error::InvalidArgument(DS1307DateTimeError::InvalidHour))
        ));
        assert!(matches!(
            dev.set_calendar(29, 2, 2023),
            Err(DS1307Error::InvalidArgument(DS1307DateTimeError::InvalidDay))
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_configure_twelve_hour_square_wave() {
        let config = Config {
            time_representation: TimeRepresentation::TwelveHour,
            square_wave_enable: true,
            square_wave_frequency: SquareWaveFrequency::Hz32768,
            output_level: OutputLevel::Low,
        };

        let mock = setup_mock(&[
            // Read hours register: 15h in 24-hour mode
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Hours as u8], vec![0x15]),
            // Write control register: SQWE + RS1/RS0
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0b0001_0011]),
            // Write hours register: 3 PM in 12-hour mode
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Hours as u8, 0x63]),
            // set_time now encodes hours in 12-hour mode
            I2cTrans::write(
                DEVICE_ADDRESS,
                vec![RegAddr::Seconds as u8, 0x00, 0x00, 0x52, 0x01, 0x01, 0x01, 0x22],
            ),
        ]);
        let mut dev = DS1307::new(mock);

        dev.configure(&config).unwrap();
        assert_eq!(dev.time_representation(), TimeRepresentation::TwelveHour);
        dev.set_time(&Timestamp::new(2022, 1, 1, 0, 0, 0, 1))
            .unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_configure_default_output_high() {
        let config = Config {
            output_level: OutputLevel::High,
            ..Config::default()
        };

        let mock = setup_mock(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Hours as u8], vec![0x72]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0b1000_0000]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Hours as u8, 0x12]),
        ]);
        let mut dev = DS1307::new(mock);

        dev.configure(&config).unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_configure_corrupt_hours_writes_nothing() {
        // Only the hours read; control and hours stay untouched
        let mock = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Hours as u8],
            vec![0x3F],
        )]);
        let mut dev = DS1307::new(mock);

        let config = Config {
            time_representation: TimeRepresentation::TwelveHour,
            square_wave_enable: true,
            ..Config::default()
        };
        let err = dev.configure(&config).unwrap_err();
        assert!(matches!(
            err,
            DS1307Error::CorruptData(CorruptData::InvalidField(RegAddr::Hours))
        ));
        assert_eq!(dev.time_representation(), TimeRepresentation::TwentyFourHour);
        dev.i2c.done();
    }

    #[test]
    fn test_halt_resume_and_is_running() {
        let mock = setup_mock(&[
            // halt: 42 seconds, running
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8], vec![0x42]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8, 0xC2]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8], vec![0xC2]),
            // resume
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8], vec![0xC2]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8, 0x42]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8], vec![0x42]),
        ]);
        let mut dev = DS1307::new(mock);

        dev.halt().unwrap();
        assert!(!dev.is_running().unwrap());
        dev.resume().unwrap();
        assert!(dev.is_running().unwrap());
        dev.i2c.done();
    }

    #[test]
    fn test_read_raw_outside_sram_window() {
        let mut dev = DS1307::new(no_traffic());

        let mut buf = [0u8; 2];
        assert!(matches!(
            dev.read_raw(0x07, &mut buf),
            Err(DS1307Error::OutOfRange)
        ));
        let mut buf = [0u8; 57];
        assert!(matches!(
            dev.read_raw(SRAM_START, &mut buf),
            Err(DS1307Error::OutOfRange)
        ));
        assert!(matches!(
            dev.write_raw(0x3F, &[1, 2]),
            Err(DS1307Error::OutOfRange)
        ));
        assert!(matches!(
            dev.write_raw(0x40, &[1]),
            Err(DS1307Error::OutOfRange)
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_read_and_write_raw() {
        let mock = setup_mock(&[
            I2cTrans::write(DEVICE_ADDRESS, vec![0x08, 0xCA, 0xFE, 0xBA, 0xBE]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![0x08], vec![0xCA, 0xFE, 0xBA, 0xBE]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![0x3F], vec![0x11]),
        ]);
        let mut dev = DS1307::new(mock);

        dev.write_raw(SRAM_START, &[0xCA, 0xFE, 0xBA, 0xBE])
            .unwrap();
        let mut buf = [0u8; 4];
        dev.read_raw(SRAM_START, &mut buf).unwrap();
        assert_eq!(buf, [0xCA, 0xFE, 0xBA, 0xBE]);

        let mut last = [0u8; 1];
        dev.read_raw(0x3F, &mut last).unwrap();
        assert_eq!(last, [0x11]);
        dev.i2c.done();
    }

    #[test]
    fn test_write_raw_full_window() {
        let data: [u8; SRAM_SIZE] = core::array::from_fn(|i| i as u8);
        let mut frame = vec![SRAM_START];
        frame.extend_from_slice(&data);
        let mock = setup_mock(&[I2cTrans::write(DEVICE_ADDRESS, frame)]);
        let mut dev = DS1307::new(mock);

        dev.write_raw(SRAM_START, &data).unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_raw_access_empty_is_noop() {
        let mut dev = DS1307::new(no_traffic());

        dev.write_raw(0x20, &[]).unwrap();
        dev.read_raw(0x20, &mut []).unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_raw_access_bus_errors() {
        let mock = setup_mock(&[
            I2cTrans::write(DEVICE_ADDRESS, vec![0x10, 0x01]).with_error(ErrorKind::Other),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![0x10], vec![0x00])
                .with_error(ErrorKind::Other),
        ]);
        let mut dev = DS1307::new(mock);

        assert!(matches!(
            dev.write_raw(0x10, &[0x01]),
            Err(DS1307Error::I2cWrite(ErrorKind::Other))
        ));
        let mut buf = [0u8; 1];
        assert!(matches!(
            dev.read_raw(0x10, &mut buf),
            Err(DS1307Error::I2cRead(ErrorKind::Other))
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_register_operations() {
        let mock = setup_mock(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8], vec![0x45]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8, 0x30]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Day as u8], vec![0x03]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x10]),
        ]);
        let mut dev = DS1307::new(mock);

        let seconds = dev.second().unwrap();
        assert_eq!(seconds.seconds(), 45);
        dev.set_second(Seconds(0x30)).unwrap();

        assert_eq!(dev.day().unwrap().day(), 3);

        let control = dev.control().unwrap();
        assert!(control.square_wave_enable());
        assert_eq!(control.square_wave_frequency(), SquareWaveFrequency::Hz1);
        dev.i2c.done();
    }

    #[test]
    fn test_with_address_and_release() {
        let mock = setup_mock(&[I2cTrans::write_read(0x50, vec![RegAddr::Year as u8], vec![0x99])]);
        let mut dev = DS1307::with_address(mock, 0x50);

        assert_eq!(dev.year().unwrap().year(), 99);
        let mut i2c = dev.release();
        i2c.done();
    }

    #[test]
    fn test_error_display() {
        let err: DS1307Error<ErrorKind> = DS1307Error::CorruptData(CorruptData::ClockHalted);
        assert_eq!(alloc::format!("{}", err), "corrupt data: clock is halted");

        let err: DS1307Error<ErrorKind> = OutOfRange.into();
        assert!(matches!(err, DS1307Error::OutOfRange));
    }
}

//! Async implementation of the DS1307 driver.
//!
//! Same operations and error behavior as [`crate::DS1307`], over the
//! `embedded-hal-async` I2C traits. Only available with the `async` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use ds1307::asynch::DS1307;
//! use ds1307::Timestamp;
//!
//! let mut rtc = DS1307::new(i2c);
//!
//! rtc.set_time(&Timestamp::new(2024, 3, 14, 15, 30, 0, 5)).await?;
//! let now = rtc.get_time().await?;
//! ```

use chrono::NaiveDateTime;
use embedded_hal_async::i2c::I2c;
use paste::paste;

use crate::{
    datetime, sram, Config, Control, CorruptData, DS1307DateTime, DS1307Error, Date, Day, Hours,
    Minutes, Month, RegAddr, Seconds, TimeRepresentation, Timestamp, Year, DEFAULT_ADDRESS,
};

/// DS1307 Real-Time Clock async driver.
pub struct DS1307<I2C> {
    i2c: I2C,
    address: u8,
    time_representation: TimeRepresentation,
}

impl<I2C> DS1307<I2C> {
    /// Creates an async driver for a DS1307 at the default address `0x68`.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Creates an async driver for a device at a non-standard address.
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
    async fn read_registers(
        &mut self,
        start: u8,
        buffer: &mut [u8],
    ) -> Result<(), DS1307Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[start], buffer)
            .await
            .map_err(DS1307Error::I2cRead)
    }

    async fn write_registers(&mut self, frame: &[u8]) -> Result<(), DS1307Error<I2C::Error>> {
        self.i2c
            .write(self.address, frame)
            .await
            .map_err(DS1307Error::I2cWrite)
    }

    /// Configures the SQW/OUT pin and the hour representation, keeping the
    /// current hour. Nothing is written if the hours register is corrupt.
    pub async fn configure(&mut self, config: &Config) -> Result<(), DS1307Error<I2C::Error>> {
        debug!("DS1307: reading hours register");
        let hours = self.hour().await?;
        let hour = hours
            .hour()
            .ok_or(DS1307Error::CorruptData(CorruptData::InvalidField(
                RegAddr::Hours,
            )))?;

        let control = config.control();
        debug!("DS1307: writing control: {:?}", control);
        self.set_control(control).await?;
        self.set_hour(Hours::from_hour(hour, config.time_representation))
            .await?;
        self.time_representation = config.time_representation;
        Ok(())
    }

    async fn read_raw_datetime(&mut self) -> Result<DS1307DateTime, DS1307Error<I2C::Error>> {
        let mut data = [0; 7];
        self.read_registers(RegAddr::Seconds as u8, &mut data)
            .await?;
        Ok(data.into())
    }

    async fn write_raw_datetime(
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
        .await
    }

    /// Reads the current time. Fails with [`CorruptData::ClockHalted`] if the
    /// oscillator is stopped.
    pub async fn get_time(&mut self) -> Result<Timestamp, DS1307Error<I2C::Error>> {
        let raw = self.read_raw_datetime().await?;
        raw.into_timestamp().map_err(DS1307Error::CorruptData)
    }

    /// Sets the time and starts the clock in a single transfer.
    pub async fn set_time(
        &mut self,
        timestamp: &Timestamp,
    ) -> Result<(), DS1307Error<I2C::Error>> {
        let raw = DS1307DateTime::from_timestamp(timestamp, self.time_representation)
            .map_err(DS1307Error::InvalidArgument)?;
        self.write_raw_datetime(&raw).await
    }

    /// Reads the current time as a chrono datetime.
    pub async fn datetime(&mut self) -> Result<NaiveDateTime, DS1307Error<I2C::Error>> {
        let timestamp = self.get_time().await?;
        timestamp
            .to_datetime()
            .map_err(|_| DS1307Error::CorruptData(CorruptData::InvalidField(RegAddr::Date)))
    }

    /// Sets the time from a chrono datetime, with the weekday numbered from
    /// Sunday = 1.
    pub async fn set_datetime(
        &mut self,
        datetime: &NaiveDateTime,
    ) -> Result<(), DS1307Error<I2C::Error>> {
        let timestamp = Timestamp::from_datetime(datetime).map_err(DS1307Error::InvalidArgument)?;
        self.set_time(&timestamp).await
    }

    /// Writes only seconds, minutes and hours, and starts the clock.
    pub async fn set_clock(
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
        .await
    }

    /// Writes only date, month and year.
    pub async fn set_calendar(
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
        year_reg.set_year((year - 2000) as u8);
        self.write_registers(&[
            RegAddr::Date as u8,
            date.into(),
            month_reg.into(),
            year_reg.into(),
        ])
        .await
    }

    /// Returns true if the oscillator is running (clock-halt bit clear).
    pub async fn is_running(&mut self) -> Result<bool, DS1307Error<I2C::Error>> {
        Ok(!self.second().await?.clock_halt())
    }

    /// Stops the oscillator, keeping the current seconds value.
    pub async fn halt(&mut self) -> Result<(), DS1307Error<I2C::Error>> {
        self.update_clock_halt(true).await
    }

    /// Restarts the oscillator from the stored time.
    pub async fn resume(&mut self) -> Result<(), DS1307Error<I2C::Error>> {
        self.update_clock_halt(false).await
    }

    async fn update_clock_halt(&mut self, halt: bool) -> Result<(), DS1307Error<I2C::Error>> {
        let mut seconds = self.second().await?;
        seconds.set_clock_halt(halt);
        self.set_second(seconds).await
    }

    /// Reads SRAM. The range must lie within 0x08-0x3F.
    pub async fn read_raw(
        &mut self,
        address: u8,
        buffer: &mut [u8],
    ) -> Result<(), DS1307Error<I2C::Error>> {
        sram::check_window(address, buffer.len())?;
        if buffer.is_empty() {
            return Ok(());
        }
        self.read_registers(address, buffer).await
    }

    /// Writes SRAM in one transfer. The range must lie within 0x08-0x3F.
    pub async fn write_raw(
        &mut self,
        address: u8,
        data: &[u8],
    ) -> Result<(), DS1307Error<I2C::Error>> {
        let (frame, len) = sram::write_frame(address, data)?;
        if data.is_empty() {
            return Ok(());
        }
        self.write_registers(&frame[..len]).await
    }
}

// Register access implementations
macro_rules! impl_register_access {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+) => {
        impl<I2C: I2c> DS1307<I2C> {
            $(
                paste! {
                    #[doc = concat!("Gets the value of the ", stringify!($name), " register.")]
                    pub async fn $name(&mut self) -> Result<$typ, DS1307Error<I2C::Error>> {
                        let mut data = [0];
                        self.read_registers($regaddr as u8, &mut data).await?;
                        Ok(<$typ>::from(data[0]))
                    }

                    #[doc = concat!("Sets the value of the ", stringify!($name), " register.")]
                    pub async fn [<set_ $name>](&mut self, value: $typ) -> Result<(), DS1307Error<I2C::Error>> {
                        self.write_registers(&[$regaddr as u8, value.into()]).await
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

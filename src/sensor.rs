//! SAADC-backed level sensor.
//!
//! A potentiometer / joystick axis on one analog input stands in for the
//! ultrasonic distance sensor. Sampled on demand, 12-bit, single-ended.

use embassy_nrf::saadc::Saadc;
use smartbin::traits::LevelSensor;
use smartbin::Result;

pub struct FillSensor {
    adc: Saadc<'static, 1>,
    full_scale: u16,
}

impl FillSensor {
    /// Calibrate the converter once and wrap it.
    pub async fn new(mut adc: Saadc<'static, 1>, full_scale: u16) -> Self {
        adc.calibrate().await;
        Self { adc, full_scale }
    }
}

impl LevelSensor for FillSensor {
    async fn sample(&mut self) -> Result<u16> {
        let mut buf = [0i16; 1];
        self.adc.sample(&mut buf).await;
        // Single-ended readings can dip slightly below zero near ground.
        Ok(buf[0].clamp(0, self.full_scale as i16) as u16)
    }
}

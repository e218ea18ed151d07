use ads1115::{Ads1115, Address, MuxInput};
use embedded_hal::i2c::I2c;
use log::{info, warn};
use mcp9802::Mcp9802;

use crate::core::acquisition::{is_plausible_temperature, Acquisition, AcquisitionError};
use crate::core::channel::{ChannelLocation, ConverterId};
use crate::core::config::FixtureConfig;

/// MCP9802のスレーブアドレス (A2-A0結線で0x4D)
const TEMP_SENSOR_ADDRESS: u8 = 0x4D;
/// MCP9802の動作保証下限 (℃)
const SENSOR_MIN_C: f32 = -55.0;

/// 治具センサー群の取得アダプタ
///
/// 1本のI2Cバス上の2個のADS1115 (U5/U6) とMCP9802をまとめ、
/// 測定コアへチャンネル電圧と周囲温度を供給します。コアは
/// ハードウェアのハンドルを一切持たず、このアダプタが返す値だけを
/// 消費します。
pub struct FixtureSensors<I2C> {
    i2c: I2C,
    u5: Ads1115,
    u6: Ads1115,
    thermometer: Mcp9802,
    temp_plausible_max_c: f32,
}

impl<I2C: I2c> FixtureSensors<I2C> {
    /// センサー群を初期化します (温度センサーを12bitモードへ設定)
    pub fn new(mut i2c: I2C, config: &FixtureConfig) -> Result<Self, AcquisitionError> {
        info!("測定用センサーを初期化しています (U5=0x48, U6=0x4A, MCP9802=0x4D)");
        let thermometer = Mcp9802::new(TEMP_SENSOR_ADDRESS);
        thermometer
            .set_resolution_12bit(&mut i2c)
            .map_err(|e| AcquisitionError::Temperature(format!("{:?}", e)))?;

        Ok(Self {
            i2c,
            u5: Ads1115::new(Address::Gnd),
            u6: Ads1115::new(Address::Sda),
            thermometer,
            temp_plausible_max_c: config.temp_plausible_max_c,
        })
    }

    fn converter(&self, id: ConverterId) -> Ads1115 {
        match id {
            ConverterId::U5 => self.u5,
            ConverterId::U6 => self.u6,
        }
    }

    fn read_celsius_once(&mut self) -> Result<f32, AcquisitionError> {
        self.thermometer
            .read_celsius(&mut self.i2c)
            .map_err(|e| AcquisitionError::Temperature(format!("{:?}", e)))
    }
}

impl<I2C: I2c> Acquisition for FixtureSensors<I2C> {
    fn read_channel(&mut self, location: ChannelLocation) -> Result<f32, AcquisitionError> {
        let input = MuxInput::single_ended(location.input).ok_or_else(|| {
            AcquisitionError::AdcRead {
                converter: location.converter,
                input: location.input,
                detail: "AIN0-AIN3の範囲外です".to_string(),
            }
        })?;
        let adc = self.converter(location.converter);
        adc.read_single_ended(&mut self.i2c, input)
            .map_err(|e| AcquisitionError::AdcRead {
                converter: location.converter,
                input: location.input,
                detail: format!("{:?}", e),
            })
    }

    /// 周囲温度を読みます
    ///
    /// 初回サンプルが妥当範囲を外れた場合は1回だけ読み直し、
    /// 2回目の値をそのまま採用します
    fn read_temperature(&mut self) -> Result<f32, AcquisitionError> {
        let first = self.read_celsius_once()?;
        if is_plausible_temperature(first, SENSOR_MIN_C, self.temp_plausible_max_c) {
            return Ok(first);
        }
        warn!(
            "温度の初回サンプルが妥当範囲外です ({:.1} °C)。読み直します",
            first
        );
        self.read_celsius_once()
    }
}

#[cfg(test)]
mod tests {
    // ハードウェア依存のためテストは省略 (読み直しポリシーの判定は
    // core::acquisition::is_plausible_temperature 側で検証済み)
}

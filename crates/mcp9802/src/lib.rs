//! MCP9802 温度センサードライバ
//!
//! 温度レジスタの12bit読み取りに特化した最小ドライバです。
//! バスは呼び出しごとに借用します(同一バス上の複数デバイスと共存するため)。

#![cfg_attr(not(test), no_std)]

use core::fmt;

use embedded_hal::i2c::I2c;

/// レジスタアドレス
mod reg {
    pub const TEMPERATURE: u8 = 0x00;
    pub const CONFIG: u8 = 0x01;
}

/// 分解能12bitの設定値 (変換周期は約240ms)
const CONFIG_RESOLUTION_12BIT: u8 = 0x60;
/// 1LSBあたりの温度 (12bitモード)
const CELSIUS_PER_LSB: f32 = 0.0625;

/// ドライバエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// I2Cバスエラー
    I2c(E),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C bus error: {:?}", e),
        }
    }
}

/// MCP9802ドライバ
#[derive(Debug, Clone, Copy)]
pub struct Mcp9802 {
    address: u8,
}

impl Mcp9802 {
    /// A0-A2の結線で決まるスレーブアドレスを指定して作成する
    pub const fn new(address: u8) -> Self {
        Self { address }
    }

    /// 分解能を12bit (0.0625 °C/LSB) へ設定する
    pub fn set_resolution_12bit<I2C: I2c>(&self, i2c: &mut I2C) -> Result<(), Error<I2C::Error>> {
        i2c.write(self.address, &[reg::CONFIG, CONFIG_RESOLUTION_12BIT])
            .map_err(Error::I2c)
    }

    /// 温度レジスタを読み、摂氏へ換算する
    pub fn read_celsius<I2C: I2c>(&self, i2c: &mut I2C) -> Result<f32, Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        i2c.write_read(self.address, &[reg::TEMPERATURE], &mut buf)
            .map_err(Error::I2c)?;
        Ok(decode_celsius(buf))
    }
}

/// 温度レジスタの2バイトを摂氏へ換算する
///
/// 上位バイトが整数部、下位バイトの上位4bitが小数部。符号付き
/// 12bit値として扱うため、算術右シフトで符号を保存します。
pub fn decode_celsius(raw: [u8; 2]) -> f32 {
    (i16::from_be_bytes(raw) >> 4) as f32 * CELSIUS_PER_LSB
}

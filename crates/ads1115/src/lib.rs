//! ADS1115 16bit ΔΣ型ADCドライバ
//!
//! 単発変換(シングルショット)のシングルエンド読み取りに特化した
//! 最小構成のドライバです。embedded-hal 1.0のI2Cトレイト上に実装され、
//! バスは呼び出しごとに借用します(同一バス上の複数デバイスと共存するため)。

#![cfg_attr(not(test), no_std)]

use core::fmt;

use embedded_hal::i2c::I2c;

/// レジスタアドレス
mod reg {
    pub const CONVERSION: u8 = 0x00;
    pub const CONFIG: u8 = 0x01;
}

/// OSビット (書き込み時: 単発変換開始 / 読み出し時: 変換完了)
const OS: u16 = 0x8000;
/// 単発変換モード
const MODE_SINGLE_SHOT: u16 = 0x0100;
/// コンパレータ無効
const COMP_DISABLE: u16 = 0x0003;
/// 変換完了ポーリングの上限回数
const CONVERSION_POLL_LIMIT: u32 = 1_000;

/// ADDRピンの結線で決まるスレーブアドレス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address {
    /// ADDR -> GND (0x48)
    Gnd,
    /// ADDR -> VDD (0x49)
    Vdd,
    /// ADDR -> SDA (0x4A)
    Sda,
    /// ADDR -> SCL (0x4B)
    Scl,
}

impl Address {
    pub const fn bits(self) -> u8 {
        match self {
            Address::Gnd => 0x48,
            Address::Vdd => 0x49,
            Address::Sda => 0x4A,
            Address::Scl => 0x4B,
        }
    }
}

/// シングルエンド入力 (AINx対GND)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxInput {
    Ain0,
    Ain1,
    Ain2,
    Ain3,
}

impl MuxInput {
    /// 入力番号(0-3)から変換する。範囲外はNone
    pub const fn single_ended(input: u8) -> Option<Self> {
        match input {
            0 => Some(MuxInput::Ain0),
            1 => Some(MuxInput::Ain1),
            2 => Some(MuxInput::Ain2),
            3 => Some(MuxInput::Ain3),
            _ => None,
        }
    }

    const fn bits(self) -> u16 {
        let mux = match self {
            MuxInput::Ain0 => 0b100,
            MuxInput::Ain1 => 0b101,
            MuxInput::Ain2 => 0b110,
            MuxInput::Ain3 => 0b111,
        };
        mux << 12
    }
}

/// プログラマブルゲイン (フルスケールレンジ)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gain {
    Fsr6V144,
    Fsr4V096,
    Fsr2V048,
    Fsr1V024,
    Fsr0V512,
    Fsr0V256,
}

impl Gain {
    const fn bits(self) -> u16 {
        let pga = match self {
            Gain::Fsr6V144 => 0b000,
            Gain::Fsr4V096 => 0b001,
            Gain::Fsr2V048 => 0b010,
            Gain::Fsr1V024 => 0b011,
            Gain::Fsr0V512 => 0b100,
            Gain::Fsr0V256 => 0b101,
        };
        pga << 9
    }

    /// フルスケール電圧 (V)
    pub const fn full_scale_volts(self) -> f32 {
        match self {
            Gain::Fsr6V144 => 6.144,
            Gain::Fsr4V096 => 4.096,
            Gain::Fsr2V048 => 2.048,
            Gain::Fsr1V024 => 1.024,
            Gain::Fsr0V512 => 0.512,
            Gain::Fsr0V256 => 0.256,
        }
    }
}

/// サンプリングレート
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRate {
    Sps8,
    Sps16,
    Sps32,
    Sps64,
    Sps128,
    Sps250,
    Sps475,
    Sps860,
}

impl DataRate {
    const fn bits(self) -> u16 {
        let dr = match self {
            DataRate::Sps8 => 0b000,
            DataRate::Sps16 => 0b001,
            DataRate::Sps32 => 0b010,
            DataRate::Sps64 => 0b011,
            DataRate::Sps128 => 0b100,
            DataRate::Sps250 => 0b101,
            DataRate::Sps475 => 0b110,
            DataRate::Sps860 => 0b111,
        };
        dr << 5
    }
}

/// ドライバエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// I2Cバスエラー
    I2c(E),
    /// 変換完了待ちのタイムアウト
    ConversionTimeout,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C bus error: {:?}", e),
            Error::ConversionTimeout => write!(f, "conversion did not complete"),
        }
    }
}

/// ADS1115ドライバ
///
/// バスを所有せず、各読み取りで`&mut I2C`を受け取ります。
#[derive(Debug, Clone, Copy)]
pub struct Ads1115 {
    address: u8,
    gain: Gain,
    data_rate: DataRate,
}

impl Ads1115 {
    /// 既定設定 (FSR ±4.096V, 128SPS) でドライバを作成する
    pub const fn new(address: Address) -> Self {
        Self {
            address: address.bits(),
            gain: Gain::Fsr4V096,
            data_rate: DataRate::Sps128,
        }
    }

    pub const fn with_gain(mut self, gain: Gain) -> Self {
        self.gain = gain;
        self
    }

    pub const fn with_data_rate(mut self, data_rate: DataRate) -> Self {
        self.data_rate = data_rate;
        self
    }

    /// 指定入力の単発変換を実行し、電圧(V)を返す
    ///
    /// 設定レジスタへの書き込みで変換を開始し、OSビットが立つまで
    /// ポーリングしてから変換レジスタを読みます (128SPSで約8ms)。
    pub fn read_single_ended<I2C: I2c>(
        &self,
        i2c: &mut I2C,
        input: MuxInput,
    ) -> Result<f32, Error<I2C::Error>> {
        let config = config_word(input, self.gain, self.data_rate);
        i2c.write(self.address, &[reg::CONFIG, (config >> 8) as u8, config as u8])
            .map_err(Error::I2c)?;

        let mut buf = [0u8; 2];
        for _ in 0..CONVERSION_POLL_LIMIT {
            i2c.write_read(self.address, &[reg::CONFIG], &mut buf)
                .map_err(Error::I2c)?;
            if u16::from_be_bytes(buf) & OS != 0 {
                i2c.write_read(self.address, &[reg::CONVERSION], &mut buf)
                    .map_err(Error::I2c)?;
                let raw = i16::from_be_bytes(buf);
                return Ok(raw_to_volts(raw, self.gain.full_scale_volts()));
            }
        }
        Err(Error::ConversionTimeout)
    }
}

/// 設定レジスタ値を組み立てる
const fn config_word(input: MuxInput, gain: Gain, data_rate: DataRate) -> u16 {
    OS | input.bits() | gain.bits() | MODE_SINGLE_SHOT | data_rate.bits() | COMP_DISABLE
}

/// 2の補数の生値を電圧(V)へ換算する
pub fn raw_to_volts(raw: i16, full_scale_volts: f32) -> f32 {
    raw as f32 * full_scale_volts / 32768.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_word_ain0_default_gain_and_rate() {
        // AIN0 / FSR4.096 / 単発 / 128SPS / コンパレータ無効
        let word = config_word(MuxInput::Ain0, Gain::Fsr4V096, DataRate::Sps128);
        assert_eq!(word, 0xC383);
    }

    #[test]
    fn config_word_ain3_high_rate() {
        let word = config_word(MuxInput::Ain3, Gain::Fsr2V048, DataRate::Sps860);
        assert_eq!(word, 0xF5E3);
    }

    #[test]
    fn single_ended_maps_all_inputs() {
        assert_eq!(MuxInput::single_ended(0), Some(MuxInput::Ain0));
        assert_eq!(MuxInput::single_ended(1), Some(MuxInput::Ain1));
        assert_eq!(MuxInput::single_ended(2), Some(MuxInput::Ain2));
        assert_eq!(MuxInput::single_ended(3), Some(MuxInput::Ain3));
    }

    #[test]
    fn single_ended_rejects_out_of_range() {
        assert_eq!(MuxInput::single_ended(4), None);
        assert_eq!(MuxInput::single_ended(255), None);
    }

    #[test]
    fn address_bits_follow_addr_pin_strapping() {
        assert_eq!(Address::Gnd.bits(), 0x48);
        assert_eq!(Address::Vdd.bits(), 0x49);
        assert_eq!(Address::Sda.bits(), 0x4A);
        assert_eq!(Address::Scl.bits(), 0x4B);
    }

    #[test]
    fn raw_to_volts_zero() {
        assert_eq!(raw_to_volts(0, 4.096), 0.0);
    }

    #[test]
    fn raw_to_volts_positive_full_scale() {
        let volts = raw_to_volts(32767, 4.096);
        assert!((volts - 4.096).abs() < 0.001);
    }

    #[test]
    fn raw_to_volts_negative_full_scale() {
        assert_eq!(raw_to_volts(-32768, 4.096), -4.096);
    }

    #[test]
    fn raw_to_volts_midpoint() {
        assert_eq!(raw_to_volts(16384, 4.096), 2.048);
    }
}

use crate::core::channel::{ChannelConfig, ChannelLocation, ChannelTarget, ConverterId};
use crate::core::config_validation::{
    validate_channels, validate_positive, validate_tolerance, ValidationError,
};

/// 治具の定数設定
///
/// この構造体はビルド時に`build.rs`によって`cfg.toml`ファイルから
/// 読み込まれた設定を保持します。
#[toml_cfg::toml_config]
pub struct Config {
    // Vinレールの分圧補正係数 (ノード電圧 × 係数 = レール電圧)
    #[default(6.1)]
    vin_divider_scale: f32,

    // Vtestレールの分圧補正係数
    #[default(2.0)]
    vtest_divider_scale: f32,

    // 合否判定の相対許容誤差 (1% = 0.01)
    #[default(0.01)]
    relative_tolerance: f32,

    // 測定サイクル間の待ち時間 (ms)
    #[default(1000)]
    cycle_interval_ms: u32,

    // リレー接点が落ち着くまでの待ち時間 (ms)
    #[default(50)]
    relay_settle_ms: u32,

    // 温度初回サンプルの妥当上限 (℃)。超過時は1回だけ読み直す
    #[default(125.0)]
    temp_plausible_max_c: f32,
}

/// DUT抵抗チャンネル数
pub const DUT_CHANNEL_COUNT: usize = 6;

// 結線テーブル。コンバータ/入力/基準抵抗/目標値の唯一の正とする。
// 各チャンネルは必ず専用のADC入力を読む (入力の読み回しは起動時に弾かれる)
const VIN_RAIL: ChannelLocation = ChannelLocation::new(ConverterId::U5, 0);
const VTEST_RAIL: ChannelLocation = ChannelLocation::new(ConverterId::U6, 0);
const DUT_CHANNELS: [ChannelConfig; DUT_CHANNEL_COUNT] = [
    ChannelConfig {
        label: "R1",
        location: ChannelLocation::new(ConverterId::U5, 1),
        reference_kohm: 96.0,
        target: ChannelTarget::Fixed(96.0),
    },
    ChannelConfig {
        label: "R2",
        location: ChannelLocation::new(ConverterId::U5, 2),
        reference_kohm: 75.0,
        target: ChannelTarget::Fixed(75.0),
    },
    ChannelConfig {
        label: "R3",
        location: ChannelLocation::new(ConverterId::U5, 3),
        reference_kohm: 130.0,
        target: ChannelTarget::Fixed(130.0),
    },
    ChannelConfig {
        label: "R4",
        location: ChannelLocation::new(ConverterId::U6, 1),
        reference_kohm: 47.0,
        target: ChannelTarget::Fixed(47.0),
    },
    // R5は搭載ICのモデルで公称値が変わる判別チャンネル
    ChannelConfig {
        label: "R5",
        location: ChannelLocation::new(ConverterId::U6, 2),
        reference_kohm: 174.2,
        target: ChannelTarget::ModelDependent {
            model90_kohm: 174.0,
            model96_kohm: 124.0,
        },
    },
    ChannelConfig {
        label: "R6",
        location: ChannelLocation::new(ConverterId::U6, 3),
        reference_kohm: 56.0,
        target: ChannelTarget::Fixed(56.0),
    },
];

/// 設定エラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("設定値が正値ではありません ({0}: {1})")]
    NonPositive(&'static str, f32),
    #[error("相対許容誤差が範囲外です (0より大きく1未満): {0}")]
    InvalidTolerance(f32),
    #[error("基準抵抗が正値ではありません ({0}: {1} kΩ)")]
    InvalidReference(&'static str, f32),
    #[error("目標抵抗が正値ではありません ({0}: {1} kΩ)")]
    InvalidTarget(&'static str, f32),
    #[error("ADC入力が二重に割り当てられています ({0:?})")]
    DuplicateLocation(ChannelLocation),
    #[error("モデル判別チャンネルの定義数が不正です: {0}")]
    VariantChannelCount(usize),
}

/// 検証済みの治具設定
///
/// 起動時に一度だけ構築され、以後は読み取り専用。サイクル中に
/// 変更されることはない
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    /// Vinレールのノードを読む位置
    pub vin_rail: ChannelLocation,
    /// Vtestレールのノードを読む位置
    pub vtest_rail: ChannelLocation,
    pub vin_scale: f32,
    pub vtest_scale: f32,
    /// 合否判定の相対許容誤差
    pub tolerance: f32,
    pub cycle_interval_ms: u32,
    pub relay_settle_ms: u32,
    pub temp_plausible_max_c: f32,
    pub channels: [ChannelConfig; DUT_CHANNEL_COUNT],
}

impl FixtureConfig {
    /// 設定を読み込み検証します
    ///
    /// 不正な定数 (ゼロや負の抵抗値など) は起動時の致命的エラーで、
    /// 測定ループに入る前に必ず検出されます
    pub fn load() -> Result<Self, ConfigError> {
        // toml_cfg によって生成された定数
        let config = CONFIG;

        validate_positive("vin_divider_scale", config.vin_divider_scale)
            .map_err(map_validation_error)?;
        validate_positive("vtest_divider_scale", config.vtest_divider_scale)
            .map_err(map_validation_error)?;
        validate_positive("temp_plausible_max_c", config.temp_plausible_max_c)
            .map_err(map_validation_error)?;
        validate_tolerance(config.relative_tolerance).map_err(map_validation_error)?;
        validate_channels(&DUT_CHANNELS, &[VIN_RAIL, VTEST_RAIL]).map_err(map_validation_error)?;

        Ok(Self {
            vin_rail: VIN_RAIL,
            vtest_rail: VTEST_RAIL,
            vin_scale: config.vin_divider_scale,
            vtest_scale: config.vtest_divider_scale,
            tolerance: config.relative_tolerance,
            cycle_interval_ms: config.cycle_interval_ms,
            relay_settle_ms: config.relay_settle_ms,
            temp_plausible_max_c: config.temp_plausible_max_c,
            channels: DUT_CHANNELS,
        })
    }

    /// モデル判別チャンネルの公称値 (判別不可時の表示目標)
    pub fn variant_nominal_kohm(&self) -> f32 {
        self.channels
            .iter()
            .find_map(|ch| match ch.target {
                ChannelTarget::ModelDependent { .. } => Some(ch.target.nominal_kohm()),
                ChannelTarget::Fixed(_) => None,
            })
            .unwrap_or(0.0)
    }
}

fn map_validation_error(err: ValidationError) -> ConfigError {
    match err {
        ValidationError::NonPositive { name, value } => ConfigError::NonPositive(name, value),
        ValidationError::InvalidTolerance(v) => ConfigError::InvalidTolerance(v),
        ValidationError::NonPositiveReference { label, kohm } => {
            ConfigError::InvalidReference(label, kohm)
        }
        ValidationError::NonPositiveTarget { label, kohm } => {
            ConfigError::InvalidTarget(label, kohm)
        }
        ValidationError::DuplicateLocation(location) => ConfigError::DuplicateLocation(location),
        ValidationError::VariantChannelCount(count) => ConfigError::VariantChannelCount(count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_accepts_builtin_table() {
        let config = FixtureConfig::load().unwrap();
        assert_eq!(config.channels.len(), DUT_CHANNEL_COUNT);
        assert!(config.vin_scale > 0.0);
        assert!(config.vtest_scale > 0.0);
        assert!(config.tolerance > 0.0 && config.tolerance < 1.0);
    }

    #[test]
    fn variant_channel_is_r5() {
        let config = FixtureConfig::load().unwrap();
        let variant = config
            .channels
            .iter()
            .find(|ch| matches!(ch.target, ChannelTarget::ModelDependent { .. }))
            .unwrap();
        assert_eq!(variant.label, "R5");
        assert_eq!(config.variant_nominal_kohm(), 174.0);
    }

    #[test]
    fn every_channel_has_its_own_input() {
        let config = FixtureConfig::load().unwrap();
        let mut locations = vec![config.vin_rail, config.vtest_rail];
        for ch in &config.channels {
            assert!(!locations.contains(&ch.location), "{} の入力が重複", ch.label);
            locations.push(ch.location);
        }
    }
}

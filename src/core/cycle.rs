use log::warn;

use crate::core::acquisition::{Acquisition, AcquisitionError};
use crate::core::channel::ChannelTarget;
use crate::core::classifier::{detect_model, IcModel, ModelDetection};
use crate::core::config::FixtureConfig;
use crate::core::resistance::divider_resistance_kohm;
use crate::core::tolerance::within_tolerance;

/// 分圧補正後のレール電圧
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailVoltages {
    pub vin_v: f32,
    pub vtest_v: f32,
}

/// 1チャンネルの読み値
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelReading {
    /// 換算済みの抵抗値 (kΩ)
    Measured(f32),
    /// 分圧が成立しない読み値 (プローブ未接触など)。
    /// 許容誤差超過の不合格とは区別して表示される
    NoContact,
}

/// 1チャンネルの測定結果
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelResult {
    pub label: &'static str,
    pub reading: ChannelReading,
    /// 合否判定に使った目標値 (kΩ)
    pub target_kohm: f32,
    pub pass: bool,
}

/// 1サイクル分の測定結果
///
/// すべての値はこのサイクルの読み値だけから導出される。
/// 前サイクルの状態は一切持ち越さない
#[derive(Debug, Clone, PartialEq)]
pub struct CycleResult {
    pub rails: RailVoltages,
    pub ambient_celsius: f32,
    pub detection: ModelDetection,
    pub channels: Vec<ChannelResult>,
}

impl CycleResult {
    pub fn all_pass(&self) -> bool {
        self.channels.iter().all(|ch| ch.pass)
    }
}

/// 測定サイクルを1回実行する
///
/// 1. 両レールのノード電圧を読み、分圧補正係数でレール電圧へ換算
/// 2. 各チャンネルのノード電圧を読み、分圧式で抵抗値へ換算
/// 3. モデル判別チャンネルで搭載ICのモデルを判別
/// 4. 各チャンネルを目標値(判別チャンネルは一致したモデルの公称値)と照合
///
/// バス障害はサイクル全体を中断する。一方、個々のチャンネルの無効な
/// 読み値はそのチャンネルを不合格にするだけで、残りのチャンネルの
/// 計算には影響しない
pub fn run_cycle<A: Acquisition>(
    acq: &mut A,
    config: &FixtureConfig,
) -> Result<CycleResult, AcquisitionError> {
    let vin_v = acq.read_channel(config.vin_rail)? * config.vin_scale;
    let vtest_v = acq.read_channel(config.vtest_rail)? * config.vtest_scale;
    let ambient_celsius = acq.read_temperature()?;

    let mut detection = ModelDetection {
        model: IcModel::Unknown,
        target_kohm: config.variant_nominal_kohm(),
    };

    let mut channels = Vec::with_capacity(config.channels.len());
    for ch in &config.channels {
        let node_v = acq.read_channel(ch.location)?;
        let result = match divider_resistance_kohm(vtest_v, node_v, ch.reference_kohm) {
            Ok(kohm) => {
                let target_kohm = match ch.target {
                    ChannelTarget::Fixed(target_kohm) => target_kohm,
                    ChannelTarget::ModelDependent {
                        model90_kohm,
                        model96_kohm,
                    } => {
                        detection =
                            detect_model(kohm, model90_kohm, model96_kohm, config.tolerance);
                        detection.target_kohm
                    }
                };
                ChannelResult {
                    label: ch.label,
                    reading: ChannelReading::Measured(kohm),
                    target_kohm,
                    pass: within_tolerance(kohm, target_kohm, config.tolerance),
                }
            }
            Err(e) => {
                warn!("{}: 無効な読み値のため不合格にします: {}", ch.label, e);
                ChannelResult {
                    label: ch.label,
                    reading: ChannelReading::NoContact,
                    target_kohm: ch.target.nominal_kohm(),
                    pass: false,
                }
            }
        };
        channels.push(result);
    }

    Ok(CycleResult {
        rails: RailVoltages { vin_v, vtest_v },
        ambient_celsius,
        detection,
        channels,
    })
}

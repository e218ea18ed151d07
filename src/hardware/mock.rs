use std::collections::{HashMap, HashSet};

use crate::core::acquisition::{Acquisition, AcquisitionError};
use crate::core::channel::ChannelLocation;

/// テスト用の取得アダプタモック
///
/// 実際のI2Cハードウェアなしで測定サイクルを再現します。
/// チャンネルごとの電圧と温度サンプルを差し替えられ、エラー注入で
/// バス障害もシミュレートできます。
#[derive(Debug, Default)]
pub struct MockAcquisition {
    readings: HashMap<ChannelLocation, f32>,
    /// 温度サンプルのキュー (先頭から消費、最後の値は繰り返し使用)
    temperatures: Vec<f32>,
    failing: HashSet<ChannelLocation>,
    fail_temperature: bool,
}

impl MockAcquisition {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用: チャンネル電圧を設定
    pub fn set_reading(&mut self, location: ChannelLocation, volts: f32) {
        self.readings.insert(location, volts);
    }

    /// テスト用: 温度サンプルをキューに追加
    pub fn queue_temperature(&mut self, celsius: f32) {
        self.temperatures.push(celsius);
    }

    /// テスト用: 指定チャンネルのバス障害をシミュレート
    pub fn set_channel_failure(&mut self, location: ChannelLocation, enable: bool) {
        if enable {
            self.failing.insert(location);
        } else {
            self.failing.remove(&location);
        }
    }

    /// テスト用: 温度センサー障害をシミュレート
    pub fn set_temperature_failure(&mut self, enable: bool) {
        self.fail_temperature = enable;
    }
}

impl Acquisition for MockAcquisition {
    fn read_channel(&mut self, location: ChannelLocation) -> Result<f32, AcquisitionError> {
        if self.failing.contains(&location) {
            return Err(AcquisitionError::AdcRead {
                converter: location.converter,
                input: location.input,
                detail: "simulated bus failure".to_string(),
            });
        }
        self.readings
            .get(&location)
            .copied()
            .ok_or_else(|| AcquisitionError::AdcRead {
                converter: location.converter,
                input: location.input,
                detail: "no queued reading".to_string(),
            })
    }

    fn read_temperature(&mut self) -> Result<f32, AcquisitionError> {
        if self.fail_temperature {
            return Err(AcquisitionError::Temperature(
                "simulated sensor failure".to_string(),
            ));
        }
        match self.temperatures.len() {
            0 => Err(AcquisitionError::Temperature(
                "no queued sample".to_string(),
            )),
            1 => Ok(self.temperatures[0]),
            _ => Ok(self.temperatures.remove(0)),
        }
    }
}

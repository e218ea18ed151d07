use thiserror::Error;

use crate::core::channel::{ChannelLocation, ConverterId};

/// 取得系のエラー
///
/// バスやセンサーの障害はこの型で測定コアへ伝え、当該サイクルを
/// 丸ごと中断させる。古い値やゼロ埋めで計算を続けてはならない
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AcquisitionError {
    #[error("ADC読み取りに失敗しました ({converter:?} AIN{input}): {detail}")]
    AdcRead {
        converter: ConverterId,
        input: u8,
        detail: String,
    },
    #[error("温度センサーの読み取りに失敗しました: {0}")]
    Temperature(String),
}

/// 取得アダプタのインターフェース
///
/// このトレイトを実装することで、実機用とテスト用(Mock)の
/// 実装を切り替えることができます。
pub trait Acquisition {
    /// 指定チャンネルの電圧(V)を読む
    fn read_channel(&mut self, location: ChannelLocation) -> Result<f32, AcquisitionError>;

    /// 周囲温度(℃)を読む
    ///
    /// 初回サンプルが妥当でない場合の読み直しポリシーは実装側が持つ
    fn read_temperature(&mut self) -> Result<f32, AcquisitionError>;
}

/// 温度サンプルの妥当性を判定する
///
/// 実機アダプタの「妥当範囲を外れたら1回だけ読み直す」ポリシーが
/// 使用する純粋関数
pub fn is_plausible_temperature(celsius: f32, min_c: f32, max_c: f32) -> bool {
    celsius.is_finite() && celsius >= min_c && celsius <= max_c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_temperature_is_plausible() {
        assert!(is_plausible_temperature(23.5, -55.0, 125.0));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(is_plausible_temperature(-55.0, -55.0, 125.0));
        assert!(is_plausible_temperature(125.0, -55.0, 125.0));
    }

    #[test]
    fn out_of_range_is_implausible() {
        assert!(!is_plausible_temperature(-60.0, -55.0, 125.0));
        assert!(!is_plausible_temperature(130.0, -55.0, 125.0));
    }

    #[test]
    fn non_finite_is_implausible() {
        assert!(!is_plausible_temperature(f32::NAN, -55.0, 125.0));
        assert!(!is_plausible_temperature(f32::INFINITY, -55.0, 125.0));
    }
}

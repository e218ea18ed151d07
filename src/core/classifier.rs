use crate::core::tolerance::within_tolerance;

/// 搭載ICのモデル判別結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcModel {
    /// R5公称174kΩの個体 (前期型)
    Model90,
    /// R5公称124kΩの個体 (後期型)
    Model96,
    /// どちらの公称値にも一致しない個体
    Unknown,
}

impl IcModel {
    pub fn display_name(&self) -> &'static str {
        match self {
            IcModel::Model90 => "90型",
            IcModel::Model96 => "96型",
            IcModel::Unknown => "判別不可",
        }
    }
}

/// モデル判別の結果と、合否判定に使う目標値の組
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelDetection {
    pub model: IcModel,
    /// 一致したモデルの公称値。判別不可のときは90型の公称値 (kΩ)
    pub target_kohm: f32,
}

/// モデル依存チャンネルの測定値から搭載ICのモデルを判別する
///
/// 各モデルの公称値に対し合否判定と同じ相対許容誤差で独立に照合する。
/// 両方に一致した場合は先に評価する90型を採用する(定義済みの優先順位)。
/// どちらにも一致しない場合は判別不可とし、90型の公称値を目標として
/// 返すことで下流の判定が必ず不合格になるようにする
pub fn detect_model(
    measured_kohm: f32,
    model90_kohm: f32,
    model96_kohm: f32,
    tolerance: f32,
) -> ModelDetection {
    if within_tolerance(measured_kohm, model90_kohm, tolerance) {
        ModelDetection {
            model: IcModel::Model90,
            target_kohm: model90_kohm,
        }
    } else if within_tolerance(measured_kohm, model96_kohm, tolerance) {
        ModelDetection {
            model: IcModel::Model96,
            target_kohm: model96_kohm,
        }
    } else {
        ModelDetection {
            model: IcModel::Unknown,
            target_kohm: model90_kohm,
        }
    }
}

/*!
 * # 90-96 アナログキャリブレーションIC ベンチテスター
 *
 * DUT上の6本の抵抗を分圧法で測定し、既知の目標値に対する合否判定と
 * 搭載ICのモデル判別を行うベンチ治具ファームウェア
 *
 * ## モジュール構成
 * - `core`: 測定パイプライン(抵抗換算、モデル判別、許容誤差判定、サイクル制御)
 * - `hardware`: ハードウェア制御(ADC/温度センサーの取得アダプタ、リレー制御)
 */

pub mod core;
pub mod hardware;

// 内部で使用する型をまとめてエクスポート
pub use self::core::acquisition::{Acquisition, AcquisitionError};
pub use self::core::channel::{ChannelConfig, ChannelLocation, ChannelTarget, ConverterId};
pub use self::core::classifier::{detect_model, IcModel, ModelDetection};
pub use self::core::config::{ConfigError, FixtureConfig};
pub use self::core::cycle::{run_cycle, ChannelReading, ChannelResult, CycleResult, RailVoltages};
pub use self::core::report::format_cycle;
pub use self::core::resistance::{divider_resistance_kohm, ReadingError};
pub use self::core::tolerance::within_tolerance;

/// ライブラリのバージョン情報
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

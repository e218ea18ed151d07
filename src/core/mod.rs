/// 測定コアモジュール
pub mod acquisition;
pub mod channel;
pub mod classifier;
pub mod config;
pub mod config_validation;
pub mod cycle;
pub mod report;
pub mod resistance;
pub mod tolerance;

pub use acquisition::{is_plausible_temperature, Acquisition, AcquisitionError};
pub use channel::{ChannelConfig, ChannelLocation, ChannelTarget, ConverterId};
pub use classifier::{detect_model, IcModel, ModelDetection};
pub use config::{ConfigError, FixtureConfig, DUT_CHANNEL_COUNT};
pub use cycle::{run_cycle, ChannelReading, ChannelResult, CycleResult, RailVoltages};
pub use report::{celsius_to_fahrenheit, format_cycle};
pub use resistance::{divider_resistance_kohm, ReadingError};
pub use tolerance::within_tolerance;

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{AnyOutputPin, Output, PinDriver};

/// リレー制御に関するエラー
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("リレーの初期化に失敗しました: {0}")]
    InitFailed(String),

    #[error("リレーの切替に失敗しました: {0}")]
    ControlFailed(String),
}

/// DUT接続リレーバンク
///
/// 3系統のリレーでDUTを測定レールへ接続します。各リレーは
/// 専用の出力ピンを持ちます。
pub struct RelayBank {
    relay1: PinDriver<'static, AnyOutputPin, Output>,
    relay2: PinDriver<'static, AnyOutputPin, Output>,
    relay3: PinDriver<'static, AnyOutputPin, Output>,
}

impl RelayBank {
    /// リレー出力を初期化します (すべて開放状態から開始)
    pub fn new(
        relay1: AnyOutputPin,
        relay2: AnyOutputPin,
        relay3: AnyOutputPin,
    ) -> Result<Self, RelayError> {
        let relay1 =
            PinDriver::output(relay1).map_err(|e| RelayError::InitFailed(format!("{:?}", e)))?;
        let relay2 =
            PinDriver::output(relay2).map_err(|e| RelayError::InitFailed(format!("{:?}", e)))?;
        let relay3 =
            PinDriver::output(relay3).map_err(|e| RelayError::InitFailed(format!("{:?}", e)))?;

        Ok(Self {
            relay1,
            relay2,
            relay3,
        })
    }

    /// DUTを測定レールへ接続し、接点が落ち着くまで待ちます
    pub fn connect_dut(&mut self, settle_ms: u32) -> Result<(), RelayError> {
        self.relay1
            .set_high()
            .map_err(|e| RelayError::ControlFailed(format!("{:?}", e)))?;
        self.relay2
            .set_high()
            .map_err(|e| RelayError::ControlFailed(format!("{:?}", e)))?;
        self.relay3
            .set_high()
            .map_err(|e| RelayError::ControlFailed(format!("{:?}", e)))?;
        FreeRtos::delay_ms(settle_ms);
        Ok(())
    }

    /// DUTを測定レールから切り離します
    pub fn disconnect_dut(&mut self) -> Result<(), RelayError> {
        self.relay1
            .set_low()
            .map_err(|e| RelayError::ControlFailed(format!("{:?}", e)))?;
        self.relay2
            .set_low()
            .map_err(|e| RelayError::ControlFailed(format!("{:?}", e)))?;
        self.relay3
            .set_low()
            .map_err(|e| RelayError::ControlFailed(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    // ハードウェア依存のためテストは省略
}

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::OutputPin;
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::prelude::*;
use log::{error, info};

use cal_ic_tester::hardware::fixture::FixtureSensors;
use cal_ic_tester::hardware::relays::RelayBank;
use cal_ic_tester::{format_cycle, run_cycle, FixtureConfig, VERSION};

/// アプリケーションのメインエントリーポイント
fn main() -> anyhow::Result<()> {
    // ESP-IDFの基本初期化
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    info!("cal-ic-tester v{} 起動", VERSION);

    // 設定の読み込みと検証 (不正な定数は起動時の致命的エラー)
    let fixture_config = FixtureConfig::load().map_err(|e| {
        error!("設定の検証に失敗しました: {}", e);
        anyhow::anyhow!("設定エラー: {}", e)
    })?;

    info!("ペリフェラルを初期化しています");
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // Port A (GPIO32/33) のI2CバスにADS1115×2とMCP9802が載っている
    let i2c_config = I2cConfig::new().baudrate(100.kHz().into());
    let i2c = I2cDriver::new(peripherals.i2c0, pins.gpio32, pins.gpio33, &i2c_config)?;

    // リレーでDUTを測定レールへ接続し、接点の安定を待つ
    let mut relays = RelayBank::new(
        pins.gpio19.downgrade_output(),
        pins.gpio25.downgrade_output(),
        pins.gpio26.downgrade_output(),
    )?;
    relays.connect_dut(fixture_config.relay_settle_ms)?;

    let mut sensors = FixtureSensors::new(i2c, &fixture_config)?;

    info!(
        "測定ループを開始します (周期 {} ms)",
        fixture_config.cycle_interval_ms
    );
    loop {
        match run_cycle(&mut sensors, &fixture_config) {
            Ok(result) => {
                for line in format_cycle(&result) {
                    info!("{}", line);
                }
            }
            Err(e) => {
                // バス障害はこのサイクルだけを破棄し、次周期で再試行する
                error!("測定サイクルを中断しました: {}", e);
            }
        }
        FreeRtos::delay_ms(fixture_config.cycle_interval_ms);
    }
}

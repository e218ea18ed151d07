use crate::core::classifier::IcModel;
use crate::core::cycle::{ChannelReading, CycleResult};

/// 摂氏から華氏へ換算する (表示専用)
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 1.8 + 32.0
}

/// 1サイクル分の測定結果を表示用のテキスト行に整形する
///
/// 画面レイアウトや配色は表示側の責務であり、ここでは行単位の
/// テキストだけを組み立てる
pub fn format_cycle(result: &CycleResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.channels.len() + 3);

    lines.push(format!(
        "Vin {:.2} V / Vtest {:.2} V / 周囲温度 {:.1} °C ({:.1} °F)",
        result.rails.vin_v,
        result.rails.vtest_v,
        result.ambient_celsius,
        celsius_to_fahrenheit(result.ambient_celsius),
    ));

    lines.push(match result.detection.model {
        IcModel::Unknown => "検出IC: 判別不可".to_string(),
        model => format!(
            "検出IC: {} ({:.1} kΩ)",
            model.display_name(),
            result.detection.target_kohm,
        ),
    });

    for ch in &result.channels {
        lines.push(match ch.reading {
            ChannelReading::Measured(kohm) => format!(
                "{}: {:.2} kΩ / 目標 {:.2} kΩ -> {}",
                ch.label,
                kohm,
                ch.target_kohm,
                verdict_text(ch.pass),
            ),
            ChannelReading::NoContact => format!(
                "{}: 接触不良 / 目標 {:.2} kΩ -> FAIL",
                ch.label, ch.target_kohm,
            ),
        });
    }

    lines.push(format!("総合判定: {}", verdict_text(result.all_pass())));
    lines
}

fn verdict_text(pass: bool) -> &'static str {
    if pass {
        "PASS"
    } else {
        "FAIL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::ModelDetection;
    use crate::core::cycle::{ChannelResult, RailVoltages};

    fn sample_result() -> CycleResult {
        CycleResult {
            rails: RailVoltages {
                vin_v: 12.2,
                vtest_v: 2.0,
            },
            ambient_celsius: 23.5,
            detection: ModelDetection {
                model: IcModel::Model90,
                target_kohm: 174.0,
            },
            channels: vec![
                ChannelResult {
                    label: "R1",
                    reading: ChannelReading::Measured(96.0),
                    target_kohm: 96.0,
                    pass: true,
                },
                ChannelResult {
                    label: "R5",
                    reading: ChannelReading::NoContact,
                    target_kohm: 174.0,
                    pass: false,
                },
            ],
        }
    }

    #[test]
    fn celsius_to_fahrenheit_reference_points() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
    }

    #[test]
    fn header_line_shows_rails_and_both_temperature_units() {
        let lines = format_cycle(&sample_result());
        assert_eq!(
            lines[0],
            "Vin 12.20 V / Vtest 2.00 V / 周囲温度 23.5 °C (74.3 °F)"
        );
    }

    #[test]
    fn detection_line_shows_model_and_target() {
        let lines = format_cycle(&sample_result());
        assert_eq!(lines[1], "検出IC: 90型 (174.0 kΩ)");
    }

    #[test]
    fn unknown_model_line_has_no_target() {
        let mut result = sample_result();
        result.detection = ModelDetection {
            model: IcModel::Unknown,
            target_kohm: 174.0,
        };
        let lines = format_cycle(&result);
        assert_eq!(lines[1], "検出IC: 判別不可");
    }

    #[test]
    fn channel_lines_distinguish_no_contact_from_fail() {
        let lines = format_cycle(&sample_result());
        assert_eq!(lines[2], "R1: 96.00 kΩ / 目標 96.00 kΩ -> PASS");
        assert_eq!(lines[3], "R5: 接触不良 / 目標 174.00 kΩ -> FAIL");
    }

    #[test]
    fn overall_verdict_fails_when_any_channel_fails() {
        let lines = format_cycle(&sample_result());
        assert_eq!(lines.last().unwrap(), "総合判定: FAIL");
    }

    #[test]
    fn overall_verdict_passes_when_all_channels_pass() {
        let mut result = sample_result();
        result.channels.pop();
        let lines = format_cycle(&result);
        assert_eq!(lines.last().unwrap(), "総合判定: PASS");
    }
}

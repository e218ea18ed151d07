use thiserror::Error;

/// 分圧が成立しない読み値に対するエラー
///
/// 測定レール電圧がノード電圧以下、またはノード電圧が負の場合は
/// 物理的に成立しない分圧であり、プローブ未接触などの異常を意味する。
/// infやNaNを下流へ流さず、この型で明示する
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ReadingError {
    #[error("分圧が成立しません (Vtest={v_test_v} V, Vnode={v_node_v} V)")]
    InvalidDivider { v_test_v: f32, v_node_v: f32 },
}

/// 分圧ノード電圧から未知抵抗を求める
///
/// 基準抵抗と未知抵抗が直列に測定レール電圧を分圧しているとき、
/// ノード電圧から未知側を逆算する:
///
/// `R_unknown = Vnode × Rref / (Vtest − Vnode)`
///
/// # Arguments
/// - `v_test_v`: 分圧補正後の測定レール電圧 (V)
/// - `v_node_v`: 基準抵抗と未知抵抗の接続点の電圧 (V)
/// - `reference_kohm`: 既知側の基準抵抗 (kΩ)
///
/// # Returns
/// - 未知抵抗 (kΩ)。`Vtest > Vnode >= 0` でない場合は `ReadingError`
///
/// # Examples
/// ```
/// use cal_ic_tester::core::resistance::divider_resistance_kohm;
///
/// // 96kΩの基準抵抗に対しノードがちょうど中点なら未知側も96kΩ
/// let kohm = divider_resistance_kohm(2.0, 1.0, 96.0).unwrap();
/// assert!((kohm - 96.0).abs() < 1e-3);
/// ```
pub fn divider_resistance_kohm(
    v_test_v: f32,
    v_node_v: f32,
    reference_kohm: f32,
) -> Result<f32, ReadingError> {
    let drop_v = v_test_v - v_node_v;
    if v_node_v < 0.0 || drop_v <= f32::EPSILON {
        return Err(ReadingError::InvalidDivider { v_test_v, v_node_v });
    }
    Ok(v_node_v * reference_kohm / drop_v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relative_error(actual: f32, expected: f32) -> f32 {
        (actual - expected).abs() / expected
    }

    #[test]
    fn midpoint_node_equals_reference() {
        let kohm = divider_resistance_kohm(2.0, 1.0, 96.0).unwrap();
        assert!(relative_error(kohm, 96.0) < 1e-4);
    }

    #[test]
    fn satisfies_divider_equation() {
        // 計算結果を順方向の分圧式に戻して一致を確認する
        let v_test = 2.0_f32;
        let reference = 174.2_f32;
        let v_node = 0.75_f32;
        let kohm = divider_resistance_kohm(v_test, v_node, reference).unwrap();
        let v_node_forward = v_test * kohm / (kohm + reference);
        assert!(relative_error(v_node_forward, v_node) < 1e-4);
    }

    #[test]
    fn low_node_voltage_reads_low_resistance() {
        let kohm = divider_resistance_kohm(2.0, 0.98, 96.0).unwrap();
        assert!(relative_error(kohm, 92.235) < 1e-3);
    }

    #[test]
    fn positive_and_finite_across_valid_range() {
        for v_node in [0.001_f32, 0.5, 1.0, 1.5, 1.9, 1.99] {
            let kohm = divider_resistance_kohm(2.0, v_node, 96.0).unwrap();
            assert!(kohm.is_finite());
            assert!(kohm > 0.0);
        }
    }

    #[test]
    fn grounded_node_reads_zero_resistance() {
        // ノードが0Vなら未知側は短絡 (0kΩ)。無効読み値ではない
        assert_eq!(divider_resistance_kohm(2.0, 0.0, 96.0), Ok(0.0));
    }

    #[test]
    fn equal_voltages_are_invalid() {
        let result = divider_resistance_kohm(2.0, 2.0, 96.0);
        assert_eq!(
            result,
            Err(ReadingError::InvalidDivider {
                v_test_v: 2.0,
                v_node_v: 2.0,
            })
        );
    }

    #[test]
    fn node_above_rail_is_invalid() {
        assert!(divider_resistance_kohm(2.0, 2.5, 96.0).is_err());
    }

    #[test]
    fn near_zero_denominator_is_invalid() {
        // 浮動小数点イプシロン以下の電圧差は無効扱い
        let v_node = 2.0 - f32::EPSILON / 2.0;
        assert!(divider_resistance_kohm(2.0, v_node, 96.0).is_err());
    }

    #[test]
    fn negative_node_voltage_is_invalid() {
        assert!(divider_resistance_kohm(2.0, -0.1, 96.0).is_err());
    }
}

/// 相対許容誤差による合否判定
///
/// `|computed − target| / target < tolerance` を厳密な不等号で評価する。
/// ちょうど許容誤差に一致する偏差は不合格
///
/// # Examples
/// ```
/// use cal_ic_tester::core::tolerance::within_tolerance;
///
/// assert!(within_tolerance(96.5, 96.0, 0.01));
/// assert!(!within_tolerance(92.2, 96.0, 0.01));
/// ```
pub fn within_tolerance(computed_kohm: f32, target_kohm: f32, tolerance: f32) -> bool {
    (computed_kohm - target_kohm).abs() / target_kohm < tolerance
}

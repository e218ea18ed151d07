use crate::core::channel::{ChannelConfig, ChannelLocation, ChannelTarget};

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NonPositive { name: &'static str, value: f32 },
    InvalidTolerance(f32),
    NonPositiveReference { label: &'static str, kohm: f32 },
    NonPositiveTarget { label: &'static str, kohm: f32 },
    DuplicateLocation(ChannelLocation),
    VariantChannelCount(usize),
}

pub fn validate_positive(name: &'static str, value: f32) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositive { name, value })
    }
}

pub fn validate_tolerance(tolerance: f32) -> Result<(), ValidationError> {
    if tolerance.is_finite() && tolerance > 0.0 && tolerance < 1.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidTolerance(tolerance))
    }
}

/// チャンネルテーブル全体の整合性を検証する
///
/// - 基準抵抗と目標値はすべて正値
/// - レールを含む全結線は一意 (同一入力の二重割り当てを起動時に弾く)
/// - モデル判別チャンネルはちょうど1つ
pub fn validate_channels(
    channels: &[ChannelConfig],
    rails: &[ChannelLocation],
) -> Result<(), ValidationError> {
    for ch in channels {
        if !(ch.reference_kohm.is_finite() && ch.reference_kohm > 0.0) {
            return Err(ValidationError::NonPositiveReference {
                label: ch.label,
                kohm: ch.reference_kohm,
            });
        }
        match ch.target {
            ChannelTarget::Fixed(kohm) => {
                if !(kohm.is_finite() && kohm > 0.0) {
                    return Err(ValidationError::NonPositiveTarget {
                        label: ch.label,
                        kohm,
                    });
                }
            }
            ChannelTarget::ModelDependent {
                model90_kohm,
                model96_kohm,
            } => {
                for kohm in [model90_kohm, model96_kohm] {
                    if !(kohm.is_finite() && kohm > 0.0) {
                        return Err(ValidationError::NonPositiveTarget {
                            label: ch.label,
                            kohm,
                        });
                    }
                }
            }
        }
    }

    let mut seen: Vec<ChannelLocation> = rails.to_vec();
    for ch in channels {
        if seen.contains(&ch.location) {
            return Err(ValidationError::DuplicateLocation(ch.location));
        }
        seen.push(ch.location);
    }

    let variant_count = channels
        .iter()
        .filter(|ch| matches!(ch.target, ChannelTarget::ModelDependent { .. }))
        .count();
    if variant_count != 1 {
        return Err(ValidationError::VariantChannelCount(variant_count));
    }

    Ok(())
}

use thiserror::Error;

/// Rejected tuning parameters or section lists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("anchor density divisor must be positive, got {0}")]
    DensityDivisor(f32),
    #[error("{name} range is empty or inverted: [{min}, {max})")]
    Range {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{name} must be in (0, 1], got {value}")]
    Fraction { name: &'static str, value: f32 },
    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("section id {0:?} appears more than once")]
    DuplicateSection(String),
}

pub(crate) fn check_range(name: &'static str, range: [f32; 2]) -> Result<(), ParamsError> {
    let [min, max] = range;
    if !(min.is_finite() && max.is_finite()) || min >= max || min < 0.0 {
        return Err(ParamsError::Range { name, min, max });
    }
    Ok(())
}

pub(crate) fn check_fraction(name: &'static str, value: f32) -> Result<(), ParamsError> {
    if !(value > 0.0 && value <= 1.0) {
        return Err(ParamsError::Fraction { name, value });
    }
    Ok(())
}

pub(crate) fn check_non_negative(name: &'static str, value: f32) -> Result<(), ParamsError> {
    if !(value >= 0.0) {
        return Err(ParamsError::Negative { name, value });
    }
    Ok(())
}

use core::fmt;

use crate::config::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricError {
    /// The I2S prescaler would have to divide by zero to reach the target.
    RatioRoundsToZero { ratio: f64 },
    /// Usually a zero target frequency.
    NonFiniteRatio,
}

impl fmt::Display for MetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricError::RatioRoundsToZero { ratio } => {
                write!(f, "prescaler ratio {ratio} rounds to zero")
            }
            MetricError::NonFiniteRatio => write!(f, "prescaler ratio is not finite"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MetricError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MetricError::RatioRoundsToZero { ratio } => {
                defmt::write!(fmt, "RatioRoundsToZero({})", ratio)
            }
            MetricError::NonFiniteRatio => defmt::write!(fmt, "NonFiniteRatio"),
        }
    }
}

/// Prescaler ratio the I2S peripheral would need to turn `output` into the target sample rate.
/// Mirrors the divider computation in the STM32 HAL's `HAL_I2S_Init`.
pub fn prescaler_ratio(output: f64, config: &SearchConfig) -> f64 {
    output / config.ratio_unit()
}

/// Rounds the way the HAL tooling does: to nearest, ties to even.
pub fn rounded_ratio(ratio: f64) -> Result<f64, MetricError> {
    if !ratio.is_finite() {
        return Err(MetricError::NonFiniteRatio);
    }

    let rounded = libm::rint(ratio);
    if rounded == 0.0 {
        return Err(MetricError::RatioRoundsToZero { ratio });
    }

    Ok(rounded)
}

/// Relative quantization error of the prescaler, in percent.
pub fn quantization_error(output: f64, config: &SearchConfig) -> Result<f64, MetricError> {
    let ratio = prescaler_ratio(output, config);
    let rounded = rounded_ratio(ratio)?;

    Ok(libm::fabs(100.0 * (ratio - rounded) / rounded))
}

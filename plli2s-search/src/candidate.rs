use core::fmt;

use crate::{
    config::SearchConfig,
    frequency,
    metric::{self, MetricError},
};

/// One PLLI2S setting that passed every band check, together with its derived clocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub m: u32,
    pub n: u32,
    pub r: u32,
    /// Hz
    pub pll_in: f64,
    /// Hz
    pub vco: f64,
    /// Hz
    pub output: f64,
    /// Percent
    pub error: f64,
}

impl Candidate {
    /// Output frequency derived from M, N and R alone.
    pub fn recompute_output(&self, config: &SearchConfig) -> f64 {
        let pll_in = frequency::pll_input(config.crystal, self.m);
        frequency::output(frequency::vco(pll_in, self.n), self.r)
    }

    /// The integer division ratio the I2S prescaler ends up programmed with.
    pub fn prescaler_ratio(&self, config: &SearchConfig) -> Result<u32, MetricError> {
        metric::rounded_ratio(metric::prescaler_ratio(self.output, config)).map(|r| r as u32)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M={:2}, N={:3}, R={}: OUT={:8.4} MHz  => error={:.8} %",
            self.m,
            self.n,
            self.r,
            self.output / 1e6,
            self.error
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Candidate {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Candidate {{ M: {}, N: {}, R: {}, OUT: {} Hz, error: {} % }}",
            self.m,
            self.n,
            self.r,
            self.output,
            self.error
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::presets::STM32F4_48KHZ;

    fn candidate() -> Candidate {
        Candidate {
            m: 5,
            n: 192,
            r: 5,
            pll_in: 1_600_000.0,
            vco: 307_200_000.0,
            output: 61_440_000.0,
            error: 0.0,
        }
    }

    #[test]
    fn report_line_layout() {
        assert_eq!(
            candidate().to_string(),
            "M= 5, N=192, R=5: OUT= 61.4400 MHz  => error=0.00000000 %"
        );
    }

    #[test]
    fn prescaler_of_exact_candidate() {
        assert_eq!(candidate().prescaler_ratio(&STM32F4_48KHZ), Ok(5));
        assert_eq!(candidate().recompute_output(&STM32F4_48KHZ), 61_440_000.0);
    }
}

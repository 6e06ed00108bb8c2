use core::ops::Range;

use fugit::HertzU32;

/// Closed frequency band `[min, max]`. A band with `min > max` admits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub min: HertzU32,
    pub max: HertzU32,
}

impl Band {
    pub const fn new(min: HertzU32, max: HertzU32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, frequency: f64) -> bool {
        self.min.raw() as f64 <= frequency && frequency <= self.max.raw() as f64
    }
}

/// Width of one I2S data word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Bits16,
    Bits32,
}

impl DataFormat {
    /// Bits per frame. Standard, MSB and LSB justified framing always carry two channels.
    pub const fn packet_bits(self) -> u32 {
        match self {
            DataFormat::Bits16 => 16 * 2,
            DataFormat::Bits32 => 32 * 2,
        }
    }
}

/// Everything the search needs to know about the clock tree and the goal.
///
/// The divider ranges are half open, straight from the reference manual (`2..64` covers
/// PLLM = 2 up to and including 63). The frequency bands are closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// External crystal (HSE)
    pub crystal: HertzU32,
    /// Desired audio sample rate
    pub target: HertzU32,
    pub format: DataFormat,
    /// Whether the I2S peripheral also drives MCLK
    pub mclk_output: bool,

    /// f_HSE / PLLM
    pub pll_in: Band,
    pub vco: Band,
    /// PLLI2S output, i.e. the I2S kernel clock
    pub output: Band,

    pub m_range: Range<u32>,
    pub n_range: Range<u32>,
    pub r_range: Range<u32>,

    /// How many of the best configurations end up in the report
    pub top_results: usize,
}

impl SearchConfig {
    /// Extra division applied inside the I2S peripheral when MCLK is output at 256 * fs.
    pub const fn oversample_factor(&self) -> u32 {
        match (self.mclk_output, self.format) {
            (false, _) => 1,
            (true, DataFormat::Bits16) => 8,
            (true, DataFormat::Bits32) => 4,
        }
    }

    /// Output frequency per unit of the I2S prescaler ratio.
    pub fn ratio_unit(&self) -> f64 {
        let divider = self.format.packet_bits() * self.oversample_factor();
        divider as f64 * self.target.raw() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::STM32F4_48KHZ;

    #[test]
    fn band_is_closed() {
        let band = Band::new(HertzU32::Hz(10), HertzU32::Hz(20));
        assert!(band.contains(10.0));
        assert!(band.contains(20.0));
        assert!(!band.contains(9.999));
        assert!(!band.contains(20.001));
    }

    #[test]
    fn inverted_band_is_empty() {
        let band = Band::new(HertzU32::Hz(20), HertzU32::Hz(10));
        assert!(!band.contains(15.0));
        assert!(!band.contains(10.0));
        assert!(!band.contains(20.0));
    }

    #[test]
    fn oversampling_keeps_mclk_at_256_fs() {
        let mut config = STM32F4_48KHZ;

        config.format = DataFormat::Bits16;
        config.mclk_output = true;
        assert_eq!(config.format.packet_bits() * config.oversample_factor(), 256);

        config.format = DataFormat::Bits32;
        assert_eq!(config.format.packet_bits() * config.oversample_factor(), 256);

        config.mclk_output = false;
        assert_eq!(config.oversample_factor(), 1);
        assert_eq!(config.ratio_unit(), 64.0 * 48_000.0);
    }
}

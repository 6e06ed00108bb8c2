//! Search settings for the STM32F4 PLLI2S.
//!
//! Limits come from the STM32F4 reference manual, except the output band which is kept broad
//! (but not insane) so that the I2S prescaler still has something to work with.

use fugit::HertzU32;

use crate::config::{Band, DataFormat, SearchConfig};

pub const HSE_FREQ_HZ: HertzU32 = HertzU32::from_raw(8_000_000u32);

pub const PLL_IN_BAND: Band = Band::new(
    HertzU32::from_raw(950_000u32),
    HertzU32::from_raw(2_100_000u32),
);
pub const VCO_BAND: Band = Band::new(
    HertzU32::from_raw(100_000_000u32),
    HertzU32::from_raw(432_000_000u32),
);
pub const I2S_BAND: Band = Band::new(
    HertzU32::from_raw(43_008_000u32),
    HertzU32::from_raw(216_000_000u32),
);

pub const TOP_RESULTS: usize = 15;

pub const STM32F4_48KHZ: SearchConfig = SearchConfig {
    crystal: HSE_FREQ_HZ,
    target: HertzU32::from_raw(48_000u32),
    format: DataFormat::Bits16,
    mclk_output: true,
    pll_in: PLL_IN_BAND,
    vco: VCO_BAND,
    output: I2S_BAND,
    m_range: 2..64,
    n_range: 192..433,
    r_range: 2..8,
    top_results: TOP_RESULTS,
};

pub const STM32F4_44K1HZ: SearchConfig = SearchConfig {
    target: HertzU32::from_raw(44_100u32),
    ..STM32F4_48KHZ
};

pub const STM32F4_96KHZ: SearchConfig = SearchConfig {
    target: HertzU32::from_raw(96_000u32),
    ..STM32F4_48KHZ
};

//! The three stages of the PLLI2S clock path.
//!
//! ```text
//! HSE --/M--> PLL in --*N--> VCO --/R--> I2S clock
//! ```

use fugit::HertzU32;

pub fn pll_input(crystal: HertzU32, m: u32) -> f64 {
    crystal.raw() as f64 / m as f64
}

pub fn vco(pll_in: f64, n: u32) -> f64 {
    pll_in * n as f64
}

pub fn output(vco: f64, r: u32) -> f64 {
    vco / r as f64
}

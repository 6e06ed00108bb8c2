use alloc::vec::Vec;
use core::fmt;

use log::{debug, info, trace};

use crate::{candidate::Candidate, config::SearchConfig, frequency, metric};

/// Every PLLM whose input frequency lands in the PLL input band, with that frequency.
pub fn input_stage(config: &SearchConfig) -> impl Iterator<Item = (u32, f64)> + '_ {
    config
        .m_range
        .clone()
        .map(move |m| (m, frequency::pll_input(config.crystal, m)))
        .filter(move |&(m, pll_in)| {
            let in_band = config.pll_in.contains(pll_in);
            if !in_band {
                trace!("M={m}: PLL input {pll_in} Hz out of band");
            }
            in_band
        })
}

pub fn vco_stage(config: &SearchConfig, pll_in: f64) -> impl Iterator<Item = (u32, f64)> + '_ {
    config
        .n_range
        .clone()
        .map(move |n| (n, frequency::vco(pll_in, n)))
        .filter(move |&(n, vco)| {
            let in_band = config.vco.contains(vco);
            if !in_band {
                trace!("N={n}: VCO {vco} Hz out of band");
            }
            in_band
        })
}

pub fn output_stage(config: &SearchConfig, vco: f64) -> impl Iterator<Item = (u32, f64)> + '_ {
    config
        .r_range
        .clone()
        .map(move |r| (r, frequency::output(vco, r)))
        .filter(move |&(r, output)| {
            let in_band = config.output.contains(output);
            if !in_band {
                trace!("R={r}: output {output} Hz out of band");
            }
            in_band
        })
}

/// Lazily walks M (outer), N, R (inner), skipping a branch as soon as one of its stages leaves
/// its band. Settings whose prescaler error is undefined are dropped.
pub fn candidates(config: &SearchConfig) -> impl Iterator<Item = Candidate> + '_ {
    input_stage(config).flat_map(move |(m, pll_in)| {
        vco_stage(config, pll_in).flat_map(move |(n, vco)| {
            output_stage(config, vco).filter_map(move |(r, output)| {
                match metric::quantization_error(output, config) {
                    Ok(error) => Some(Candidate {
                        m,
                        n,
                        r,
                        pll_in,
                        vco,
                        output,
                        error,
                    }),
                    Err(e) => {
                        debug!("M={m}, N={n}, R={r}: rejected, {e}");
                        None
                    }
                }
            })
        })
    })
}

/// Stable sort by error, so equal errors keep their enumeration order.
pub fn rank(candidates: impl IntoIterator<Item = Candidate>) -> Vec<Candidate> {
    let mut ranked: Vec<Candidate> = candidates.into_iter().collect();
    ranked.sort_by(|a, b| a.error.total_cmp(&b.error));
    ranked
}

pub fn search(config: &SearchConfig) -> Report {
    let ranked = rank(candidates(config));
    info!(
        "{} valid PLLI2S configurations for {} Hz",
        ranked.len(),
        config.target.raw()
    );

    Report::new(ranked, config.top_results)
}

/// All valid configurations, best first. Displays as the console report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    ranked: Vec<Candidate>,
    top_results: usize,
}

impl Report {
    pub fn new(ranked: Vec<Candidate>, top_results: usize) -> Self {
        Self {
            ranked,
            top_results,
        }
    }

    pub fn ranked(&self) -> &[Candidate] {
        &self.ranked
    }

    pub fn best(&self) -> &[Candidate] {
        &self.ranked[..self.top_results.min(self.ranked.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No valid PLLI2S configuration found with current constraints.");
        }

        let best = self.best();
        writeln!(f)?;
        writeln!(f, "Top {} closest PLLI2S configurations:", best.len())?;
        writeln!(f)?;
        for candidate in best {
            writeln!(f, "{candidate}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::presets::STM32F4_48KHZ;

    fn with_error(m: u32, error: f64) -> Candidate {
        Candidate {
            m,
            n: 200,
            r: 2,
            pll_in: 0.0,
            vco: 0.0,
            output: 0.0,
            error,
        }
    }

    #[test]
    fn input_stage_keeps_dividers_in_band() {
        // 8 MHz / M within [0.95, 2.1] MHz
        let ms: Vec<u32> = input_stage(&STM32F4_48KHZ).map(|(m, _)| m).collect();
        assert_eq!(ms, vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn vco_stage_caps_multiplier() {
        // 2 MHz * N <= 432 MHz
        let ns: Vec<u32> = vco_stage(&STM32F4_48KHZ, 2_000_000.0)
            .map(|(n, _)| n)
            .collect();
        assert_eq!(ns.first(), Some(&192));
        assert_eq!(ns.last(), Some(&216));
    }

    #[test]
    fn rank_is_stable() {
        let ranked = rank(vec![
            with_error(1, 0.5),
            with_error(2, 0.1),
            with_error(3, 0.5),
            with_error(4, 0.1),
        ]);

        let ms: Vec<u32> = ranked.iter().map(|c| c.m).collect();
        assert_eq!(ms, vec![2, 4, 1, 3]);
    }

    #[test]
    fn best_is_capped_by_count() {
        let report = Report::new(vec![with_error(1, 0.0), with_error(2, 1.0)], 15);
        assert_eq!(report.best().len(), 2);

        let report = Report::new(vec![with_error(1, 0.0), with_error(2, 1.0)], 1);
        assert_eq!(report.best().len(), 1);
        assert_eq!(report.ranked().len(), 2);
    }
}

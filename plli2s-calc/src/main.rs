use env_logger::{Builder, Env};
use log::{debug, LevelFilter};
use plli2s_search::{presets, search, SearchConfig};

// Swap in another preset (or tweak a copy of one) to search for a different clock.
const CONFIG: SearchConfig = presets::STM32F4_48KHZ;

fn main() {
    Builder::from_env(Env::default().default_filter_or(LevelFilter::Warn.to_string())).init();

    debug!("Searching with {:?}", CONFIG);

    let report = search(&CONFIG);

    for candidate in report.best() {
        debug!(
            "M={}, N={}, R={}: PLL in {} Hz, VCO {} Hz, prescaler {:?}",
            candidate.m,
            candidate.n,
            candidate.r,
            candidate.pll_in,
            candidate.vco,
            candidate.prescaler_ratio(&CONFIG)
        );
    }

    print!("{report}");
}

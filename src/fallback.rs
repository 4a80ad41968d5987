//! Ordered fallback strategies
//!
//! Freehand reconstruction and ring repair both follow a "try the good
//! algorithm, then progressively cruder ones" policy. Modeling that as an
//! ordered list of strategies keeps the chains flat and makes the chosen
//! strategy visible in the logs.

use log::debug;

/// A named attempt in a fallback chain.
pub struct Strategy<'a, T> {
    pub name: &'static str,
    pub run: Box<dyn FnMut() -> Option<T> + 'a>,
}

impl<'a, T> Strategy<'a, T> {
    pub fn new(name: &'static str, run: impl FnMut() -> Option<T> + 'a) -> Self {
        Self {
            name,
            run: Box::new(run),
        }
    }
}

/// Run strategies in order and return the first success, logging which one
/// produced the result. `None` means every strategy failed.
pub fn try_each<T>(label: &str, strategies: Vec<Strategy<'_, T>>) -> Option<T> {
    for mut strategy in strategies {
        if let Some(value) = (strategy.run)() {
            debug!("{label}: used {} strategy", strategy.name);
            return Some(value);
        }
        debug!("{label}: {} strategy failed, falling back", strategy.name);
    }
    None
}

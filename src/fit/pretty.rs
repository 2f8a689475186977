//! Search for "pretty" coefficients near an optimizer result.
//!
//! Every non-integral coefficient is tried as its floor, its ceiling and its
//! original value; integral coefficients are kept. The full cartesian product
//! (3^k candidates for k non-integral coefficients) is evaluated, so the search
//! is capped at [`MAX_PRETTY_PARAMS`] non-integral coefficients.

use tracing::{debug, warn};

/// Largest number of non-integral coefficients the search will enumerate.
pub const MAX_PRETTY_PARAMS: usize = 10;

/// Result of [`prettify`].
#[derive(Debug, Clone, PartialEq)]
pub enum PrettySearch {
    /// A candidate strictly lowered the loss.
    Improved { params: Vec<f64>, loss: f64 },
    /// No candidate beat the original coefficients.
    Unchanged,
    /// Too many non-integral coefficients; nothing was evaluated.
    Skipped { free_params: usize },
}

/// Enumerates floor/ceil/original combinations of `params` under `loss`.
pub fn prettify<F>(params: &[f64], loss: F) -> PrettySearch
where
    F: Fn(&[f64]) -> f64,
{
    let options: Vec<Vec<f64>> = params
        .iter()
        .map(|&p| if p == p.floor() { vec![p] } else { vec![p.floor(), p.ceil(), p] })
        .collect();

    let free_params = options.iter().filter(|o| o.len() > 1).count();
    if free_params > MAX_PRETTY_PARAMS {
        warn!(free_params, max = MAX_PRETTY_PARAMS, "skipping pretty-coefficient search");
        return PrettySearch::Skipped { free_params };
    }

    let total: usize = options.iter().map(Vec::len).product();
    let mut best_loss = loss(params);
    let mut best: Option<Vec<f64>> = None;
    let mut candidate = params.to_vec();

    for combination in 0..total {
        // Mixed-radix decode of `combination` into one option per coefficient.
        let mut rest = combination;
        for (slot, opts) in candidate.iter_mut().zip(options.iter()) {
            *slot = opts[rest % opts.len()];
            rest /= opts.len();
        }

        let candidate_loss = loss(&candidate);
        if candidate_loss < best_loss {
            best_loss = candidate_loss;
            best = Some(candidate.clone());
        }
    }

    debug!(candidates = total, improved = best.is_some(), "pretty-coefficient search done");

    match best {
        Some(params) => PrettySearch::Improved { params, loss: best_loss },
        None => PrettySearch::Unchanged,
    }
}

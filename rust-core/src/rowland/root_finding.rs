use thiserror::Error;

use crate::config::{ROOT_MAX_ITER, ROOT_RTOL, ROOT_XTOL};

/// Failure modes of the bracketing root finder
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RootFindingError {
    /// f(a) and f(b) have the same sign, so the interval does not bracket a root
    #[error("f(a) and f(b) must have different signs (f({a}) = {fa}, f({b}) = {fb})")]
    NotBracketed { a: f64, b: f64, fa: f64, fb: f64 },

    /// Iteration budget exhausted before the bracket shrank below tolerance
    #[error("Failed to converge after {iterations} iterations (last estimate {estimate})")]
    NoConvergence { iterations: usize, estimate: f64 },

    /// The function returned NaN or an infinite value
    #[error("Function value is not finite at x = {x}")]
    NonFinite { x: f64 },
}

/// Result of a converged root search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootEstimate {
    pub root: f64,
    pub iterations: usize,
    pub function_calls: usize,
}

/// Find a root of `f` in `[a, b]` with Brent's method using the default tolerances.
pub fn find_root<F>(f: F, interval: [f64; 2]) -> Result<RootEstimate, RootFindingError>
where
    F: FnMut(f64) -> f64,
{
    brentq(f, interval[0], interval[1], ROOT_XTOL, ROOT_RTOL, ROOT_MAX_ITER)
}

/// Brent's bracketing root finder.
///
/// Combines inverse quadratic interpolation and secant steps with bisection as a
/// fallback, so the bracket always shrinks and the number of iterations is bounded
/// by `max_iter`. The interval must bracket a sign change; it may contain only one
/// root for the result to be meaningful, since the method cannot tell which one
/// of several roots it converges to.
///
/// # Arguments
/// * `f` - Function whose root is searched
/// * `a`, `b` - Interval ends (any order)
/// * `xtol`, `rtol` - Absolute and relative tolerance on the root position
/// * `max_iter` - Iteration budget
pub fn brentq<F>(
    mut f: F,
    a: f64,
    b: f64,
    xtol: f64,
    rtol: f64,
    max_iter: usize,
) -> Result<RootEstimate, RootFindingError>
where
    F: FnMut(f64) -> f64,
{
    let mut eval = |x: f64, calls: &mut usize| -> Result<f64, RootFindingError> {
        *calls += 1;
        let value = f(x);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(RootFindingError::NonFinite { x })
        }
    };

    let mut calls = 0;
    let mut xpre = a;
    let mut xcur = b;
    let mut fpre = eval(xpre, &mut calls)?;
    let mut fcur = eval(xcur, &mut calls)?;

    if fpre == 0.0 {
        return Ok(RootEstimate { root: xpre, iterations: 0, function_calls: calls });
    }
    if fcur == 0.0 {
        return Ok(RootEstimate { root: xcur, iterations: 0, function_calls: calls });
    }
    if fpre.is_sign_negative() == fcur.is_sign_negative() {
        return Err(RootFindingError::NotBracketed { a, b, fa: fpre, fb: fcur });
    }

    // xblk is the contrapoint: f(xblk) and f(xcur) always have opposite signs
    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for iteration in 0..max_iter {
        if fpre != 0.0 && fcur != 0.0 && fpre.is_sign_negative() != fcur.is_sign_negative() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (xtol + rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(RootEstimate {
                root: xcur,
                iterations: iteration + 1,
                function_calls: calls,
            });
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // interpolate
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // extrapolate
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };
            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                // good short step
                spre = scur;
                scur = stry;
            } else {
                // bisect
                spre = sbis;
                scur = sbis;
            }
        } else {
            // bisect
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }
        fcur = eval(xcur, &mut calls)?;
    }

    Err(RootFindingError::NoConvergence {
        iterations: max_iter,
        estimate: xcur,
    })
}

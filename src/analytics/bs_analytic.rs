// src/analytics/bs_analytic.rs
//! Closed-form Black-Scholes prices, used as the reference a risk-neutral
//! Monte Carlo estimate must converge to.
//!
//! ```text
//! C(S,K,r,σ,T) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
//! P(S,K,r,σ,T) = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
//! d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
//! d₂ = d₁ - σ√T
//! ```
//!
//! At T = 0 or σ = 0 the formulas degenerate to the discounted intrinsic
//! value of the forward, which is returned directly.

use crate::math_utils::norm_cdf;

fn d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-Scholes European call option price
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let discounted_k = k * (-r * t).exp();
    if sigma * t.sqrt() <= 0.0 || k <= 0.0 {
        return (s - discounted_k).max(0.0);
    }
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    s * norm_cdf(d1) - discounted_k * norm_cdf(d2)
}

/// Black-Scholes European put option price
pub fn bs_put_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let discounted_k = k * (-r * t).exp();
    if sigma * t.sqrt() <= 0.0 || k <= 0.0 {
        return (discounted_k - s).max(0.0);
    }
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    discounted_k * norm_cdf(-d2) - s * norm_cdf(-d1)
}

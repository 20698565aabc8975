pub mod convergence;
pub mod payoffs;
pub mod pricer;

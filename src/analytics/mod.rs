pub mod bs_analytic;
pub mod path_summary;

//! SAT formula model, DIMACS exchange format and random generation

pub mod dimacs;
pub mod formula;
pub mod generator;

pub use dimacs::{load_formula_from_file, parse_dimacs, parse_dimacs_str, save_formula_to_file, write_dimacs};
pub use formula::{Clause, Formula, Literal};
pub use generator::seed_from_str;

mod plot;
mod run;

pub use plot::plot;
pub use run::run;

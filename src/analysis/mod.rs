pub mod metrics;
pub mod report;

pub use metrics::{displacement, kinetic_energy, Extrema};
pub use report::{analyze, analyze_file, analyze_files, analyze_with_mass, AnalysisReport, ChartSeries, FileAnalysis, Summary};

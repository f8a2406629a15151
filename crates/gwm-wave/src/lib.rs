#![deny(missing_docs)]
#![doc = "Mode-indexed gravitational-wave signals: metadata, unit conversion, windowing and spherical-harmonic recombination."]

mod convert;
pub mod eccentricity;
pub mod harmonics;
/// Waveform interchange records.
pub mod io;
pub mod metadata;
pub mod params;
pub mod series;
pub mod sources;
pub mod spline;
pub mod synthetic;
pub mod units;
pub mod waveform;
pub mod window;

pub use eccentricity::PolarModeSeries;
pub use gwm_core::{ErrorInfo, Mode, WaveError};
pub use harmonics::{spin_weighted_harmonic, strain_harmonic};
pub use io::{ModeRecord, WaveformRecord};
pub use metadata::{DimensionalParams, Metadata, MetadataParams};
pub use params::normalize;
pub use sources::{CatalogRecord, ModeSeries, ModelEvaluator, ModelRequest, SimulationCatalog};
pub use synthetic::SyntheticModel;
pub use waveform::Waveform;
pub use window::frequency_window;

/// Main configuration module.
///
/// `sim` holds the fixed simulation constants, `runtime` the settings
/// chosen on the command line.
pub mod sim;
pub mod runtime;

pub use runtime::SimConfig;

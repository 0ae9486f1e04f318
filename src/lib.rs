pub mod cli;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod events;
pub mod logging;
pub mod report;
pub mod settings;
pub mod state;
pub mod supplemental;
pub mod time;
pub mod upload;
pub mod utils;

pub use report::{Reporter, ResultsReporter, RunOutcome};
pub use settings::LaunchSettings;
pub use state::{CaseResult, RunPayload, Step, TestCase};
pub use supplemental::{Annotator, CaseHandle};
pub use upload::{ResultsClient, UploadError, UploadResponse};

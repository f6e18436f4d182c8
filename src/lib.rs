pub mod config;
pub mod inputs;
pub mod metadata;
pub mod observability;
pub mod persist;
pub mod placement;
pub mod series;
pub mod thumbnail;
pub mod validation;
pub mod video;
pub mod workflow;

pub use config::Settings;
pub use metadata::{MetadataRecord, MetadataRequest, MetadataStore, Template};
pub use series::{SeriesError, SeriesRegistry};
pub use thumbnail::ThumbnailGenerator;
pub use video::{CommandRunner, Invocation, MediaError, SystemRunner, VideoProcessor};
pub use workflow::{Workflow, WorkflowOutcome, WorkflowRequest};

pub mod media;
pub mod pipeline;
pub mod stages;
pub mod tracks;

pub use media::MediaCleaner;
pub use pipeline::{process, CatalogPipeline, PipelineOutcome, ProcessedCatalog};
pub use stages::{StageCount, StageLog};
pub use tracks::TrackCleaner;

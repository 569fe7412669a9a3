use docqa_pipeline::RagPipeline;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RagPipeline>,
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(pipeline: Arc<RagPipeline>, upload_dir: PathBuf) -> Self {
        Self { pipeline, upload_dir }
    }
}

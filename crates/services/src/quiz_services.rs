use std::sync::Arc;

use crate::config::QuizApiConfig;
use crate::quiz_api_service::QuizApiService;
use crate::resume_service::SessionResumeService;
use crate::transport::{HttpTransport, QuizTransport};

/// Assembles the caller-facing services over one shared transport.
#[derive(Clone)]
pub struct QuizServices {
    api: Arc<QuizApiService>,
    resume: Arc<SessionResumeService>,
}

impl QuizServices {
    /// Build services that talk to a live quiz service over HTTP.
    #[must_use]
    pub fn http(config: QuizApiConfig) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new(config)))
    }

    #[must_use]
    pub fn with_transport(transport: Arc<dyn QuizTransport>) -> Self {
        Self {
            api: Arc::new(QuizApiService::new(Arc::clone(&transport))),
            resume: Arc::new(SessionResumeService::new(transport)),
        }
    }

    #[must_use]
    pub fn api(&self) -> Arc<QuizApiService> {
        Arc::clone(&self.api)
    }

    #[must_use]
    pub fn resume(&self) -> Arc<SessionResumeService> {
        Arc::clone(&self.resume)
    }
}

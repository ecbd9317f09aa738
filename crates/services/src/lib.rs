#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod paths;
pub mod quiz_api_service;
pub mod quiz_services;
pub mod resume_service;
pub mod transport;

pub use config::QuizApiConfig;
pub use error::QuizApiError;
pub use quiz_api_service::QuizApiService;
pub use quiz_services::QuizServices;
pub use resume_service::SessionResumeService;
pub use transport::{ApiResponse, HttpTransport, InMemoryTransport, Method, QuizTransport};

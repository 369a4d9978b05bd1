#![forbid(unsafe_code)]

pub mod analysis_service;
pub mod app_services;
pub mod auth_service;
pub mod error;
pub mod gateway;
pub mod language_model;
pub mod speech;
pub mod tab_service;

pub use study_core::Clock;

pub use analysis_service::AnalysisService;
pub use app_services::AppServices;
pub use auth_service::CredentialCheck;
pub use error::{
    AnalysisError, AppServicesError, GatewayError, LanguageModelError, SpeechError,
    TabServiceError,
};
pub use gateway::{HttpGateway, LocalGateway, StudyGateway};
pub use language_model::{AnthropicClient, LanguageModel, LanguageModelConfig};
pub use speech::{
    CallbackListener, Dictation, SpeechCapability, SpeechEvent, SpeechListener, UnavailableSpeech,
};
pub use tab_service::{SavedFields, TabService};

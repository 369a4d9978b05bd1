use dioxus::prelude::*;
use services::TabServiceError;
use study_core::model::TabError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// Tab state could not be read or written.
    Storage,
    /// Tried to close the only open tab.
    LastTab,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Storage => "Your tabs could not be saved. Please try again.",
            ViewError::LastTab => "At least one tab must stay open.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<TabServiceError> for ViewError {
    fn from(err: TabServiceError) -> Self {
        match err {
            TabServiceError::Tab(TabError::LastTab) => ViewError::LastTab,
            TabServiceError::Storage(_) => ViewError::Storage,
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

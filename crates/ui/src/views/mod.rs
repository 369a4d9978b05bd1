mod login;
mod state;
mod study_helper;
mod tab_content;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use login::LoginView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use study_helper::StudyHelperView;
pub use tab_content::TabContent;
#[cfg(test)]
pub(crate) use tab_content::use_release_speech;

mod feedback_vm;
mod form_vm;
mod login_vm;
mod tab_vm;
mod time_fmt;

pub use feedback_vm::{FeedbackTone, FeedbackVm};
pub use form_vm::{
    GRADE_OPTIONS, OptionVm, can_analyze, grade_options, language_options,
    level_options, recording_label,
};
pub use login_vm::{LOGIN_FAILED_MESSAGE, LOGIN_REJECTED_MESSAGE, LoginOutcome, login_outcome};
pub use tab_vm::{TabChipVm, map_tab_chips};
pub use time_fmt::format_last_saved;

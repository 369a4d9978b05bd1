use study_core::model::{Accuracy, Language, TabFields};

/// Selectable school grades.
pub const GRADE_OPTIONS: [u8; 8] = [5, 6, 7, 8, 9, 10, 11, 12];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Grade options with a leading empty choice.
#[must_use]
pub fn grade_options(current: &str) -> Vec<OptionVm> {
    std::iter::once(OptionVm {
        value: String::new(),
        label: "Select grade...".to_string(),
        selected: current.is_empty(),
    })
    .chain(GRADE_OPTIONS.iter().map(|grade| {
        let value = grade.to_string();
        OptionVm {
            selected: current == value,
            label: format!("{grade}. Klasse"),
            value,
        }
    }))
    .collect()
}

#[must_use]
pub fn language_options(current: Language) -> Vec<OptionVm> {
    Language::ALL
        .iter()
        .map(|language| OptionVm {
            value: language.as_str().to_string(),
            label: language.native_name().to_string(),
            selected: *language == current,
        })
        .collect()
}

/// The four analysis levels. A stored level outside them selects nothing.
#[must_use]
pub fn level_options(current: Accuracy) -> Vec<OptionVm> {
    Accuracy::LEVELS
        .iter()
        .map(|level| OptionVm {
            value: level.as_str().to_string(),
            label: level.label().to_string(),
            selected: *level == current,
        })
        .collect()
}

#[must_use]
pub fn can_analyze(fields: &TabFields, analyzing: bool) -> bool {
    !analyzing && fields.is_ready_for_analysis()
}

#[must_use]
pub fn recording_label(recording: bool) -> &'static str {
    if recording {
        "Stop Recording"
    } else {
        "Start Recording"
    }
}

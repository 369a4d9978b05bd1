//! Voice capture seam.
//!
//! Recognition itself belongs to the host (the desktop web view); this module
//! only fixes the capability interface and the per-tab recording state.

use study_core::model::Language;

use crate::error::SpeechError;

/// Event delivered by a running recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// Full transcript so far, interim results included.
    Transcript(String),
    /// Recognizer error code, e.g. `no-speech` or `not-allowed`.
    Error(String),
}

pub trait SpeechListener {
    fn on_result(&self, transcript: String);
    fn on_error(&self, code: String);
}

/// Forwards recognizer callbacks to a closure as `SpeechEvent`s.
pub struct CallbackListener<F>(pub F);

impl<F: Fn(SpeechEvent)> SpeechListener for CallbackListener<F> {
    fn on_result(&self, transcript: String) {
        (self.0)(SpeechEvent::Transcript(transcript));
    }

    fn on_error(&self, code: String) {
        (self.0)(SpeechEvent::Error(code));
    }
}

pub trait SpeechCapability {
    /// Begin continuous recognition in `language`'s locale.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if recognition cannot start.
    fn start(
        &self,
        language: Language,
        listener: Box<dyn SpeechListener>,
    ) -> Result<(), SpeechError>;

    fn stop(&self);
}

/// Capability used when the host offers no recognizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSpeech;

impl SpeechCapability for UnavailableSpeech {
    fn start(
        &self,
        _language: Language,
        _listener: Box<dyn SpeechListener>,
    ) -> Result<(), SpeechError> {
        Err(SpeechError::NotSupported)
    }

    fn stop(&self) {}
}

/// Recording toggle of one tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dictation {
    recording: bool,
}

impl Dictation {
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Stop when recording, otherwise clear the transcript and start.
    ///
    /// `listener` is only built when starting.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the capability refuses to start; the state
    /// stays idle and the transcript is kept.
    pub fn toggle<L>(
        &mut self,
        capability: &dyn SpeechCapability,
        language: Language,
        listener: L,
        spoken_text: &mut String,
    ) -> Result<(), SpeechError>
    where
        L: FnOnce() -> Box<dyn SpeechListener>,
    {
        if self.recording {
            capability.stop();
            self.recording = false;
            return Ok(());
        }
        capability.start(language, listener())?;
        spoken_text.clear();
        self.recording = true;
        Ok(())
    }

    /// Apply a recognizer event to the transcript.
    pub fn apply(&mut self, event: SpeechEvent, spoken_text: &mut String) {
        match event {
            SpeechEvent::Transcript(text) => *spoken_text = text,
            SpeechEvent::Error(_) => self.recording = false,
        }
    }
}

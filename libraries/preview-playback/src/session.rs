//! Audio session gate
//!
//! One-time configuration and activation of the shared device audio session.

use crate::error::{PlaybackError, Result};
use preview_core::{AudioSession, SessionSettings};
use tracing::{debug, warn};

/// Applies the configured session settings and activates the session
#[derive(Debug, Clone, Default)]
pub struct AudioSessionGate {
    settings: SessionSettings,
}

impl AudioSessionGate {
    /// Create a gate for the given settings
    pub fn new(settings: SessionSettings) -> Self {
        Self { settings }
    }

    /// Settings this gate applies
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Configure category/mode/options, then activate
    ///
    /// A failure at either step is reported as [`PlaybackError::SessionSetup`];
    /// activation is not attempted when configuration fails.
    pub fn activate(&self, session: &mut dyn AudioSession) -> Result<()> {
        let settings = &self.settings;

        session
            .set_category(settings.category, settings.mode, &settings.options)
            .and_then(|()| session.set_active(true))
            .map_err(|e| {
                warn!(error = %e, "audio session setup failed");
                PlaybackError::SessionSetup {
                    reason: e.to_string(),
                }
            })?;

        debug!(
            category = ?settings.category,
            mode = ?settings.mode,
            options = ?settings.options,
            "audio session active"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preview_core::{CoreError, SessionCategory, SessionMode, SessionOption};

    #[derive(Default)]
    struct RecordingSession {
        calls: Vec<String>,
        fail_category: bool,
        fail_active: bool,
    }

    impl AudioSession for RecordingSession {
        fn set_category(
            &mut self,
            category: SessionCategory,
            mode: SessionMode,
            options: &[SessionOption],
        ) -> preview_core::Result<()> {
            self.calls
                .push(format!("category {:?} {:?} {:?}", category, mode, options));
            if self.fail_category {
                return Err(CoreError::session("category rejected"));
            }
            Ok(())
        }

        fn set_active(&mut self, active: bool) -> preview_core::Result<()> {
            self.calls.push(format!("active {}", active));
            if self.fail_active {
                return Err(CoreError::session("activation refused"));
            }
            Ok(())
        }
    }

    #[test]
    fn configures_then_activates() {
        let mut session = RecordingSession::default();
        AudioSessionGate::default().activate(&mut session).unwrap();

        assert_eq!(
            session.calls,
            vec![
                "category Playback Default [AllowAirPlay, AllowBluetooth]".to_string(),
                "active true".to_string(),
            ]
        );
    }

    #[test]
    fn category_failure_skips_activation() {
        let mut session = RecordingSession {
            fail_category: true,
            ..Default::default()
        };
        let err = AudioSessionGate::default()
            .activate(&mut session)
            .unwrap_err();

        assert_eq!(err.to_string(), "Audio session setup failed");
        assert_eq!(session.calls.len(), 1);
    }

    #[test]
    fn activation_failure_is_reported() {
        let mut session = RecordingSession {
            fail_active: true,
            ..Default::default()
        };
        let err = AudioSessionGate::default()
            .activate(&mut session)
            .unwrap_err();

        assert!(matches!(err, PlaybackError::SessionSetup { ref reason } if reason.contains("activation refused")));
    }
}

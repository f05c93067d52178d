//! Master volume and per-application mute.
//!
//! The master volume in effect before the first change is saved so that a
//! later `RESTORE` can put it back. After a restore the saved level is kept
//! and the next change captures a fresh one.

use playhook_domain::action::process_name;
use playhook_domain::volume::VolumeRequest;
use tokio::sync::Mutex;

use super::{ExecutionOutcome, NO_EXIT_CODE, describe};
use crate::ports::AudioControl;

#[derive(Debug)]
struct VolumeState {
    saved: Option<u8>,
    capture_pending: bool,
}

pub struct AudioController<A> {
    audio: A,
    state: Mutex<VolumeState>,
}

impl<A: AudioControl> AudioController<A> {
    pub fn new(audio: A) -> Self {
        Self {
            audio,
            state: Mutex::new(VolumeState {
                saved: None,
                capture_pending: true,
            }),
        }
    }

    /// Apply a volume descriptor: a percentage (clamped) or `RESTORE`.
    pub async fn set_volume(&self, level: &str) -> ExecutionOutcome {
        let request = match level.parse::<VolumeRequest>() {
            Ok(request) => request,
            Err(err) => return ExecutionOutcome::failed(NO_EXIT_CODE, err.to_string()),
        };
        let mut state = self.state.lock().await;
        match request {
            VolumeRequest::Percent(percent) => {
                if state.capture_pending {
                    match self.audio.master_volume().await {
                        Ok(current) => {
                            tracing::debug!(saved = current, "saved master volume");
                            state.saved = Some(current);
                            state.capture_pending = false;
                        }
                        Err(err) => tracing::warn!(error = %err, "could not read master volume"),
                    }
                }
                match self.audio.set_master_volume(percent).await {
                    Ok(()) => ExecutionOutcome::ok(format!("volume set to {percent}%")),
                    Err(err) => ExecutionOutcome::failed(
                        NO_EXIT_CODE,
                        format!("could not set volume: {}", describe(&err)),
                    ),
                }
            }
            VolumeRequest::Restore => {
                let Some(saved) = state.saved else {
                    return ExecutionOutcome::failed(NO_EXIT_CODE, "no saved volume to restore");
                };
                match self.audio.set_master_volume(saved).await {
                    Ok(()) => {
                        state.capture_pending = true;
                        ExecutionOutcome::ok(format!("volume restored to {saved}%"))
                    }
                    Err(err) => ExecutionOutcome::failed(
                        NO_EXIT_CODE,
                        format!("could not restore volume: {}", describe(&err)),
                    ),
                }
            }
        }
    }

    /// Mute or unmute one application, trying the session strategy first.
    ///
    /// When neither strategy finds the application the outcome is a
    /// best-effort failure.
    pub async fn set_mute(&self, process: &str, mute: bool) -> ExecutionOutcome {
        let verb = if mute { "muted" } else { "unmuted" };
        let name = process_name(process);
        if name.is_empty() {
            return ExecutionOutcome::failed(NO_EXIT_CODE, "no application to mute");
        }

        match self.audio.set_session_mute(&name, mute).await {
            Ok(true) => return ExecutionOutcome::ok(format!("{verb} {name}")),
            Ok(false) => tracing::debug!(process = %name, "no audio session, trying fallback"),
            Err(err) => tracing::debug!(process = %name, error = %err, "session mute failed, trying fallback"),
        }
        match self.audio.set_mute_fallback(&name, mute).await {
            Ok(true) => ExecutionOutcome::ok(format!("{verb} {name} (fallback)")),
            Ok(false) => {
                tracing::warn!(process = %name, "no audio stream found");
                ExecutionOutcome::best_effort_failure(format!("no audio stream found for {name}"))
            }
            Err(err) => {
                tracing::warn!(process = %name, error = %err, "fallback mute failed");
                ExecutionOutcome::best_effort_failure(format!(
                    "could not change mute for {name}: {}",
                    describe(&err)
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeAudio;

    #[tokio::test]
    async fn should_clamp_negative_volume_to_zero() {
        let low = AudioController::new(FakeAudio::with_volume(50));
        let zero = AudioController::new(FakeAudio::with_volume(50));

        let a = low.set_volume("-20").await;
        let b = zero.set_volume("0").await;

        assert_eq!(a, b);
        assert_eq!(low.audio.volume(), zero.audio.volume());
        assert_eq!(low.audio.volume(), 0);
    }

    #[tokio::test]
    async fn should_clamp_large_volume_to_hundred() {
        let high = AudioController::new(FakeAudio::with_volume(50));
        let hundred = AudioController::new(FakeAudio::with_volume(50));

        let a = high.set_volume("150").await;
        let b = hundred.set_volume("100").await;

        assert_eq!(a, b);
        assert_eq!(high.audio.volume(), 100);
    }

    #[tokio::test]
    async fn should_restore_volume_saved_before_first_change() {
        let controller = AudioController::new(FakeAudio::with_volume(65));

        controller.set_volume("20").await;
        controller.set_volume("10").await;
        let outcome = controller.set_volume("restore").await;

        assert!(outcome.success);
        assert_eq!(controller.audio.volume(), 65);
    }

    #[tokio::test]
    async fn should_keep_saved_volume_for_repeated_restore() {
        let controller = AudioController::new(FakeAudio::with_volume(65));

        controller.set_volume("20").await;
        controller.set_volume("RESTORE").await;
        let again = controller.set_volume("RESTORE").await;

        assert!(again.success);
        assert_eq!(controller.audio.volume(), 65);
    }

    #[tokio::test]
    async fn should_capture_again_after_restore() {
        let controller = AudioController::new(FakeAudio::with_volume(65));

        controller.set_volume("20").await;
        controller.set_volume("RESTORE").await;
        controller.audio.set_external_volume(30);
        controller.set_volume("90").await;
        controller.set_volume("RESTORE").await;

        assert_eq!(controller.audio.volume(), 30);
    }

    #[tokio::test]
    async fn should_fail_restore_when_nothing_saved() {
        let controller = AudioController::new(FakeAudio::with_volume(65));

        let outcome = controller.set_volume("RESTORE").await;

        assert!(!outcome.success);
        assert!(controller.audio.volume_changes().is_empty());
    }

    #[tokio::test]
    async fn should_reject_unparseable_level() {
        let controller = AudioController::new(FakeAudio::with_volume(65));

        let outcome = controller.set_volume("loud").await;

        assert!(!outcome.success);
        assert!(!outcome.best_effort);
    }

    #[tokio::test]
    async fn should_mute_through_session_when_available() {
        let controller = AudioController::new(FakeAudio::with_volume(50));

        let outcome = controller.set_mute(r"C:\Apps\Discord.exe", true).await;

        assert!(outcome.success);
        assert_eq!(controller.audio.mutes(), vec![("Discord".to_string(), true, "session")]);
    }

    #[tokio::test]
    async fn should_fall_back_when_session_missing() {
        let audio = FakeAudio::with_volume(50);
        audio.without_sessions();
        let controller = AudioController::new(audio);

        let outcome = controller.set_mute("discord", false).await;

        assert!(outcome.success);
        assert_eq!(controller.audio.mutes(), vec![("discord".to_string(), false, "fallback")]);
    }

    #[tokio::test]
    async fn should_report_best_effort_failure_when_both_strategies_fail() {
        let audio = FakeAudio::with_volume(50);
        audio.without_sessions();
        audio.without_fallback();
        let controller = AudioController::new(audio);

        let outcome = controller.set_mute("discord", true).await;

        assert!(!outcome.success);
        assert!(outcome.best_effort);
    }
}

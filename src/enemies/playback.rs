//! Kira audio backend for enemy cues.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy_kira_audio::prelude::{Audio, AudioControl, PlaybackState};

use super::audio::{AudioCueThrottle, CueRequest, CueStatus};
use crate::core::SimSet;

/// Plays granted cues through `bevy_kira_audio` and frees throttle slots when
/// they finish. Requires kira's `AudioPlugin`.
pub struct EnemyAudioPlugin;

impl Plugin for EnemyAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (start_requested_cues, reap_finished_cues)
                .chain()
                .in_set(SimSet::Backend),
        );
    }
}

/// Start playback for every cue granted this tick.
fn start_requested_cues(
    audio: Res<Audio>,
    mut cue_requests: EventReader<CueRequest>,
    mut throttle: ResMut<AudioCueThrottle>,
) {
    for request in cue_requests.read() {
        let instance = audio
            .play(request.clip.clone())
            .with_volume(f64::from(request.volume))
            .handle();

        if !throttle.attach(request.entity, request.clip.clone(), instance) {
            warn!(
                "{:?} cue for {:?} started without a throttle slot",
                request.kind, request.entity
            );
        }
    }
}

/// Map kira's playback state and the clip's load state to a cue status.
///
/// A clip that failed to load never starts, so it counts as over.
fn cue_status(playback: &PlaybackState, load: &LoadState) -> CueStatus {
    if matches!(load, LoadState::Failed(_)) {
        return CueStatus::Failed;
    }
    match playback {
        PlaybackState::Stopped => CueStatus::Finished,
        PlaybackState::Queued => CueStatus::Pending,
        _ => CueStatus::Playing,
    }
}

/// Free the slot of every cue whose playback has stopped.
fn reap_finished_cues(
    audio: Res<Audio>,
    asset_server: Res<AssetServer>,
    mut throttle: ResMut<AudioCueThrottle>,
) {
    let released = throttle.release_finished(|clip, instance| {
        cue_status(&audio.state(instance), &asset_server.load_state(clip.id()))
    });

    if !released.is_empty() {
        debug!("Released {} finished cue slots", released.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_stopped_playback_is_finished() {
        assert_eq!(
            cue_status(&PlaybackState::Queued, &LoadState::Loading),
            CueStatus::Pending
        );
        assert_eq!(
            cue_status(&PlaybackState::Playing { position: 0.5 }, &LoadState::Loaded),
            CueStatus::Playing
        );
        assert_eq!(
            cue_status(&PlaybackState::Paused { position: 0.5 }, &LoadState::Loaded),
            CueStatus::Playing
        );
        assert_eq!(
            cue_status(&PlaybackState::Stopping { position: 0.9 }, &LoadState::Loaded),
            CueStatus::Playing
        );
        assert_eq!(
            cue_status(&PlaybackState::Stopped, &LoadState::Loaded),
            CueStatus::Finished
        );
    }
}

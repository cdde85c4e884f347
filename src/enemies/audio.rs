//! Ambient and flee audio cues with a global concurrency limit.
//!
//! Two gates apply to enemy audio. Each enemy has its own voice with a
//! cooldown (`next_allowed`), and all enemies share [`AudioCueThrottle`],
//! which caps how many cues play at once. A throttle slot is taken when a
//! cue is granted and freed only when that cue's playback reports it has
//! stopped.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_kira_audio::{AudioInstance, AudioSource};
use rand::seq::SliceRandom;
use rand::Rng;

use super::components::{Enemy, Inert, TrackedTarget};
use crate::combat::Dead;
use crate::core::AiRng;

/// Cues allowed to play at the same time across all enemies.
pub const MAX_CONCURRENT_CUES: usize = 5;

/// Chance an eligible ambient cue actually plays on a given tick.
pub const AMBIENT_CUE_CHANCE: f64 = 0.2;

/// Chance a flee reaction comes with a flee cue.
pub const FLEE_CUE_CHANCE: f64 = 0.5;

/// Flee cues play at this fraction of the voice's current volume.
pub const FLEE_VOLUME_SCALE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    Ambient,
    Flee,
}

/// A granted cue, waiting for the audio backend to start it.
#[derive(Event, Debug, Clone)]
pub struct CueRequest {
    pub entity: Entity,
    pub clip: Handle<AudioSource>,
    pub volume: f32,
    pub kind: CueKind,
}

/// Progress of a started cue, as reported by the audio backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueStatus {
    /// Queued but not audible yet.
    Pending,
    Playing,
    Finished,
    /// The clip could not be loaded and will never play.
    Failed,
}

impl CueStatus {
    /// Whether the cue's throttle slot can be released.
    pub fn is_over(self) -> bool {
        matches!(self, Self::Finished | Self::Failed)
    }
}

#[derive(Debug, Clone)]
enum CueSlot {
    /// Granted, not started yet.
    Requested,
    Playing {
        clip: Handle<AudioSource>,
        instance: Handle<AudioInstance>,
    },
}

/// Shared limit on concurrently playing cues.
///
/// Slots are keyed by the voice's entity, which also makes each voice
/// exclusive: an entity can hold at most one slot. The in-flight count is the
/// number of slots, so it can never go negative or drift from what is
/// actually playing.
#[derive(Resource, Debug)]
pub struct AudioCueThrottle {
    max_concurrent: usize,
    slots: HashMap<Entity, CueSlot>,
}

impl Default for AudioCueThrottle {
    fn default() -> Self {
        Self::new(MAX_CONCURRENT_CUES)
    }
}

impl AudioCueThrottle {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            max_concurrent,
            slots: HashMap::new(),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub fn in_flight(&self) -> usize {
        self.slots.len()
    }

    pub fn is_saturated(&self) -> bool {
        self.in_flight() >= self.max_concurrent
    }

    /// Whether this entity's own channel is occupied.
    pub fn is_busy(&self, entity: Entity) -> bool {
        self.slots.contains_key(&entity)
    }

    /// Take a slot for `entity`. Fails when saturated or the entity is busy.
    pub fn try_begin(&mut self, entity: Entity) -> bool {
        if self.is_saturated() || self.is_busy(entity) {
            return false;
        }
        self.slots.insert(entity, CueSlot::Requested);
        true
    }

    /// Record the playback instance for a granted cue.
    pub fn attach(
        &mut self,
        entity: Entity,
        clip: Handle<AudioSource>,
        instance: Handle<AudioInstance>,
    ) -> bool {
        match self.slots.get_mut(&entity) {
            Some(slot @ CueSlot::Requested) => {
                *slot = CueSlot::Playing { clip, instance };
                true
            }
            _ => false,
        }
    }

    /// Release the slot held by `entity`. Returns false if it held none.
    pub fn finish(&mut self, entity: Entity) -> bool {
        self.slots.remove(&entity).is_some()
    }

    /// Release every started cue that `status` reports as over.
    ///
    /// Returns the entities whose slots were freed. A freed slot is gone, so
    /// the same cue is never released twice.
    pub fn release_finished<F>(&mut self, mut status: F) -> Vec<Entity>
    where
        F: FnMut(&Handle<AudioSource>, &Handle<AudioInstance>) -> CueStatus,
    {
        let over: Vec<Entity> = self
            .playing()
            .filter(|(_, clip, instance)| status(clip, instance).is_over())
            .map(|(entity, _, _)| entity)
            .collect();

        for &entity in &over {
            self.finish(entity);
        }
        over
    }

    /// Cues that have started playing.
    pub fn playing(
        &self,
    ) -> impl Iterator<Item = (Entity, &Handle<AudioSource>, &Handle<AudioInstance>)> + '_ {
        self.slots.iter().filter_map(|(&entity, slot)| match slot {
            CueSlot::Playing { clip, instance } => Some((entity, clip, instance)),
            CueSlot::Requested => None,
        })
    }
}

/// Volume for an ambient cue heard from `distance`: 1 at the listener, 0 at
/// the edge of `play_range`.
pub fn ambient_volume(distance: f32, play_range: f32) -> f32 {
    if play_range <= 0.0 {
        return 1.0;
    }
    1.0 - (distance / play_range).clamp(0.0, 1.0)
}

/// Per-enemy audio state.
#[derive(Component, Debug, Clone)]
pub struct AmbientVoice {
    pub ambient_clips: Vec<Handle<AudioSource>>,
    pub flee_clips: Vec<Handle<AudioSource>>,
    /// Listener distance beyond which ambient cues are skipped.
    pub play_range: f32,
    pub min_delay: f32,
    pub max_delay: f32,
    next_allowed: f32,
    volume: f32,
}

impl AmbientVoice {
    pub fn new(
        ambient_clips: Vec<Handle<AudioSource>>,
        flee_clips: Vec<Handle<AudioSource>>,
        play_range: f32,
        min_delay: f32,
        max_delay: f32,
    ) -> Self {
        Self {
            ambient_clips,
            flee_clips,
            play_range,
            min_delay,
            max_delay,
            next_allowed: 0.0,
            volume: 1.0,
        }
    }

    /// Earliest time the next ambient cue may play.
    pub fn next_allowed(&self) -> f32 {
        self.next_allowed
    }

    /// Volume of the last ambient cue.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Push `next_allowed` to a random point in `[min_delay, max_delay)` from now.
    pub fn schedule_next<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) {
        let delay = if self.max_delay > self.min_delay {
            rng.gen_range(self.min_delay..self.max_delay)
        } else {
            self.min_delay
        };
        self.next_allowed = now + delay;
    }

    /// Try to grant an ambient cue this tick.
    pub fn try_ambient<R: Rng + ?Sized>(
        &mut self,
        entity: Entity,
        now: f32,
        listener_distance: f32,
        throttle: &mut AudioCueThrottle,
        rng: &mut R,
    ) -> Option<CueRequest> {
        if self.ambient_clips.is_empty()
            || throttle.is_busy(entity)
            || now < self.next_allowed
            || throttle.is_saturated()
            || listener_distance > self.play_range
            || !rng.gen_bool(AMBIENT_CUE_CHANCE)
        {
            return None;
        }

        let clip = self.ambient_clips.choose(rng)?.clone();
        if !throttle.try_begin(entity) {
            return None;
        }

        self.volume = ambient_volume(listener_distance, self.play_range);
        self.schedule_next(now, rng);

        Some(CueRequest {
            entity,
            clip,
            volume: self.volume,
            kind: CueKind::Ambient,
        })
    }

    /// Try to grant a flee cue. Ignores the cooldown, respects the throttle.
    pub fn try_flee<R: Rng + ?Sized>(
        &self,
        entity: Entity,
        throttle: &mut AudioCueThrottle,
        rng: &mut R,
    ) -> Option<CueRequest> {
        if self.flee_clips.is_empty() || !rng.gen_bool(FLEE_CUE_CHANCE) {
            return None;
        }

        let clip = self.flee_clips.choose(rng)?.clone();
        if !throttle.try_begin(entity) {
            return None;
        }

        Some(CueRequest {
            entity,
            clip,
            volume: self.volume * FLEE_VOLUME_SCALE,
            kind: CueKind::Flee,
        })
    }
}

/// Grant ambient cues to enemies near their listener.
pub fn schedule_ambient_cues(
    time: Res<Time>,
    mut rng: ResMut<AiRng>,
    mut throttle: ResMut<AudioCueThrottle>,
    mut cue_requests: EventWriter<CueRequest>,
    listeners: Query<&Transform, Without<Enemy>>,
    mut voices: Query<
        (Entity, &Transform, &TrackedTarget, &mut AmbientVoice),
        (With<Enemy>, Without<Dead>, Without<Inert>),
    >,
) {
    let now = time.elapsed_secs();

    for (entity, transform, target, mut voice) in voices.iter_mut() {
        let Ok(listener) = listeners.get(target.entity) else {
            continue;
        };
        let distance = transform.translation.distance(listener.translation);

        if let Some(request) = voice.try_ambient(entity, now, distance, &mut throttle, &mut rng.0) {
            cue_requests.send(request);
        }
    }
}

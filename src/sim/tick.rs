//! Fixed timestep simulation tick
//!
//! Per tick, in order: taps, ripple advance, collision resolution, effect
//! pruning, win check, loss check. Collisions always see this tick's radii.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::effects::OrbFlight;
use super::ripple::advance;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::SCORE_POS;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap position in play-area coordinates
    pub tap: Option<Vec2>,
    /// Pause toggle (in-game menu)
    pub pause: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        _ => {}
    }

    state.time_ticks += 1;

    if let Some(pos) = input.tap {
        state.try_tap(pos);
    }

    step_simulation(state);

    match state.phase {
        GamePhase::Playing => {
            if state.is_level_clear() {
                level_cleared(state);
            } else {
                check_out_of_taps(state);
            }
        }

        GamePhase::FadingOut { ticks_left } => {
            if ticks_left > 1 {
                state.phase = GamePhase::FadingOut {
                    ticks_left: ticks_left - 1,
                };
            } else {
                state.ripples.clear();
                state.effects.clear();
                state.phase = GamePhase::Loading {
                    ticks_left: state.tuning.loading_ticks,
                };
            }
        }

        GamePhase::Loading { ticks_left } => {
            let ticks_left = ticks_left.saturating_sub(1);
            if ticks_left == 0 && state.ripples.is_empty() && state.effects.is_empty() {
                let next = state.level + 1;
                state.load_level(next);
                state.phase = GamePhase::Playing;
            } else {
                state.phase = GamePhase::Loading { ticks_left };
            }
        }

        GamePhase::Paused | GamePhase::GameOver => {}
    }
}

/// Ripples, collisions and effects for one tick
fn step_simulation(state: &mut GameState) {
    let hits = advance(
        &mut state.ripples,
        &state.walls,
        state.area,
        state.tuning.ripple_growth,
    );
    for hit in hits {
        state.effects.spawn_spark(hit.pos);
        state.events.push(GameEvent::WallHit { pos: hit.pos });
    }

    let collected = resolve_collisions(&mut state.orbs, &state.ripples);
    let score_pos = Vec2::from(SCORE_POS);
    for c in &collected {
        state.effects.spawn_burst(c.pos);
        state.effects.spawn_flight(OrbFlight::new(
            c.orb_id,
            c.pos,
            score_pos,
            state.tuning.flight_ticks,
        ));
        state.events.push(GameEvent::OrbCollected {
            id: c.orb_id,
            pos: c.pos,
        });
    }
    if !collected.is_empty() {
        restart_grace(state);
    }

    state
        .effects
        .decay(state.tuning.max_sparks, state.tuning.max_bursts);
    for id in state.effects.step_flights() {
        land_orb(state, id);
    }
}

/// Any change to the orb list (collection or landing) restarts a running
/// grace countdown
fn restart_grace(state: &mut GameState) {
    if let Some(ticks) = state.grace_ticks.as_mut() {
        *ticks = state.tuning.grace_ticks;
    }
}

/// Score an orb whose flight finished and drop it from the level
fn land_orb(state: &mut GameState, id: u32) {
    state.orbs.retain(|o| o.id != id);
    state.score += 1;
    state.events.push(GameEvent::ScoreChanged { score: state.score });
    restart_grace(state);
}

fn level_cleared(state: &mut GameState) {
    log::info!("Level {} cleared (score {})", state.level, state.score);
    state.grace_ticks = None;
    state.events.push(GameEvent::LevelCleared { level: state.level });
    state.phase = GamePhase::FadingOut {
        ticks_left: state.tuning.fade_ticks.max(1),
    };
}

/// Arm the grace countdown once per level attempt, and end the run when it
/// runs out with orbs still uncollected.
fn check_out_of_taps(state: &mut GameState) {
    let remaining = state.orbs_remaining();

    if !state.grace_armed && state.taps_used >= state.tuning.max_taps && remaining > 0 {
        state.grace_armed = true;
        state.grace_ticks = Some(state.tuning.grace_ticks);
        state.events.push(GameEvent::OutOfTaps);
        log::debug!("Out of taps with {} orbs left", remaining);
    }

    let Some(ticks) = state.grace_ticks else {
        return;
    };
    if ticks > 1 {
        state.grace_ticks = Some(ticks - 1);
        return;
    }

    state.grace_ticks = None;
    if remaining == 0 {
        return;
    }

    // Orbs already on their way to the counter still count
    for flight in std::mem::take(&mut state.effects.flights) {
        land_orb(state, flight.orb_id);
    }
    log::info!("Game over at level {} with score {}", state.level, state.score);
    state.events.push(GameEvent::GameOver {
        score: state.score,
        level: state.level,
    });
    state.phase = GamePhase::GameOver;
}

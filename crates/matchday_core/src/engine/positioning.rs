//! Positioning
//!
//! Instantaneous coordinate and posture for one player, computed on every
//! playback tick for all 22 players. Rules are written in the home frame
//! (attacking toward y = 0); away players are mirrored in and out.
//!
//! - Goalkeeper: template slot nudged 10% toward the ball's x, kept central.
//! - In possession: forwards sometimes make runs, midfield and defence push up
//!   (defence least).
//! - Out of possession: forwards sometimes press the carrier, midfield and
//!   defence drop toward their own goal (defence most).

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rng::{chance, float_in, jitter};
use crate::models::{Formation, Line, Player, Posture, Side};

pub const PITCH_MIN: f32 = 2.0;
pub const PITCH_MAX: f32 = 98.0;

/// Chance per tick that a fresh forward makes a run in possession.
const RUN_CHANCE: f32 = 0.3;
/// Share of the pressing dial that becomes a per-tick press chance.
const PRESS_SHARE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPosition {
    pub x: f32,
    pub y: f32,
    pub posture: Posture,
}

/// Shared per-tick inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchContext {
    pub home_has_ball: bool,
    pub ball: (f32, f32),
    /// 0-1
    pub press_intensity: f32,
    pub formation: Formation,
}

pub fn player_position<R: Rng + ?Sized>(
    player: &Player,
    slot: usize,
    side: Side,
    pitch: &PitchContext,
    rng: &mut R,
) -> PlayerPosition {
    let template = pitch.formation.positions();
    let (bx, by) = template[slot.min(template.len() - 1)];
    // home frame: ball mirrored for the away side
    let ball_x = pitch.ball.0;
    let ball_y = side.mirror_y(pitch.ball.1);
    let fresh = player.psyche.freshness();
    let attacking = side.is_home() == pitch.home_has_ball;

    let (x, y, posture) = match player.line() {
        Line::Goalkeeper => {
            let x = (ball_x * 0.1 + bx * 0.9 + jitter(rng, 1.0)).clamp(40.0, 60.0);
            (x, by + jitter(rng, 1.0), Posture::Normal)
        }
        line if attacking => attacking_shape(line, bx, by, fresh, rng),
        line => defending_shape(line, bx, by, ball_x, ball_y, fresh, pitch.press_intensity, rng),
    };

    PlayerPosition {
        x: x.clamp(PITCH_MIN, PITCH_MAX),
        y: side.mirror_y(y).clamp(PITCH_MIN, PITCH_MAX),
        posture,
    }
}

fn attacking_shape<R: Rng + ?Sized>(
    line: Line,
    bx: f32,
    by: f32,
    fresh: f32,
    rng: &mut R,
) -> (f32, f32, Posture) {
    match line {
        Line::Attack if chance(rng, RUN_CHANCE * fresh) => {
            let x = (bx + jitter(rng, 14.0)).clamp(6.0, 94.0);
            let y = (by - float_in(rng, -4.0, 12.0)).clamp(6.0, 40.0);
            (x, y, Posture::Run)
        }
        Line::Attack => {
            let x = (bx + jitter(rng, 6.0)).clamp(6.0, 94.0);
            let y = (by - float_in(rng, -2.0, 4.0)).clamp(6.0, 42.0);
            (x, y, Posture::Normal)
        }
        Line::Midfield => {
            let x = (bx + jitter(rng, 8.0)).clamp(6.0, 94.0);
            let y = (by - float_in(rng, -4.0, 8.0) * fresh).clamp(24.0, 66.0);
            (x, y, Posture::Normal)
        }
        Line::Defence | Line::Goalkeeper => {
            let x = (bx + jitter(rng, 4.0)).clamp(4.0, 96.0);
            let y = (by - float_in(rng, 0.0, 5.0) * fresh).clamp(55.0, 87.0);
            (x, y, Posture::Normal)
        }
    }
}

fn defending_shape<R: Rng + ?Sized>(
    line: Line,
    bx: f32,
    by: f32,
    ball_x: f32,
    ball_y: f32,
    fresh: f32,
    press_intensity: f32,
    rng: &mut R,
) -> (f32, f32, Posture) {
    match line {
        Line::Attack if chance(rng, press_intensity * PRESS_SHARE * fresh) => {
            let x = (ball_x + jitter(rng, 16.0)).clamp(8.0, 92.0);
            let y = (ball_y + float_in(rng, 0.0, 10.0)).min(48.0).clamp(15.0, 50.0);
            (x, y, Posture::Press)
        }
        // Forwards not pressing hold their slot.
        Line::Attack => (bx, by, Posture::Normal),
        Line::Midfield => {
            let x = (bx + jitter(rng, 5.0)).clamp(6.0, 94.0);
            let y = (by + float_in(rng, 0.0, 10.0) * fresh).clamp(35.0, 72.0);
            (x, y, Posture::Normal)
        }
        Line::Defence | Line::Goalkeeper => {
            let x = (bx + jitter(rng, 4.0)).clamp(4.0, 96.0);
            let y = (by + float_in(rng, 0.0, 8.0)).clamp(62.0, 90.0);
            (x, y, Posture::Normal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::seeded;
    use crate::models::Squad;

    fn pitch(home_has_ball: bool, press: f32) -> PitchContext {
        PitchContext { home_has_ball, ball: (50.0, 50.0), press_intensity: press, formation: Formation::F442 }
    }

    #[test]
    fn test_all_positions_clamped() {
        let mut rng = seeded(4);
        let home = Squad::home_demo(&mut rng);
        let away = Squad::away_demo(&mut rng);
        for has_ball in [true, false] {
            for ball in [(0.0, 0.0), (100.0, 100.0), (50.0, 3.0)] {
                let ctx = PitchContext { ball, ..pitch(has_ball, 1.0) };
                for slot in 0..11 {
                    for (side, squad) in [(Side::Home, &home), (Side::Away, &away)] {
                        let p = player_position(squad.player(slot), slot, side, &ctx, &mut rng);
                        assert!((PITCH_MIN..=PITCH_MAX).contains(&p.x));
                        assert!((PITCH_MIN..=PITCH_MAX).contains(&p.y));
                    }
                }
            }
        }
    }

    #[test]
    fn test_goalkeeper_tracks_ball_x_and_stays_home() {
        let mut rng = seeded(4);
        let home = Squad::home_demo(&mut rng);
        let away = Squad::away_demo(&mut rng);
        let ctx = PitchContext { ball: (90.0, 50.0), ..pitch(true, 0.0) };
        for _ in 0..50 {
            let h = player_position(home.player(0), 0, Side::Home, &ctx, &mut rng);
            assert!((40.0..=60.0).contains(&h.x));
            assert!(h.y > 88.0);
            assert_eq!(h.posture, Posture::Normal);
            let a = player_position(away.player(0), 0, Side::Away, &ctx, &mut rng);
            assert!(a.y < 12.0);
        }
    }

    #[test]
    fn test_no_press_without_dial() {
        let mut rng = seeded(8);
        let home = Squad::home_demo(&mut rng);
        let ctx = pitch(false, 0.0);
        for _ in 0..200 {
            for slot in 8..11 {
                let p = player_position(home.player(slot), slot, Side::Home, &ctx, &mut rng);
                assert_ne!(p.posture, Posture::Press);
            }
        }
    }

    #[test]
    fn test_full_press_dial_produces_pressers() {
        let mut rng = seeded(8);
        let away = Squad::away_demo(&mut rng);
        let ctx = pitch(true, 1.0);
        let pressing = (0..300)
            .filter(|_| {
                player_position(away.player(9), 9, Side::Away, &ctx, &mut rng).posture == Posture::Press
            })
            .count();
        // ~50% expected for a fresh forward
        assert!(pressing > 100 && pressing < 200, "pressing ticks: {pressing}");
    }

    #[test]
    fn test_runs_only_in_possession() {
        let mut rng = seeded(12);
        let home = Squad::home_demo(&mut rng);
        let mut runs = 0;
        for _ in 0..300 {
            let p = player_position(home.player(9), 9, Side::Home, &pitch(true, 1.0), &mut rng);
            if p.posture == Posture::Run {
                runs += 1;
                assert!(p.y <= 40.0);
            }
            let d = player_position(home.player(9), 9, Side::Home, &pitch(false, 0.0), &mut rng);
            assert_ne!(d.posture, Posture::Run);
        }
        assert!(runs > 40, "runs: {runs}");
    }

    #[test]
    fn test_defenders_drop_deeper_when_defending() {
        let mut rng = seeded(21);
        let home = Squad::home_demo(&mut rng);
        let n = 200;
        let (mut att, mut def) = (0.0, 0.0);
        for _ in 0..n {
            att += player_position(home.player(2), 2, Side::Home, &pitch(true, 0.5), &mut rng).y;
            def += player_position(home.player(2), 2, Side::Home, &pitch(false, 0.5), &mut rng).y;
        }
        // home own goal is at y=100
        assert!(def / n as f32 > att / n as f32);
    }
}

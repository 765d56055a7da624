//! The match: two ragdolls on one torso, scores, kills and delayed resets.

use glam::Vec2;

use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::types::{GameEvent, PlayerSide};
use crate::assets::skin::Skin;
use crate::config::{MatchConfig, SumoConfig};
use crate::core::schedule::Schedule;
use crate::input::bindings::binding_for;
use crate::input::queue::InputEvent;
use crate::renderer::traits::Renderer;
use crate::sumo::arena::Arena;
use crate::sumo::collision::{self, Verdict};
use crate::sumo::ragdoll::{Ragdoll, RagdollPose};
use crate::sumo::torso::SharedTorso;
use crate::systems::render::{draw_match, MatchView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchTimer {
    Reset,
}

/// Everything built by `init`.
struct Rig {
    arena: Arena,
    torso: SharedTorso,
    players: [Ragdoll; 2],
}

pub struct SumoMatch {
    config: SumoConfig,
    rig: Option<Rig>,
    scores: [u32; 2],
    timers: Schedule<MatchTimer>,
    skins: [Option<Skin>; 2],
}

impl SumoMatch {
    pub fn new(config: SumoConfig) -> Self {
        Self {
            config,
            rig: None,
            scores: [0, 0],
            timers: Schedule::new(),
            skins: [None, None],
        }
    }

    /// Attach decorative head skins, left then right.
    pub fn with_skins(mut self, skins: [Option<Skin>; 2]) -> Self {
        self.skins = skins;
        self
    }

    pub fn rules(&self) -> &MatchConfig {
        &self.config.rules
    }

    pub fn score(&self, side: PlayerSide) -> u32 {
        self.scores[side.index()]
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    /// The character on `side`, once `init` has run.
    pub fn ragdoll(&self, side: PlayerSide) -> Option<&Ragdoll> {
        self.rig.as_ref().map(|rig| &rig.players[side.index()])
    }

    pub fn torso(&self) -> Option<&SharedTorso> {
        self.rig.as_ref().map(|rig| &rig.torso)
    }

    pub fn arena(&self) -> Option<&Arena> {
        self.rig.as_ref().map(|rig| &rig.arena)
    }

    pub fn is_reset_pending(&self) -> bool {
        self.timers.is_pending(MatchTimer::Reset)
    }

    /// Current poses of both characters, left then right.
    pub fn poses(&self, ctx: &EngineContext) -> Option<[RagdollPose; 2]> {
        let rig = self.rig.as_ref()?;
        Some(rig.players.each_ref().map(|p| p.pose(&ctx.physics)))
    }

    /// `loser` touched the floor. Dead characters cannot be killed again.
    fn kill(&mut self, ctx: &mut EngineContext, loser: PlayerSide) {
        let Some(rig) = self.rig.as_mut() else {
            return;
        };
        let player = &mut rig.players[loser.index()];
        if !player.is_alive() {
            return;
        }
        player.die(&mut ctx.physics);

        let winner = loser.opponent();
        self.scores[winner.index()] += 1;
        log::info!(
            "{:?} down; scores: left {}, right {}",
            loser,
            self.scores[0],
            self.scores[1]
        );
        ctx.emit_event(GameEvent::Killed { side: loser });
        ctx.emit_event(GameEvent::Scored {
            side: winner,
            left: self.scores[0],
            right: self.scores[1],
        });

        let delay = self.config.rules.reset_delay.max(0.0);
        if self.timers.schedule(MatchTimer::Reset, delay) {
            log::debug!("reset in {:.2}s", delay);
            ctx.emit_event(GameEvent::ResetScheduled { delay });
        }
    }

    /// Put the torso back at spawn, re-pose both characters on it and restore their muscles.
    /// Scores and control targets are kept.
    pub fn reset_match(&mut self, ctx: &mut EngineContext) {
        let Some(rig) = self.rig.as_mut() else {
            return;
        };
        self.timers.cancel(MatchTimer::Reset);
        rig.torso.reset(&mut ctx.physics);
        for player in &mut rig.players {
            player.reset(&mut ctx.physics);
            player.revive(&mut ctx.physics);
        }
        log::info!("match reset");
        ctx.emit_event(GameEvent::MatchReset);
    }

    fn fire_timers(&mut self, ctx: &mut EngineContext, dt: f32) {
        for timer in self.timers.tick(dt) {
            match timer {
                MatchTimer::Reset => self.reset_match(ctx),
            }
        }
    }
}

impl Game for SumoMatch {
    fn config(&self) -> GameConfig {
        self.config.engine.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let rules = &self.config.rules;
        ctx.physics.set_contact_filter(collision::is_solid);
        let arena = Arena::build(&mut ctx.physics, rules);
        let torso = SharedTorso::build(&mut ctx.physics, rules);
        let players = PlayerSide::BOTH.map(|side| Ragdoll::build(&mut ctx.physics, &torso, side, rules));
        log::info!(
            "match ready: {} bodies, {} pins, {} muscles",
            ctx.physics.body_count(),
            ctx.physics.joint_count(),
            ctx.physics.spring_count()
        );
        self.rig = Some(Rig {
            arena,
            torso,
            players,
        });
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, event: InputEvent) {
        let (key, sign) = match event {
            InputEvent::KeyDown(key) => (key, 1.0),
            InputEvent::KeyUp(key) => (key, -1.0),
            InputEvent::Quit => return,
        };
        let Some(binding) = binding_for(key) else {
            log::debug!("unbound key {:?}", key);
            return;
        };
        let Some(rig) = self.rig.as_mut() else {
            return;
        };
        let rules = &self.config.rules;
        rig.players[binding.side.index()].adjust_control(
            &mut ctx.physics,
            sign * binding.stretch * rules.stretch_range,
            sign * binding.angle * rules.angle_range,
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, frame_dt: f32) {
        self.fire_timers(ctx, frame_dt);
    }

    fn after_step(&mut self, ctx: &mut EngineContext) {
        let losers: Vec<PlayerSide> = ctx
            .contacts()
            .iter()
            .filter_map(|c| match collision::classify(c.tag_a, c.tag_b) {
                Verdict::Score { loser } => Some(loser),
                _ => None,
            })
            .collect();
        for loser in losers {
            self.kill(ctx, loser);
        }
        // A zero delay resets right after the step that scored.
        self.fire_timers(ctx, 0.0);
    }

    fn render(&self, ctx: &EngineContext, renderer: &mut dyn Renderer) {
        let Some(poses) = self.poses(ctx) else {
            return;
        };
        let engine = &self.config.engine;
        let view = MatchView {
            poses,
            scores: self.scores,
            skins: self.skins.each_ref().map(Option::as_ref),
            label_at: Vec2::new(engine.world_width / 2.0, engine.world_height - 30.0),
        };
        draw_match(&ctx.physics, &view, renderer);
    }
}

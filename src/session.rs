//! Game session: the ready → can-put → interval → game-over state machine.
//!
//! A [`GameSession`] owns everything that belongs to one game (status, score,
//! pending bubble, drop cooldown) and is driven by a single entry point,
//! [`GameSession::dispatch`].  The physics world and the RNG are passed in on
//! every call rather than captured, so tests can drive a session
//! synchronously against a [`crate::world::MemoryWorld`].
//!
//! ## Transitions
//!
//! | From       | Event                    | To         | Effect                               |
//! |------------|--------------------------|------------|--------------------------------------|
//! | `Ready`    | `Input(Start)`           | `CanPut`   | spawn pending bubble                 |
//! | `CanPut`   | `Input(Drop)`            | `Interval` | release pending bubble, arm cooldown |
//! | `CanPut`   | `Input(PointerMove)`     | `CanPut`   | move pending bubble (clamped)        |
//! | `Interval` | `Tick` (cooldown done)   | `CanPut`   | spawn pending bubble                 |
//! | any        | `Tick` (deadline crossed)| `GameOver` | cancel cooldown, pause physics       |
//! | `GameOver` | `Input(Restart)`         | `Ready`    | clear world, reset score             |
//!
//! Every other combination is silently ignored.

use crate::bubble::{create_bubble, random_spawn_tier, BubbleCategory, BubbleMaterial, Tier};
use crate::config::GameConfig;
use crate::constants::DROP_COOLDOWN_SECS;
use crate::game_over::deadline_crossed;
use crate::merge::resolve_collision;
use crate::world::BubbleWorld;
use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

/// Phase of the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    /// Box built, waiting for the player to press start.
    #[default]
    Ready,
    /// A pending bubble exists and can be moved or dropped.
    CanPut,
    /// Post-drop cooldown; no pending bubble.
    Interval,
    /// Terminal until restart.
    GameOver,
}

/// Player intent, already translated to board coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Start,
    Drop,
    PointerMove { x: f32 },
    Restart,
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent<Id> {
    /// The physics world reported a new contact between two bodies.
    Collision(Id, Id),
    /// One physics step completed.
    Tick { delta: Duration },
    Input(InputEvent),
}

/// What the presentation layer needs to hear about.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum GameNotice {
    ScoreChanged(u64),
    EnteredReady,
    Started,
    Dropped,
    Merged { tier: Tier, position: Vec2 },
    GameOver { score: u64 },
}

/// Countdown owned by the session; dropping it cancels it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cooldown {
    remaining: Duration,
}

impl Cooldown {
    /// Returns `true` once the countdown has run out.
    fn advance(&mut self, delta: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(delta);
        self.remaining.is_zero()
    }
}

/// State of one game, from box construction to game over.
#[derive(Debug, Clone)]
pub struct GameSession<Id> {
    config: GameConfig,
    material: BubbleMaterial,
    drop_cooldown: Duration,
    status: GameStatus,
    score: u64,
    pending: Option<Id>,
    cooldown: Option<Cooldown>,
    /// Last pointer x, reused for the next spawn.
    drop_x: f32,
}

impl<Id: Copy + Eq + std::hash::Hash + std::fmt::Debug> GameSession<Id> {
    /// Create a session.  Call [`GameSession::initialize`] before dispatching.
    pub fn new(config: GameConfig) -> Self {
        let material = BubbleMaterial {
            friction: config.bubble_friction,
            mass: config.bubble_mass,
        };
        let drop_x = config.centre_x();
        // Unvalidated configs may carry NaN or huge values.
        let drop_cooldown = Duration::try_from_secs_f32(config.drop_cooldown_secs)
            .unwrap_or_else(|_| Duration::from_secs_f32(DROP_COOLDOWN_SECS));
        Self {
            config,
            material,
            drop_cooldown,
            status: GameStatus::Ready,
            score: 0,
            pending: None,
            cooldown: None,
            drop_x,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn pending(&self) -> Option<Id> {
        self.pending
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Time left before the next pending bubble, if a cooldown is armed.
    pub fn cooldown_remaining(&self) -> Option<Duration> {
        self.cooldown.map(|c| c.remaining)
    }

    /// Reset to a fresh game: empty box, zero score, `Ready`.
    pub fn initialize<W: BubbleWorld<Id = Id>>(&mut self, world: &mut W) -> Vec<GameNotice> {
        world.clear();
        world.build_box(&self.config);
        world.set_paused(false);

        self.status = GameStatus::Ready;
        self.score = 0;
        self.pending = None;
        self.cooldown = None;
        // A restart recentres the drop position instead of keeping the last pointer x.
        self.drop_x = self.config.centre_x();

        vec![GameNotice::ScoreChanged(0), GameNotice::EnteredReady]
    }

    /// Process one event and return the notices it produced.
    pub fn dispatch<W, R>(
        &mut self,
        world: &mut W,
        rng: &mut R,
        event: WorldEvent<Id>,
    ) -> Vec<GameNotice>
    where
        W: BubbleWorld<Id = Id>,
        R: Rng + ?Sized,
    {
        let mut notices = Vec::new();
        match event {
            WorldEvent::Collision(a, b) => self.on_collision(world, a, b, &mut notices),
            WorldEvent::Tick { delta } => self.on_tick(world, rng, delta, &mut notices),
            WorldEvent::Input(InputEvent::Start) => self.on_start(world, rng, &mut notices),
            WorldEvent::Input(InputEvent::Drop) => self.on_drop(world, &mut notices),
            WorldEvent::Input(InputEvent::PointerMove { x }) => self.on_pointer_move(world, x),
            WorldEvent::Input(InputEvent::Restart) => {
                if self.status == GameStatus::GameOver {
                    notices = self.initialize(world);
                }
            }
        }
        notices
    }

    fn on_start<W, R>(&mut self, world: &mut W, rng: &mut R, notices: &mut Vec<GameNotice>)
    where
        W: BubbleWorld<Id = Id>,
        R: Rng + ?Sized,
    {
        if self.status != GameStatus::Ready {
            return;
        }
        self.spawn_pending(world, rng);
        self.status = GameStatus::CanPut;
        notices.push(GameNotice::Started);
    }

    fn on_drop<W: BubbleWorld<Id = Id>>(&mut self, world: &mut W, notices: &mut Vec<GameNotice>) {
        if self.status != GameStatus::CanPut {
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };
        world.release(pending);
        self.status = GameStatus::Interval;
        self.cooldown = Some(Cooldown {
            remaining: self.drop_cooldown,
        });
        notices.push(GameNotice::Dropped);
    }

    fn on_pointer_move<W: BubbleWorld<Id = Id>>(&mut self, world: &mut W, x: f32) {
        if self.status != GameStatus::CanPut {
            return;
        }
        let Some(bubble) = self.pending.and_then(|id| world.bubble(id)) else {
            return;
        };
        let clamped = self.config.clamp_x(x, bubble.tier.radius());
        world.set_x(bubble.id, clamped);
        self.drop_x = clamped;
    }

    fn on_collision<W: BubbleWorld<Id = Id>>(
        &mut self,
        world: &mut W,
        a: Id,
        b: Id,
        notices: &mut Vec<GameNotice>,
    ) {
        if self.status == GameStatus::GameOver {
            return;
        }
        if let Some(merge) = resolve_collision(world, a, b, self.material) {
            self.score += merge.reward;
            notices.push(GameNotice::Merged {
                tier: merge.tier,
                position: merge.position,
            });
            notices.push(GameNotice::ScoreChanged(self.score));
        }
    }

    fn on_tick<W, R>(
        &mut self,
        world: &mut W,
        rng: &mut R,
        delta: Duration,
        notices: &mut Vec<GameNotice>,
    ) where
        W: BubbleWorld<Id = Id>,
        R: Rng + ?Sized,
    {
        if self.status == GameStatus::GameOver {
            return;
        }
        if deadline_crossed(world, self.config.deadline_height) {
            self.status = GameStatus::GameOver;
            self.cooldown = None;
            world.set_paused(true);
            notices.push(GameNotice::GameOver { score: self.score });
            return;
        }
        if self.status != GameStatus::Interval {
            return;
        }
        let elapsed = self.cooldown.as_mut().is_some_and(|c| c.advance(delta));
        if elapsed {
            self.cooldown = None;
            self.spawn_pending(world, rng);
            self.status = GameStatus::CanPut;
        }
    }

    fn spawn_pending<W, R>(&mut self, world: &mut W, rng: &mut R)
    where
        W: BubbleWorld<Id = Id>,
        R: Rng + ?Sized,
    {
        if self.status == GameStatus::GameOver || self.pending.is_some() {
            return;
        }
        let tier = random_spawn_tier(rng);
        let x = self.config.clamp_x(self.drop_x, tier.radius());
        let bubble = create_bubble(tier, x, self.config.spawn_height(), BubbleCategory::Pending)
            .with_material(self.material);
        self.pending = Some(world.insert_bubble(bubble));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::MemoryWorld;
    use rand::rngs::mock::StepRng;

    fn started() -> (GameSession<u64>, MemoryWorld, StepRng) {
        let mut session = GameSession::new(GameConfig::default());
        let mut world = MemoryWorld::new();
        let mut rng = StepRng::new(0, 0);
        session.initialize(&mut world);
        session.dispatch(&mut world, &mut rng, WorldEvent::Input(InputEvent::Start));
        (session, world, rng)
    }

    fn tick(ms: u64) -> WorldEvent<u64> {
        WorldEvent::Tick {
            delta: Duration::from_millis(ms),
        }
    }

    #[test]
    fn initialize_builds_box_and_enters_ready() {
        let mut session = GameSession::<u64>::new(GameConfig::default());
        let mut world = MemoryWorld::new();
        let notices = session.initialize(&mut world);
        assert_eq!(session.status(), GameStatus::Ready);
        assert_eq!(session.score(), 0);
        assert_eq!(world.walls().len(), 3);
        assert_eq!(
            notices,
            vec![GameNotice::ScoreChanged(0), GameNotice::EnteredReady]
        );
    }

    #[test]
    fn start_spawns_one_pending_bubble_at_top_centre() {
        let (session, world, _) = started();
        assert_eq!(session.status(), GameStatus::CanPut);
        let pending = session.pending().and_then(|id| world.bubble(id)).expect("pending");
        assert_eq!(pending.category, BubbleCategory::Pending);
        assert_eq!(pending.position, Vec2::new(320.0, 650.0));
        assert_eq!(world.count(BubbleCategory::Pending), 1);
    }

    #[test]
    fn start_is_ignored_outside_ready() {
        let (mut session, mut world, mut rng) = started();
        let notices = session.dispatch(&mut world, &mut rng, WorldEvent::Input(InputEvent::Start));
        assert!(notices.is_empty());
        assert_eq!(world.count(BubbleCategory::Pending), 1);
    }

    #[test]
    fn drop_releases_and_arms_cooldown() {
        let (mut session, mut world, mut rng) = started();
        let id = session.pending().expect("pending");
        let notices = session.dispatch(&mut world, &mut rng, WorldEvent::Input(InputEvent::Drop));

        assert_eq!(notices, vec![GameNotice::Dropped]);
        assert_eq!(session.status(), GameStatus::Interval);
        assert_eq!(session.pending(), None);
        assert_eq!(world.bubble(id).map(|b| b.category), Some(BubbleCategory::Active));
        assert_eq!(session.cooldown_remaining(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn cooldown_spawns_next_bubble_after_500ms() {
        let (mut session, mut world, mut rng) = started();
        session.dispatch(&mut world, &mut rng, WorldEvent::Input(InputEvent::Drop));

        session.dispatch(&mut world, &mut rng, tick(300));
        assert_eq!(session.status(), GameStatus::Interval);
        assert_eq!(world.count(BubbleCategory::Pending), 0);

        session.dispatch(&mut world, &mut rng, tick(200));
        assert_eq!(session.status(), GameStatus::CanPut);
        assert_eq!(world.count(BubbleCategory::Pending), 1);
        assert_eq!(session.cooldown_remaining(), None);
    }

    #[test]
    fn drop_and_move_are_ignored_during_interval() {
        let (mut session, mut world, mut rng) = started();
        session.dispatch(&mut world, &mut rng, WorldEvent::Input(InputEvent::Drop));
        let before = world.bubbles();

        session.dispatch(&mut world, &mut rng, WorldEvent::Input(InputEvent::Drop));
        session.dispatch(
            &mut world,
            &mut rng,
            WorldEvent::Input(InputEvent::PointerMove { x: 100.0 }),
        );

        assert_eq!(world.bubbles(), before);
        assert_eq!(session.cooldown_remaining(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn pointer_move_clamps_to_left_wall() {
        let (mut session, mut world, mut rng) = started();
        session.dispatch(
            &mut world,
            &mut rng,
            WorldEvent::Input(InputEvent::PointerMove { x: -400.0 }),
        );
        let pending = session.pending().and_then(|id| world.bubble(id)).expect("pending");
        assert_eq!(pending.position.x, 30.0);
        assert_eq!(pending.position.y, 650.0);
    }

    #[test]
    fn next_spawn_reuses_last_pointer_x() {
        let (mut session, mut world, mut rng) = started();
        session.dispatch(
            &mut world,
            &mut rng,
            WorldEvent::Input(InputEvent::PointerMove { x: 200.0 }),
        );
        session.dispatch(&mut world, &mut rng, WorldEvent::Input(InputEvent::Drop));
        session.dispatch(&mut world, &mut rng, tick(500));

        let pending = session.pending().and_then(|id| world.bubble(id)).expect("pending");
        assert_eq!(pending.position.x, 200.0);
    }

    #[test]
    fn unrepresentable_cooldown_falls_back_instead_of_panicking() {
        let config = GameConfig {
            drop_cooldown_secs: 1e20,
            ..Default::default()
        };
        let mut session = GameSession::new(config);
        let mut world = MemoryWorld::new();
        let mut rng = StepRng::new(0, 0);
        session.initialize(&mut world);
        session.dispatch(&mut world, &mut rng, WorldEvent::Input(InputEvent::Start));
        session.dispatch(&mut world, &mut rng, WorldEvent::Input(InputEvent::Drop));
        assert_eq!(session.status(), GameStatus::Interval);
        assert_eq!(session.cooldown_remaining(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn restart_is_ignored_before_game_over() {
        let (mut session, mut world, mut rng) = started();
        let notices =
            session.dispatch(&mut world, &mut rng, WorldEvent::Input(InputEvent::Restart));
        assert!(notices.is_empty());
        assert_eq!(session.status(), GameStatus::CanPut);
    }

    #[test]
    fn game_over_pauses_world_and_cancels_cooldown() {
        let (mut session, mut world, mut rng) = started();
        session.dispatch(&mut world, &mut rng, WorldEvent::Input(InputEvent::Drop));
        let id = world.bubbles()[0].id;
        world.set_position(id, Vec2::new(320.0, 660.0));
        world.set_velocity(id, Vec2::new(0.0, 10.0));

        let notices = session.dispatch(&mut world, &mut rng, tick(16));

        assert_eq!(notices, vec![GameNotice::GameOver { score: 0 }]);
        assert!(session.is_game_over());
        assert!(world.is_paused());
        assert_eq!(session.cooldown_remaining(), None);

        session.dispatch(&mut world, &mut rng, tick(1000));
        assert_eq!(world.count(BubbleCategory::Pending), 0);
    }
}

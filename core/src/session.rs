use rand::prelude::*;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// What the presentation layer should currently show.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    Game,
    Winner,
    Loser,
}

/// Discrete input delivered by the front end.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Input {
    /// Left click or tap: reveals, or flags while flag mode is on.
    Primary(WorldPos),
    /// Right click or long press: toggles a flag.
    Secondary(WorldPos),
    /// The on-screen flag button.
    ToggleFlagMode,
    /// Restart key, only honoured on the winner and loser scenes.
    Restart,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct PendingTransition {
    due: Instant,
    scene: Scene,
}

/// One player's game context: engine, scene, flag mode and the delayed loss transition.
///
/// Everything is reset by [`Session::restart`].
#[derive(Debug)]
pub struct Session {
    settings: Settings,
    engine: PlayEngine,
    scene: Scene,
    flag_mode: bool,
    pending: Option<PendingTransition>,
    seeds: SmallRng,
    game_seed: Option<u64>,
}

impl Session {
    /// Starts a session with a random board. A seed in `settings` takes precedence over `seed`.
    pub fn new(settings: Settings, seed: u64) -> Result<Self> {
        let mut seeds = SmallRng::seed_from_u64(settings.seed_or(seed));
        let game_seed = seeds.random();
        let minefield = RandomMinefieldGenerator::new(game_seed).generate(settings.game)?;
        log::info!("New session, first game seed {}", game_seed);

        Ok(Self::with_engine(settings, PlayEngine::new(minefield), seeds, Some(game_seed)))
    }

    /// Starts a session on a prepared engine. Later restarts draw random boards from `seed`.
    ///
    /// The prepared board was not drawn from a seed, so [`Session::game_seed`] is `None` until the first restart.
    pub fn from_engine(settings: Settings, engine: PlayEngine, seed: u64) -> Self {
        Self::with_engine(settings, engine, SmallRng::seed_from_u64(seed), None)
    }

    fn with_engine(settings: Settings, engine: PlayEngine, seeds: SmallRng, game_seed: Option<u64>) -> Self {
        Self {
            settings,
            engine,
            scene: Scene::Game,
            flag_mode: false,
            pending: None,
            seeds,
            game_seed,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn outcome(&self) -> Outcome {
        self.engine.outcome()
    }

    pub fn flag_mode(&self) -> bool {
        self.flag_mode
    }

    pub fn bombs_left(&self) -> i64 {
        self.engine.bombs_left()
    }

    /// Seed the current board was generated from, if it was generated randomly.
    pub fn game_seed(&self) -> Option<u64> {
        self.game_seed
    }

    /// Where the end-of-game explosion plays, set once a bomb was revealed.
    pub fn explosion(&self) -> Option<WorldPos> {
        let geometry = self.engine.minefield().geometry();
        self.engine
            .triggered_bomb()
            .map(|coords| geometry.cell_center(coords))
    }

    /// Scene the session will switch to once the pending delay has elapsed.
    pub fn pending_scene(&self) -> Option<Scene> {
        self.pending.map(|pending| pending.scene)
    }

    /// Applies one input event. Returns whether anything observable changed.
    pub fn handle(&mut self, input: Input, now: Instant) -> bool {
        use Input::*;

        match (self.scene, input) {
            (Scene::Winner | Scene::Loser, Restart) => match self.restart() {
                Ok(()) => true,
                Err(err) => {
                    log::error!("Could not start a new game: {}", err);
                    false
                }
            },
            (Scene::Game, ToggleFlagMode) if !self.engine.is_finished() => {
                self.flag_mode = !self.flag_mode;
                log::debug!("Flag mode {}", if self.flag_mode { "on" } else { "off" });
                true
            }
            (Scene::Game, Primary(position)) if self.flag_mode => self.flag_at(position),
            (Scene::Game, Primary(position)) => self.reveal_at(position, now),
            (Scene::Game, Secondary(position)) => self.flag_at(position),
            (scene, input) => {
                log::trace!("Ignoring {:?} on {:?} scene", input, scene);
                false
            }
        }
    }

    /// Performs a transition whose delay has run out by `now`.
    pub fn update(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(pending) if pending.due <= now => {
                log::debug!("Switching to {:?} scene", pending.scene);
                self.scene = pending.scene;
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Throws the current board away and starts over on a fresh random one.
    pub fn restart(&mut self) -> Result<()> {
        let game_seed = self.seeds.random();
        let minefield = RandomMinefieldGenerator::new(game_seed).generate(self.settings.game)?;
        log::info!("New game, seed {}", game_seed);

        self.engine = PlayEngine::new(minefield);
        self.game_seed = Some(game_seed);
        self.scene = Scene::Game;
        self.flag_mode = false;
        self.pending = None;
        Ok(())
    }

    fn reveal_at(&mut self, position: WorldPos, now: Instant) -> bool {
        let Some(coords) = self.engine.minefield().coords_at(position) else {
            log::trace!("No cell under {:?}", position);
            return false;
        };

        match self.engine.reveal(coords) {
            Ok(RevealOutcome::HitBomb) => {
                self.pending = Some(PendingTransition {
                    due: now + self.settings.loss_delay(),
                    scene: Scene::Loser,
                });
                true
            }
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::trace!("Reveal at {:?} ignored: {}", coords, err);
                false
            }
        }
    }

    fn flag_at(&mut self, position: WorldPos) -> bool {
        let Some(coords) = self.engine.minefield().coords_at(position) else {
            log::trace!("No cell under {:?}", position);
            return false;
        };

        match self.engine.toggle_flag(coords) {
            Ok(MarkOutcome::Won) => {
                log::info!("All bombs flagged, game won");
                self.scene = Scene::Winner;
                true
            }
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::trace!("Flag at {:?} ignored: {}", coords, err);
                false
            }
        }
    }
}

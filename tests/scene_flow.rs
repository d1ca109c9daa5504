//! End-to-end scene flow: boot into a menu, load the game scene, and
//! check notification ordering, progress reporting and root swapping.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use gameflow::prelude::*;

//=========================================================================
// Shared Journal
//=========================================================================

type Journal = Rc<RefCell<Vec<String>>>;

fn record(journal: &Journal, entry: impl Into<String>) {
    journal.borrow_mut().push(entry.into());
}

fn position(journal: &Journal, entry: &str) -> usize {
    journal
        .borrow()
        .iter()
        .position(|e| e == entry)
        .unwrap_or_else(|| panic!("{} not recorded", entry))
}

//=========================================================================
// Persistent Managers
//=========================================================================

struct MusicDirector {
    journal: Journal,
    track: Option<String>,
}

impl Lifecycle for MusicDirector {}
impl AnyManager for MusicDirector {
    type Tier = PersistentTier;
}

impl SceneAware for MusicDirector {
    fn on_scene_loaded(&mut self, scene: &SceneInfo) {
        record(&self.journal, format!("music loaded {}", scene.name));
        self.track = Some(format!("{} theme", scene.name));
    }

    fn on_scene_exit(&mut self) {
        record(&self.journal, "music exit");
        self.track = None;
    }
}

struct SaveSystem {
    journal: Journal,
}

impl Lifecycle for SaveSystem {}
impl AnyManager for SaveSystem {
    type Tier = PersistentTier;
}

impl SceneAware for SaveSystem {
    fn on_scene_loaded(&mut self, scene: &SceneInfo) {
        record(&self.journal, format!("saves loaded {}", scene.name));
    }

    fn on_scene_exit(&mut self) {
        record(&self.journal, "saves exit");
    }
}

//=========================================================================
// Scene Content
//=========================================================================

struct WaveSpawner {
    journal: Journal,
}

impl Lifecycle for WaveSpawner {
    fn on_enter(&mut self) {
        record(&self.journal, "spawner enter");
    }

    fn on_exit(&mut self) {
        record(&self.journal, "spawner exit");
    }
}

impl AnyManager for WaveSpawner {
    type Tier = SceneTier;
}

struct MenuCursor {
    journal: Journal,
}

impl Lifecycle for MenuCursor {
    fn on_exit(&mut self) {
        record(&self.journal, "menu cursor exit");
    }
}

impl AnyManager for MenuCursor {
    type Tier = SceneTier;
}

struct GamePlayer {
    input: ControllerInput,
    jumps: u32,
}

impl GamePlayer {
    fn on_jump(&mut self, _event: &ActionEvent) {
        self.jumps += 1;
    }
}

impl Lifecycle for GamePlayer {}

impl Controller for GamePlayer {
    fn input(&self) -> &ControllerInput {
        &self.input
    }

    fn input_mut(&mut self) -> &mut ControllerInput {
        &mut self.input
    }

    fn handle_action(&mut self, event: &ActionEvent) -> bool {
        ActionTable::new().with("Jump", Self::on_jump).dispatch(self, event)
    }
}

struct Hero {
    journal: Journal,
}

impl Character for Hero {
    fn on_possessed(&mut self, _controller: ControllerKey) {
        record(&self.journal, "hero possessed");
    }
}

fn build_scene(name: &str, journal: &Journal) -> SceneRoot {
    match name {
        "Game" => SceneRoot::builder("Game")
            .with_manager(Box::new(WaveSpawner {
                journal: journal.clone(),
            }))
            .with_player_controller(Box::new(GamePlayer {
                input: ControllerInput::with_action_map("Gameplay"),
                jumps: 0,
            }))
            .with_start_character(Box::new(Hero {
                journal: journal.clone(),
            }))
            .build()
            .unwrap(),
        other => SceneRoot::builder(other)
            .with_manager(Box::new(MenuCursor {
                journal: journal.clone(),
            }))
            .build()
            .unwrap(),
    }
}

//=========================================================================
// Fake Host
//=========================================================================

struct FakeLoad {
    scene: String,
    samples: VecDeque<f32>,
    journal: Journal,
}

impl PendingLoad for FakeLoad {
    fn poll(&mut self) -> LoadStatus {
        match self.samples.pop_front() {
            Some(sample) => {
                record(&self.journal, format!("sample {}", sample));
                LoadStatus::Pending(sample)
            }
            None => {
                record(&self.journal, "load done");
                LoadStatus::Done
            }
        }
    }

    fn finish(self: Box<Self>) -> LoadedScene {
        let root = build_scene(&self.scene, &self.journal);
        LoadedScene {
            name: self.scene,
            root: Some(root),
        }
    }
}

struct FakeHost {
    samples: Vec<f32>,
    journal: Journal,
}

impl SceneHost for FakeHost {
    fn begin_load(&mut self, scene: &str) -> Box<dyn PendingLoad> {
        record(&self.journal, format!("begin {}", scene));
        Box::new(FakeLoad {
            scene: scene.to_string(),
            samples: self.samples.iter().copied().collect(),
            journal: self.journal.clone(),
        })
    }
}

//=========================================================================
// Setup
//=========================================================================

const CATALOG: &str = r#"scene_names = ["Menu", "Game"]"#;

fn boot(journal: &Journal) -> GameContext {
    let root = PersistentRoot::builder()
        .with_manager(Box::new(MusicDirector {
            journal: journal.clone(),
            track: None,
        }))
        .with_manager(Box::new(SaveSystem {
            journal: journal.clone(),
        }))
        .with_catalog(SceneCatalog::from_toml_str(CATALOG).unwrap())
        .with_progress_capacity(16)
        .build()
        .unwrap();

    let mut context = GameContext::new();
    assert_eq!(context.install(root), RootInstall::Installed);
    assert!(context.register_scene_root(build_scene("Menu", journal)));
    context
}

fn run_to_idle(context: &mut GameContext) -> Vec<TransitionStep> {
    let mut steps = Vec::new();
    loop {
        let step = context.tick();
        if step == TransitionStep::Idle {
            return steps;
        }
        steps.push(step);
    }
}

//=========================================================================
// Scenarios
//=========================================================================

#[test]
fn boot_scene_announced_to_persistent_managers() {
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let context = boot(&journal);

    assert!(position(&journal, "music loaded Menu") < position(&journal, "saves loaded Menu"));
    let music = context.persistent_manager::<MusicDirector>().unwrap();
    assert_eq!(music.track.as_deref(), Some("Menu theme"));
}

#[test]
fn menu_to_game_notification_order() {
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let mut context = boot(&journal);
    let mut host = FakeHost {
        samples: vec![0.3, 0.9],
        journal: journal.clone(),
    };

    assert!(context.load_scene(&mut host, "Game"));
    let steps = run_to_idle(&mut context);

    // Exit notifications reach every persistent manager before the load starts
    assert!(position(&journal, "music exit") < position(&journal, "begin Game"));
    assert!(position(&journal, "saves exit") < position(&journal, "begin Game"));

    // Entry notifications wait for completion plus the settle tick
    let done = position(&journal, "load done");
    assert!(position(&journal, "music loaded Game") > done);
    assert!(position(&journal, "saves loaded Game") > done);
    assert_eq!(
        steps,
        vec![
            TransitionStep::Loading { progress: 0.3 },
            TransitionStep::Loading { progress: 0.9 },
            TransitionStep::Swapped {
                scene: "Game".to_string()
            },
            TransitionStep::Completed(SceneInfo::new("Game", Some(1))),
        ]
    );

    // No notification is interleaved with the loading samples
    let entries = journal.borrow();
    let begin = entries.iter().position(|e| e == "begin Game").unwrap();
    assert!(entries[begin..=done]
        .iter()
        .all(|e| !e.starts_with("music") && !e.starts_with("saves")));
}

#[test]
fn menu_root_replaced_by_game_root() {
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let mut context = boot(&journal);
    let mut host = FakeHost {
        samples: vec![0.5],
        journal: journal.clone(),
    };

    context.load_scene(&mut host, "Game");
    run_to_idle(&mut context);

    let scene = context.scene_root().unwrap();
    assert_eq!(scene.name(), "Game");
    assert!(context.manager::<WaveSpawner>().is_some());
    assert!(context.manager::<MenuCursor>().is_none());
    assert!(context.controlled_character::<Hero>().is_some());

    // The old root shut down before the new one started
    assert!(position(&journal, "menu cursor exit") < position(&journal, "spawner enter"));
    assert!(position(&journal, "spawner enter") < position(&journal, "hero possessed"));

    let music = context.persistent_manager::<MusicDirector>().unwrap();
    assert_eq!(music.track.as_deref(), Some("Game theme"));
}

#[test]
fn progress_ends_at_one_even_when_host_stops_short() {
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let mut context = boot(&journal);
    let mut host = FakeHost {
        samples: vec![0.2, 0.1, 0.85],
        journal: journal.clone(),
    };
    let progress = context.root_mut().unwrap().subscribe_progress();

    context.load_scene(&mut host, "Game");
    run_to_idle(&mut context);

    let samples: Vec<LoadProgress> = progress.try_iter().collect();
    let values: Vec<f32> = samples.iter().map(|s| s.progress).collect();

    assert_eq!(values, vec![0.2, 0.2, 0.85, 1.0]);
    assert!(samples.iter().all(|s| s.scene == "Game"));
}

#[test]
fn second_request_during_load_is_ignored() {
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let mut context = boot(&journal);
    let mut host = FakeHost {
        samples: vec![0.4, 0.6],
        journal: journal.clone(),
    };

    assert!(context.load_scene(&mut host, "Game"));
    context.tick();
    let before = context.root().unwrap().transition_state();

    assert!(!context.load_scene(&mut host, "Menu"));

    assert_eq!(context.root().unwrap().transition_state(), before);
    assert_eq!(journal.borrow().iter().filter(|e| e.starts_with("begin")).count(), 1);

    run_to_idle(&mut context);
    assert_eq!(context.scene_root().map(SceneRoot::name), Some("Game"));
}

#[test]
fn actions_reach_player_only_in_its_map() {
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let mut context = boot(&journal);
    let mut host = FakeHost {
        samples: vec![],
        journal: journal.clone(),
    };

    context.load_scene(&mut host, "Game");
    run_to_idle(&mut context);

    assert!(context.route_action(&ActionEvent::performed("Jump").in_map("Gameplay")));
    assert!(!context.route_action(&ActionEvent::performed("Jump").in_map("Menu")));
    assert_eq!(context.player_controller::<GamePlayer>().unwrap().jumps, 1);
}

#[test]
fn requirements_validated_against_live_roots() {
    struct Hud;

    impl RequiresManagers for Hud {
        fn requirements() -> Requirements {
            Requirements::of::<Self>()
                .persistent::<MusicDirector>()
                .manager::<MenuCursor>()
        }
    }

    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let mut context = boot(&journal);
    let root = context.root().unwrap();

    let report = root.validate(&[Hud::requirements()]).unwrap();
    assert!(report.is_satisfied());
    assert_eq!(report.checked, 2);

    context.teardown();
    assert!(context.scene_root().is_none());
    assert_eq!(journal.borrow().last().map(String::as_str), Some("menu cursor exit"));
}

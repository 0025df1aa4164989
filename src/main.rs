//! Aberred texture viewer.
//!
//! Opens a raylib window and draws every texture given on the command line:
//! positional paths as static textures, `--animated` paths as sprite sheets
//! sliced by the JSON manifest next to them. Animations advance on a fixed
//! simulation step (`[animation] tick_rate` in `config.ini`), independent of
//! the render frame rate.
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults if missing), open the window
//! 2. Load textures into a [`Scene`] stored in the ECS world
//! 3. Each frame:
//!    - convert the frame time into fixed steps and run the tick schedule once per step
//!    - refresh the `uTime` uniform of every texture
//!    - draw the scene
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- assets/logo.png --animated assets/hero.png
//! cargo run --release -- --inspect --animated assets/hero.png
//! ```

use std::fmt::Display;
use std::path::{Path, PathBuf};

use aberredtextures::backend::ImageHandle;
use aberredtextures::backend::headless::HeadlessBackend;
use aberredtextures::backend::raylib_backend::{RaylibBackend, RaylibDrawTarget};
use aberredtextures::components::transform::Transform2D;
use aberredtextures::components::uniforms::Uniforms;
use aberredtextures::resources::gameconfig::GameConfig;
use aberredtextures::resources::manifest::ManifestPathStrategy;
use aberredtextures::resources::scene::Scene;
use aberredtextures::resources::worldtime::{FixedStep, WorldTime};
use aberredtextures::systems::animation::tick_scene;
use aberredtextures::systems::render::render_scene;
use aberredtextures::systems::time::update_world_time;
use aberredtextures::textures::Renderable;
use aberredtextures::textures::animatedtexture::AnimatedTexture;
use aberredtextures::textures::statictexture::StaticTexture;
use bevy_ecs::prelude::*;
use clap::Parser;
use raylib::prelude::*;

/// Gap in pixels between textures laid out side by side.
const LAYOUT_GAP: f32 = 16.0;

/// Aberred texture viewer
#[derive(Parser)]
#[command(version, about = "Draws static and sprite-sheet animated textures through a shader.")]
struct Cli {
    /// Static images to draw.
    #[arg(value_name = "IMAGE")]
    images: Vec<PathBuf>,

    /// Sprite sheet with a JSON manifest next to it. May be repeated.
    #[arg(long = "animated", value_name = "SHEET")]
    animated: Vec<PathBuf>,

    /// Fragment shader applied to every texture (identity shader when omitted).
    #[arg(long, value_name = "FILE")]
    shader: Option<PathBuf>,

    /// Clip played by animated textures.
    #[arg(long, default_value_t = 0)]
    clip: usize,

    /// Configuration file.
    #[arg(long, value_name = "FILE", default_value = "./config.ini")]
    config: PathBuf,

    /// Derive manifest paths by swapping only the file extension instead of
    /// replacing every "png" in the path.
    #[arg(long)]
    extension_swap: bool,

    /// Load every asset without opening a window, print a summary and exit.
    #[arg(long)]
    inspect: bool,
}

/// Broken asset references are unrecoverable: log and stop.
fn fatal(context: &str, err: impl Display) -> ! {
    log::error!("{}: {}", context, err);
    std::process::exit(1);
}

fn scene_key(prefix: &str, path: &Path) -> String {
    format!("{}:{}", prefix, path.display())
}

fn inspect(cli: &Cli, shader: Option<&str>, strategy: ManifestPathStrategy) {
    let mut backend = HeadlessBackend::new();
    for path in &cli.images {
        let texture = StaticTexture::load(&mut backend, path, shader)
            .unwrap_or_else(|e| fatal("Failed to load texture", e));
        println!(
            "{}: static {}x{}",
            path.display(),
            texture.image().width(),
            texture.image().height()
        );
    }
    for path in &cli.animated {
        let texture = AnimatedTexture::load_with_strategy(&mut backend, path, shader, strategy)
            .unwrap_or_else(|e| fatal("Failed to load sprite sheet", e));
        println!(
            "{}: sheet {}x{}, manifest {}, {} clips",
            path.display(),
            texture.sheet().width(),
            texture.sheet().height(),
            texture.manifest_path().display(),
            texture.clip_count()
        );
        for (index, clip) in texture.clips().iter().enumerate() {
            let rects: Vec<String> = clip
                .frames
                .iter()
                .map(|f| format!("[{},{},{},{}]", f.rect.x0, f.rect.y0, f.rect.x1, f.rect.y1))
                .collect();
            println!(
                "  clip {}: {} frames, speed {} {}",
                index,
                clip.len(),
                clip.speed,
                rects.join(" ")
            );
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if cli.extension_swap {
        config.manifest_strategy = ManifestPathStrategy::ExtensionSwap;
    }

    let shader_source = cli.shader.as_ref().map(|path| {
        std::fs::read_to_string(path)
            .unwrap_or_else(|e| fatal(&format!("Failed to read shader {}", path.display()), e))
    });
    let shader = shader_source.as_deref();

    // Early-exit: print what the manifests produce (no window needed)
    if cli.inspect {
        inspect(&cli, shader, config.manifest_strategy);
        return;
    }

    log::info!("Hello, world! This is the Aberred texture viewer!");
    // --------------- Raylib window ---------------
    let (mut rl, thread) = {
        let mut builder = raylib::init();
        builder
            .size(config.window_width as i32, config.window_height as i32)
            .resizable()
            .title("Aberred Textures");
        if config.vsync {
            builder.vsync();
        }
        builder.build()
    };
    rl.set_target_fps(config.target_fps);
    let mut backend = RaylibBackend::new(rl, thread);

    // --------------- Textures ---------------
    let mut scene: Scene<RaylibBackend> = Scene::new();
    let mut cursor_x = LAYOUT_GAP;
    for path in &cli.images {
        let texture = StaticTexture::load(&mut backend, path, shader)
            .unwrap_or_else(|e| fatal("Failed to load texture", e));
        let width = texture.image().width() as f32;
        scene.add(
            &scene_key("static", path),
            texture,
            Transform2D::at(cursor_x, LAYOUT_GAP),
        );
        cursor_x += width + LAYOUT_GAP;
    }
    for path in &cli.animated {
        let mut texture = AnimatedTexture::load_with_strategy(
            &mut backend,
            path,
            shader,
            config.manifest_strategy,
        )
        .unwrap_or_else(|e| fatal("Failed to load sprite sheet", e));
        if texture.clip_count() > 0 {
            if let Err(e) = texture.set_active_clip(cli.clip) {
                log::warn!("{}: {}; playing clip 0", path.display(), e);
            }
        }
        let width = texture.current_frame().map(|f| f.width()).unwrap_or(0) as f32;
        scene.add(
            &scene_key("animated", path),
            texture,
            Transform2D::at(cursor_x, LAYOUT_GAP),
        );
        cursor_x += width + LAYOUT_GAP;
    }
    log::info!("Scene ready with {} textures", scene.len());

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(FixedStep::from_rate(config.tick_rate));
    world.insert_resource(config);
    world.insert_non_send_resource(scene);

    let mut update = Schedule::default();
    update.add_systems(tick_scene::<RaylibBackend>);
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    while !backend.rl.window_should_close() {
        let dt = backend.rl.get_frame_time();
        let steps = update_world_time(&mut world, dt);
        for _ in 0..steps {
            update.run(&mut world);
        }

        let elapsed = world.resource::<WorldTime>().elapsed;
        {
            let mut scene = world.non_send_resource_mut::<Scene<RaylibBackend>>();
            let keys: Vec<String> = scene.keys().map(str::to_string).collect();
            for key in keys {
                scene.set_uniforms(&key, Uniforms::new().with("uTime", elapsed));
            }
        }

        let fps_y = (backend.rl.get_screen_height() - 24).max(0);
        let mut d = backend.rl.begin_drawing(&backend.thread);
        d.clear_background(Color::DARKGRAY);
        {
            let mut target = RaylibDrawTarget::new(&mut d);
            render_scene::<RaylibBackend>(&mut world, &mut target);
        }
        d.draw_fps(10, fps_y);
    }
    // Textures must be unloaded while the GL context is still alive.
    drop(world);
}

//! Scene driven through the ECS world: fixed-step ticking, rendering, reload.

mod common;

use bevy_ecs::prelude::*;

use aberredtextures::backend::headless::{HeadlessBackend, RecordingTarget};
use aberredtextures::components::frame::Frame;
use aberredtextures::components::transform::Transform2D;
use aberredtextures::components::uniforms::Uniforms;
use aberredtextures::resources::scene::Scene;
use aberredtextures::resources::worldtime::{FixedStep, WorldTime};
use aberredtextures::systems::animation::tick_scene;
use aberredtextures::systems::reload::reload_scene;
use aberredtextures::systems::render::render_scene;
use aberredtextures::systems::time::update_world_time;
use aberredtextures::textures::animatedtexture::AnimatedTexture;
use aberredtextures::textures::statictexture::StaticTexture;

use common::{TWO_CLIP_MANIFEST, TempAssets};

fn make_world(assets: &TempAssets, backend: &mut HeadlessBackend) -> World {
    let logo = assets.write_sheet("logo.png", 24, 24);
    let hero = assets.write_sheet("hero.png", 48, 32);
    assets.write_manifest("hero.json", TWO_CLIP_MANIFEST);

    let mut scene: Scene<HeadlessBackend> = Scene::new();
    scene.add(
        "logo",
        StaticTexture::load(backend, &logo, None).unwrap(),
        Transform2D::at(0.0, 0.0),
    );
    scene.add(
        "hero",
        AnimatedTexture::load(backend, &hero, None).unwrap(),
        Transform2D::at(100.0, 50.0),
    );

    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(FixedStep::from_rate(10));
    world.insert_non_send_resource(scene);
    world
}

fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(tick_scene::<HeadlessBackend>);
    schedule
}

fn hero_frame(world: &mut World) -> Frame {
    let mut target = RecordingTarget::new();
    render_scene::<HeadlessBackend>(world, &mut target);
    target.calls[1].regions[0]
}

#[test]
fn render_draws_every_entry_in_order() {
    let assets = TempAssets::new("scene_render");
    let mut backend = HeadlessBackend::new();
    let mut world = make_world(&assets, &mut backend);

    let mut target = RecordingTarget::new();
    render_scene::<HeadlessBackend>(&mut world, &mut target);

    assert_eq!(target.calls.len(), 2);
    assert_eq!((target.calls[0].width, target.calls[0].height), (24, 24));
    assert_eq!(target.calls[0].transform, Transform2D::at(0.0, 0.0));
    assert_eq!((target.calls[1].width, target.calls[1].height), (16, 16));
    assert_eq!(target.calls[1].transform, Transform2D::at(100.0, 50.0));
}

#[test]
fn tick_system_advances_animated_entries_only() {
    let assets = TempAssets::new("scene_tick");
    let mut backend = HeadlessBackend::new();
    let mut world = make_world(&assets, &mut backend);
    let mut schedule = tick_schedule();

    assert_eq!(hero_frame(&mut world), Frame::new(0, 0, 16, 16));
    // speed 0.5: first tick advances, then every third tick (1 -> 0.5 -> 0 -> -0.5)
    schedule.run(&mut world);
    assert_eq!(hero_frame(&mut world), Frame::new(16, 0, 32, 16));
    schedule.run(&mut world);
    schedule.run(&mut world);
    assert_eq!(hero_frame(&mut world), Frame::new(16, 0, 32, 16));
    schedule.run(&mut world);
    assert_eq!(hero_frame(&mut world), Frame::new(32, 0, 48, 16));

    assert_eq!(world.resource::<WorldTime>().ticks, 4);

    let mut target = RecordingTarget::new();
    render_scene::<HeadlessBackend>(&mut world, &mut target);
    assert_eq!(target.calls[0].regions[0], Frame::full(24, 24));
}

#[test]
fn frame_time_is_converted_into_fixed_steps() {
    let assets = TempAssets::new("scene_fixed_step");
    let mut backend = HeadlessBackend::new();
    let mut world = make_world(&assets, &mut backend);
    let mut schedule = tick_schedule();

    // 10 steps per second: 0.25s of frame time runs exactly two steps
    let steps = update_world_time(&mut world, 0.25);
    assert_eq!(steps, 2);
    for _ in 0..steps {
        schedule.run(&mut world);
    }
    assert_eq!(world.resource::<WorldTime>().ticks, 2);
    assert!((world.resource::<WorldTime>().elapsed - 0.25).abs() < 1e-6);

    // short frames accumulate until a step is due
    assert_eq!(update_world_time(&mut world, 0.03), 0);
    assert_eq!(update_world_time(&mut world, 0.03), 1);
}

#[test]
fn time_scale_slows_fixed_steps() {
    let assets = TempAssets::new("scene_time_scale");
    let mut backend = HeadlessBackend::new();
    let mut world = make_world(&assets, &mut backend);
    world.insert_resource(WorldTime::default().with_time_scale(0.5));

    assert_eq!(update_world_time(&mut world, 0.4), 2);
    assert!((world.resource::<WorldTime>().delta - 0.2).abs() < 1e-6);
}

#[test]
fn uniforms_are_swapped_per_entry() {
    let assets = TempAssets::new("scene_uniforms");
    let mut backend = HeadlessBackend::new();
    let mut world = make_world(&assets, &mut backend);

    {
        let mut scene = world.non_send_resource_mut::<Scene<HeadlessBackend>>();
        assert!(scene.set_uniforms("hero", Uniforms::new().with("uTime", 1.0_f32)));
        assert!(scene.set_uniforms("hero", Uniforms::new().with("uFlash", 1)));
        assert!(!scene.set_uniforms("ghost", Uniforms::new()));
    }

    let mut target = RecordingTarget::new();
    render_scene::<HeadlessBackend>(&mut world, &mut target);
    assert!(target.calls[0].uniforms.is_empty());
    assert!(target.calls[1].uniforms.contains("uFlash"));
    assert!(!target.calls[1].uniforms.contains("uTime"));
}

#[test]
fn reload_scene_keeps_animation_progress() {
    let assets = TempAssets::new("scene_reload");
    let mut backend = HeadlessBackend::new();
    let mut world = make_world(&assets, &mut backend);
    let mut schedule = tick_schedule();
    schedule.run(&mut world);

    reload_scene::<HeadlessBackend>(&mut world, &mut backend).unwrap();
    assert_eq!(hero_frame(&mut world), Frame::new(16, 0, 32, 16));
    // two decodes at load, two more on reload
    assert_eq!(backend.decoded, 4);
}

#[test]
fn reload_scene_reports_first_failure() {
    let assets = TempAssets::new("scene_reload_fail");
    let mut backend = HeadlessBackend::new();
    let mut world = make_world(&assets, &mut backend);

    std::fs::remove_file(assets.path("logo.png")).unwrap();
    assert!(reload_scene::<HeadlessBackend>(&mut world, &mut backend).is_err());
    // the failing entry stops the pass before the sprite sheet is touched
    assert_eq!(backend.decoded, 2);
}

#[test]
fn scene_add_replaces_existing_key() {
    let assets = TempAssets::new("scene_replace");
    let mut backend = HeadlessBackend::new();
    let small = assets.write_sheet("small.png", 4, 4);
    let big = assets.write_sheet("big.png", 12, 12);

    let mut scene: Scene<HeadlessBackend> = Scene::new();
    scene.add("a", StaticTexture::load(&mut backend, &small, None).unwrap(), Transform2D::default());
    scene.add("b", StaticTexture::load(&mut backend, &small, None).unwrap(), Transform2D::default());
    scene.add("a", StaticTexture::load(&mut backend, &big, None).unwrap(), Transform2D::default());

    assert_eq!(scene.len(), 2);
    assert_eq!(scene.keys().collect::<Vec<_>>(), vec!["a", "b"]);

    let mut target = RecordingTarget::new();
    scene.draw_all(&mut target);
    assert_eq!(target.calls[0].width, 12);

    assert!(scene.remove("a").is_some());
    assert!(scene.get("a").is_none());
    assert_eq!(scene.len(), 1);
}

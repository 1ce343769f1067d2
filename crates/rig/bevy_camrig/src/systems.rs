use bevy::prelude::*;
use camrig_core::HostMode;

use crate::resources::{CamRig, LastRigFrame, TimelineHost};
use crate::scene::WorldScene;

fn frame_dt(world: &World) -> f32 {
    world
        .get_resource::<Time>()
        .map(|t| t.delta_seconds())
        .unwrap_or(0.0)
}

/// Bind pending timeline tracks, advance playback and rewind on stop.
pub fn timeline_system(world: &mut World) {
    if !world.contains_resource::<TimelineHost>() {
        return;
    }
    let dt = frame_dt(world);
    world.resource_scope(|world, mut host: Mut<TimelineHost>| {
        let host = &mut *host;
        if host.resolver.state() == camrig_core::ResolverState::Unresolved {
            let scene = WorldScene::new(world);
            let report = host.resolver.activate(
                Some(&mut host.director),
                &scene,
                &mut host.diagnostics,
                HostMode::Playing,
            );
            if report.is_some() {
                host.last_report = report;
            }
        }
        host.director.advance(dt as f64);
        host.rewind.tick(&mut host.director);
    });
}

/// Step the rig against the world: activations, late-update writers, then
/// camera pipelines. Runs exclusively so writers can touch any entity.
pub fn step_rig_system(world: &mut World) {
    if !world.contains_resource::<CamRig>() {
        return;
    }
    let dt = frame_dt(world);
    let frame = world.resource_scope(|world, mut rig: Mut<CamRig>| {
        let mut scene = WorldScene::new(world);
        rig.0.step(&mut scene, dt)
    });
    world.insert_resource(LastRigFrame(Some(frame)));
}

use camrig_core::{
    AxisLockConfig, AxisLocker, AxisScaleConfig, AxisScaler, CameraExtension, CameraState,
    CameraTargetConfig, CameraTargetResolver, DiagnosticKind, MemoryScene, ObjectId,
    PipelineStage, Rig, SpatialState, SpatialStore, VirtualCamera,
};

fn approx3(a: [f32; 3], b: [f32; 3]) {
    for i in 0..3 {
        assert!((a[i] - b[i]).abs() <= 1e-4, "left={a:?} right={b:?}");
    }
}

fn targets(follow: Option<&str>, look_at: Option<&str>) -> CameraTargetResolver {
    CameraTargetResolver::new(CameraTargetConfig {
        follow: follow.map(str::to_string),
        look_at: look_at.map(str::to_string),
    })
}

/// Records the stages it saw, in order.
#[derive(Debug, Default)]
struct StageRecorder {
    seen: Vec<PipelineStage>,
}

impl CameraExtension for StageRecorder {
    fn post_pipeline_stage(&mut self, stage: PipelineStage, _state: &mut CameraState, _dt: f32) {
        self.seen.push(stage);
    }

    fn type_name(&self) -> &'static str {
        "StageRecorder"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[test]
fn follow_and_look_at_commit_to_owner_and_output() {
    let mut scene = MemoryScene::new();
    let rig_obj = scene.spawn("CameraRig", SpatialState::default());
    let output = scene.spawn("MainCamera", SpatialState::default());
    scene.spawn("Hero", SpatialState::at([1.0, 0.0, 5.0]));
    scene.spawn("Boss", SpatialState::at([11.0, 2.0, -1.0]));

    let cam = VirtualCamera::new("main", rig_obj)
        .with_output(output)
        .with_follow_offset([0.0, 2.0, -6.0])
        .with_targets(targets(Some("Hero"), Some("Boss")));
    let mut rig = Rig::default();
    rig.add_camera(cam).unwrap();

    let frame = rig.step(&mut scene, 0.016);
    assert!(frame.diagnostics.is_empty());
    assert_eq!(frame.cameras.len(), 1);
    let (id, state) = &frame.cameras[0];
    assert_eq!(id, "main");
    approx3(state.raw_position, [1.0, 2.0, -1.0]);
    // Boss sits straight along +X from the camera.
    approx3(state.raw_orientation, [0.0, 90.0, 0.0]);

    assert_eq!(scene.state(rig_obj), scene.state(output));
    assert_eq!(rig.camera("main").unwrap().last_state(), Some(*state));
}

#[test]
fn extensions_run_after_every_stage_in_order() {
    let mut scene = MemoryScene::new();
    let rig_obj = scene.spawn("CameraRig", SpatialState::default());
    let mut cam = VirtualCamera::new("main", rig_obj);
    cam.add_extension("rec", Box::new(StageRecorder::default()))
        .unwrap();
    let mut rig = Rig::default();
    rig.add_camera(cam).unwrap();

    rig.step(&mut scene, 0.016);
    let rec = rig.camera("main").unwrap().extension::<StageRecorder>("rec").unwrap();
    assert_eq!(rec.seen, PipelineStage::ORDER.to_vec());
}

#[test]
fn axis_scaler_scales_offset_and_reset_recaptures() {
    let mut scene = MemoryScene::new();
    let rig_obj = scene.spawn("CameraRig", SpatialState::default());
    let hero = scene.spawn("Hero", SpatialState::at([1.0, 0.0, 5.0]));
    let mut cam = VirtualCamera::new("main", rig_obj)
        .with_follow_offset([0.0, 2.0, -6.0])
        .with_targets(targets(Some("Hero"), None));
    cam.add_extension(
        "flatten",
        Box::new(AxisScaler::new(AxisScaleConfig {
            scale: [1.0, 0.0, 1.0],
        })),
    )
    .unwrap();
    let mut rig = Rig::default();
    rig.add_camera(cam).unwrap();

    let frame = rig.step(&mut scene, 0.016);
    approx3(frame.cameras[0].1.raw_position, [1.0, 2.0, -1.0]);

    scene.set_position(hero, [3.0, 5.0, 5.0]);
    let frame = rig.step(&mut scene, 0.016);
    approx3(frame.cameras[0].1.raw_position, [3.0, 2.0, -1.0]);

    // A new baseline is taken at this tick's Body position, so the scaled
    // offset is zero.
    rig.extension_mut::<AxisScaler>("main", "flatten").unwrap().reset();
    let frame = rig.step(&mut scene, 0.016);
    approx3(frame.cameras[0].1.raw_position, [3.0, 7.0, -1.0]);
    assert_eq!(
        rig.camera("main")
            .unwrap()
            .extension::<AxisScaler>("flatten")
            .unwrap()
            .baseline(),
        Some([3.0, 7.0, -1.0])
    );
}

#[test]
fn axis_lock_extension_applies_at_finalize() {
    let mut scene = MemoryScene::new();
    let rig_obj = scene.spawn("CameraRig", SpatialState::new([0.0; 3], [5.0, 10.0, 45.0]));
    let mut lock = AxisLockConfig::fixed_position(&[]);
    lock.rotation[2].locked = true;
    let mut cam = VirtualCamera::new("main", rig_obj);
    cam.add_extension("no_roll", Box::new(AxisLocker::new(lock)))
        .unwrap();
    let mut rig = Rig::default();
    rig.add_camera(cam).unwrap();

    rig.step(&mut scene, 0.016);
    assert_eq!(scene.state(rig_obj).unwrap().rotation, [5.0, 10.0, 0.0]);

    // Disabled extensions are skipped.
    scene.set_state(rig_obj, SpatialState::new([0.0; 3], [5.0, 10.0, 45.0]));
    rig.camera_mut("main")
        .unwrap()
        .set_extension_enabled("no_roll", false)
        .unwrap();
    rig.step(&mut scene, 0.016);
    assert_eq!(scene.state(rig_obj).unwrap().rotation, [5.0, 10.0, 45.0]);
}

#[test]
fn lock_extension_current_uses_owner_state() {
    let mut scene = MemoryScene::new();
    let rig_obj = scene.spawn("CameraRig", SpatialState::new([1.0, 2.0, 3.0], [0.0, 30.0, 0.0]));
    let mut cam = VirtualCamera::new("main", rig_obj);
    cam.add_extension(
        "lock",
        Box::new(AxisLocker::new(AxisLockConfig::fixed_position(&[]))),
    )
    .unwrap();
    let mut rig = Rig::default();
    rig.add_camera(cam).unwrap();

    rig.lock_extension_current("main", "lock", &scene).unwrap();
    let locker = rig.camera("main").unwrap().extension::<AxisLocker>("lock").unwrap();
    assert_eq!(locker.fixed_position(), [1.0, 2.0, 3.0]);
    assert_eq!(locker.fixed_rotation(), [0.0, 30.0, 0.0]);
}

#[test]
fn missing_follow_target_warns_and_keeps_previous() {
    let mut scene = MemoryScene::new();
    let rig_obj = scene.spawn("CameraRig", SpatialState::at([0.0, 1.0, 0.0]));
    let mut rig = Rig::default();
    rig.add_camera(
        VirtualCamera::new("main", rig_obj).with_targets(targets(Some("Ghost"), Some("Wraith"))),
    )
    .unwrap();

    let frame = rig.step(&mut scene, 0.016);
    let misses: Vec<_> = frame
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::LookupFailure)
        .collect();
    assert_eq!(misses.len(), 2);
    assert!(misses[0].message.contains("Ghost"));
    assert!(misses[1].message.contains("Wraith"));
    assert_eq!(rig.camera("main").unwrap().follow, None);
    approx3(frame.cameras[0].1.raw_position, [0.0, 1.0, 0.0]);
}

#[test]
fn camera_without_owner_is_inert() {
    let mut scene = MemoryScene::new();
    let mut rig = Rig::default();
    rig.add_camera(VirtualCamera::new("orphan", ObjectId(999)))
        .unwrap();

    let frame = rig.step(&mut scene, 0.016);
    assert!(frame.cameras.is_empty());
    assert_eq!(frame.diagnostics.len(), 1);
    assert_eq!(
        frame.diagnostics[0].kind,
        DiagnosticKind::MissingUpstreamComponent
    );
    assert!(rig.camera("orphan").unwrap().is_inert());
}

#[test]
fn resolving_targets_for_unknown_camera_reports_missing_component() {
    let mut scene = MemoryScene::new();
    let rig_obj = scene.spawn("CameraRig", SpatialState::default());
    let hero = scene.spawn("Hero", SpatialState::default());
    let mut rig = Rig::default();
    rig.add_camera(VirtualCamera::new("main", rig_obj)).unwrap();

    rig.resolve_camera_targets("nope", &scene);
    assert_eq!(
        rig.diagnostics().count(DiagnosticKind::MissingUpstreamComponent),
        1
    );

    rig.camera_mut("main").unwrap().target_resolver = targets(Some("Hero"), None);
    rig.resolve_camera_targets("main", &scene);
    assert_eq!(rig.camera("main").unwrap().follow, Some(hero));
}

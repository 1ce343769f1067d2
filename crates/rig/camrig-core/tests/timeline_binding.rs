use camrig_core::diagnostics::{Diagnostics, DiagnosticsCfg};
use camrig_core::timeline::binding::BindingEntry;
use camrig_core::{
    BindingSet, BindingTarget, ComponentKind, DiagnosticKind, Director, HostMode, MemoryScene,
    PlayableDirector, ResolverState, SpatialState, TimelineAsset, TimelineBindingResolver,
    TrackKind,
};

fn two_tracks() -> TimelineAsset {
    let mut asset = TimelineAsset::new("shot", 2.0);
    asset.push_track("Track1", TrackKind::Animation);
    asset.push_track("Track2", TrackKind::Activation);
    asset
}

fn diags() -> Diagnostics {
    Diagnostics::new(DiagnosticsCfg::default())
}

#[test]
fn binds_animator_and_leaves_unmapped_track_alone() {
    let mut scene = MemoryScene::new();
    let hero = scene.spawn("Hero", SpatialState::default());
    scene.add_component(hero, ComponentKind::Animator);
    let asset = two_tracks();
    let t1 = asset.track("Track1").unwrap().source;
    let t2 = asset.track("Track2").unwrap().source;
    let mut director = PlayableDirector::new(asset);

    let mut resolver =
        TimelineBindingResolver::new([("Track1", "Hero")].into_iter().collect::<BindingSet>());
    assert_eq!(resolver.state(), ResolverState::Unresolved);
    let mut diags = diags();
    let report = resolver.resolve(&mut director, &scene, &mut diags);

    assert_eq!(
        director.binding(t1),
        Some(&BindingTarget::Component {
            object: hero,
            kind: ComponentKind::Animator
        })
    );
    assert_eq!(director.binding(t2), None);
    assert_eq!(report.bound, vec!["Track1".to_string()]);
    assert_eq!(report.skipped, vec!["Track2".to_string()]);
    assert!(diags.is_empty());
    assert_eq!(resolver.state(), ResolverState::Resolved);
}

#[test]
fn missing_object_warns_and_other_entries_still_bind() {
    let mut scene = MemoryScene::new();
    let door = scene.spawn("Door", SpatialState::default());
    let asset = two_tracks();
    let t1 = asset.track("Track1").unwrap().source;
    let t2 = asset.track("Track2").unwrap().source;
    let mut director = PlayableDirector::new(asset);

    let mut resolver = TimelineBindingResolver::new(
        [("Track1", "Ghost"), ("Track2", "Door")]
            .into_iter()
            .collect(),
    );
    let mut diags = diags();
    let report = resolver.resolve(&mut director, &scene, &mut diags);

    assert_eq!(director.binding(t1), None);
    assert_eq!(director.binding(t2), Some(&BindingTarget::Object(door)));
    assert_eq!(report.failed, vec!["Track1".to_string()]);
    assert_eq!(diags.count(DiagnosticKind::UnboundTrack), 1);
    assert!(diags.iter().any(|d| d.message.contains("Ghost")));
    assert_eq!(resolver.state(), ResolverState::Resolved);
}

#[test]
fn animation_track_without_animator_is_skipped() {
    let mut scene = MemoryScene::new();
    scene.spawn("Prop", SpatialState::default());
    let asset = two_tracks();
    let t1 = asset.track("Track1").unwrap().source;
    let mut director = PlayableDirector::new(asset);

    let mut resolver =
        TimelineBindingResolver::new([("Track1", "Prop")].into_iter().collect());
    let mut diags = diags();
    let report = resolver.resolve(&mut director, &scene, &mut diags);

    assert_eq!(director.binding(t1), None);
    assert_eq!(report.skipped, vec!["Track1".to_string(), "Track2".to_string()]);
    assert!(diags.is_empty());
}

#[test]
fn marker_tracks_are_never_bound() {
    let mut scene = MemoryScene::new();
    scene.spawn("Hero", SpatialState::default());
    let mut asset = TimelineAsset::new("shot", 1.0);
    let markers = asset.push_track("Markers", TrackKind::Marker);
    let mut director = PlayableDirector::new(asset);

    let mut resolver =
        TimelineBindingResolver::new([("Markers", "Hero")].into_iter().collect());
    let report = resolver.resolve(&mut director, &scene, &mut diags());
    assert_eq!(director.binding(markers), None);
    assert!(report.bound.is_empty() && report.skipped.is_empty() && report.failed.is_empty());
}

#[test]
fn auto_populate_preserves_names_and_adds_blanks() {
    let mut asset = TimelineAsset::new("shot", 1.0);
    asset.push_track("A", TrackKind::Animation);
    asset.push_track("B", TrackKind::Activation);
    asset.push_track("Markers", TrackKind::Other("signal".into()));
    asset.push_track("Cues", TrackKind::Marker);
    asset.push_track("", TrackKind::Activation);

    let mut resolver = TimelineBindingResolver::new(
        [("A", "X"), ("Stale", "Y")].into_iter().collect(),
    );
    resolver.auto_populate(&asset);

    let entries: Vec<_> = resolver.bindings.iter().collect();
    assert_eq!(entries, vec![("A", "X"), ("B", "")]);
    assert_eq!(resolver.state(), ResolverState::Unresolved);
}

#[test]
fn activate_without_director_records_error() {
    let scene = MemoryScene::new();
    let mut resolver = TimelineBindingResolver::default();
    let mut diags = diags();
    let report = resolver.activate::<PlayableDirector, _>(None, &scene, &mut diags, HostMode::Playing);
    assert!(report.is_none());
    assert_eq!(diags.count(DiagnosticKind::MissingUpstreamComponent), 1);
    assert_eq!(resolver.state(), ResolverState::Unresolved);
}

#[test]
fn edit_preview_activation_evaluates_immediately() {
    let mut scene = MemoryScene::new();
    scene.spawn("Door", SpatialState::default());
    let mut director = PlayableDirector::new(two_tracks());
    let mut resolver =
        TimelineBindingResolver::new([("Track2", "Door")].into_iter().collect());

    resolver.activate(Some(&mut director), &scene, &mut diags(), HostMode::Playing);
    assert_eq!(director.evaluations(), 0);
    resolver.activate(Some(&mut director), &scene, &mut diags(), HostMode::EditPreview);
    assert_eq!(director.evaluations(), 1);
}

#[test]
fn director_without_asset_is_left_untouched() {
    let scene = MemoryScene::new();
    let mut director = PlayableDirector::empty();
    let mut resolver = TimelineBindingResolver::new([("Track1", "Hero")].into_iter().collect());
    let report = resolver.resolve(&mut director, &scene, &mut diags());
    assert_eq!(report, Default::default());
    assert_eq!(resolver.state(), ResolverState::Unresolved);
}

#[test]
fn binding_set_from_json_and_entries() {
    let set = BindingSet::from_json(r#"{"Track1": "Hero", "Track2": ""}"#).unwrap();
    assert_eq!(set.get("Track1"), Some("Hero"));
    assert_eq!(set.get("Track2"), Some(""));
    let rebuilt = BindingSet::from_entries(set.entries());
    assert_eq!(rebuilt, set);

    let dup = BindingSet::from_entries(vec![
        BindingEntry {
            track_name: "T".into(),
            target_object_name: "first".into(),
        },
        BindingEntry {
            track_name: "T".into(),
            target_object_name: "second".into(),
        },
    ]);
    assert_eq!(dup.len(), 1);
    assert_eq!(dup.get("T"), Some("second"));
}

#[test]
fn fixture_timeline_binds_by_kind() {
    let scene = MemoryScene::from_json(
        &camrig_test_fixtures::scenes::json("stage").expect("stage fixture"),
    )
    .unwrap();
    let asset =
        TimelineAsset::from_json(&camrig_test_fixtures::timelines::asset_json("intro").unwrap())
            .unwrap();
    let bindings: BindingSet = camrig_test_fixtures::timelines::bindings("intro")
        .unwrap()
        .expect("intro has bindings");
    let mut director = PlayableDirector::new(asset);
    let mut resolver = TimelineBindingResolver::new(bindings);
    let report = resolver.resolve(&mut director, &scene, &mut diags());

    assert_eq!(report.bound, vec!["Track1".to_string()]);
    // Door has no animator; Track2 has a blank target.
    assert_eq!(report.skipped, vec!["Track2".to_string(), "DoorSwing".to_string()]);
    assert!(report.failed.is_empty());
    let names: Vec<_> = director
        .bound_objects()
        .into_iter()
        .map(|(track, _)| track)
        .collect();
    assert_eq!(names, vec!["Track1".to_string()]);
}

#[test]
fn auto_populate_on_marker_only_timeline_is_empty() {
    let asset = TimelineAsset::from_json(
        &camrig_test_fixtures::timelines::asset_json("markers-only").unwrap(),
    )
    .unwrap();
    let mut resolver = TimelineBindingResolver::new([("Cues", "Hero")].into_iter().collect());
    resolver.auto_populate(&asset);
    assert!(resolver.bindings.is_empty());
}

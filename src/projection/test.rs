use crate::attribute::{
    AttributeCategory, EdgeAttributes, GeneralAttributes, Guidance, GuidanceForm, Lighting, Side,
    Sided, SourceSystem, SpeedLimit, Surface, TravelDirection,
};
use crate::config::MergeConfig;
use crate::projection::{AttributeOverlay, Projection, project};

use approx::assert_relative_eq;
use radnetz_linear::{Interval, LinearAttribute, Resolution, Segment};

fn track() -> Guidance {
    Guidance {
        form: GuidanceForm::CycleTrack,
        surface: Surface::Paving,
        width: Some(2.0),
    }
}

fn source() -> EdgeAttributes {
    EdgeAttributes {
        speed: LinearAttribute::new(vec![
            Segment::between(0.0, 0.5, SpeedLimit::UpTo30).expect("valid interval"),
            Segment::between(0.5, 1.0, SpeedLimit::UpTo50).expect("valid interval"),
        ])
        .expect("partitions the edge"),
        guidance: Sided::new(LinearAttribute::uniform(track()), LinearAttribute::default()),
        direction: Sided::new(TravelDirection::Forward, TravelDirection::Both),
        two_sided: true,
        ..EdgeAttributes::default()
    }
}

fn speed_only(speed: SpeedLimit) -> AttributeOverlay {
    AttributeOverlay {
        speed: Some(LinearAttribute::uniform(speed)),
        ..AttributeOverlay::default()
    }
}

#[test_log::test]
fn a_full_source_replaces_the_target() {
    let target = EdgeAttributes::default();
    let projections = [Projection::full(
        AttributeOverlay::from(&source()),
        true,
        Some(SourceSystem::Dlm),
    )];

    let outcome = project(&target, &projections, &MergeConfig::default());

    assert!(outcome.conflicts.is_empty());
    assert_eq!(outcome.attributes.speed, source().speed);
    assert_eq!(outcome.attributes.guidance, source().guidance);
    assert_eq!(outcome.attributes.direction, source().direction);
    assert!(outcome.attributes.two_sided);
}

#[test]
fn an_opposite_source_is_mirrored() {
    let target = EdgeAttributes::default();
    let projections = [Projection::full(AttributeOverlay::from(&source()), false, None)];

    let attributes = project(&target, &projections, &MergeConfig::default()).attributes;

    assert_eq!(*attributes.speed.value_at(0.25), SpeedLimit::UpTo50);
    assert_eq!(*attributes.speed.value_at(0.75), SpeedLimit::UpTo30);
    assert_eq!(*attributes.guidance.right.first(), track());
    assert!(attributes.guidance.left.values().all(Guidance::is_unset));
    assert_eq!(attributes.direction.right, TravelDirection::Backward);
    assert_eq!(attributes.direction.left, TravelDirection::Both);
}

#[test]
fn orientation_does_not_change_the_result() {
    let target = EdgeAttributes::default();
    let overlay = AttributeOverlay::from(&source());

    let along = project(
        &target,
        &[Projection::full(overlay.clone(), true, None)],
        &MergeConfig::default(),
    );
    let against = project(
        &target,
        &[Projection::full(overlay.oriented(false), false, None)],
        &MergeConfig::default(),
    );

    assert_eq!(along, against);
}

#[test]
fn a_partial_source_is_rescaled() {
    let target = EdgeAttributes {
        speed: LinearAttribute::uniform(SpeedLimit::UpTo70),
        ..EdgeAttributes::default()
    };

    let projections = [Projection {
        overlay: AttributeOverlay::from(&source()),
        interval: Interval::new(0.5, 1.0).expect("valid interval"),
        same_direction: true,
        source: None,
    }];

    let attributes = project(&target, &projections, &MergeConfig::default()).attributes;
    let segments = attributes.speed.segments();

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].value, SpeedLimit::UpTo70);
    assert_relative_eq!(segments[0].interval.to(), 0.5);
    assert_eq!(segments[1].value, SpeedLimit::UpTo30);
    assert_relative_eq!(segments[1].interval.to(), 0.75);
    assert_eq!(segments[2].value, SpeedLimit::UpTo50);

    // Travel direction holds for the whole edge, half an edge cannot set it.
    assert_eq!(attributes.direction, Sided::both(TravelDirection::Both));
}

#[test_log::test]
fn disagreeing_sources_keep_the_target() {
    let target = EdgeAttributes {
        speed: LinearAttribute::uniform(SpeedLimit::UpTo70),
        ..EdgeAttributes::default()
    };

    let projections = [
        Projection::full(speed_only(SpeedLimit::UpTo30), true, Some(SourceSystem::Dlm)),
        Projection::full(speed_only(SpeedLimit::UpTo50), false, Some(SourceSystem::Manual)),
    ];

    let outcome = project(&target, &projections, &MergeConfig::default());

    assert_eq!(outcome.attributes.speed, target.speed);
    assert_eq!(outcome.conflicts.len(), 1);

    let conflict = outcome.conflicts[0];
    assert_eq!(conflict.category, AttributeCategory::Speed);
    assert_eq!(conflict.side, None);
    assert_eq!(conflict.resolution, Resolution::KeptBase);
    assert!(conflict.interval.approx_eq(&Interval::FULL, 1e-9));
}

#[test]
fn the_authoritative_source_wins_conflicts() {
    let mut config = MergeConfig::default();
    config
        .authority
        .insert(AttributeCategory::Speed, SourceSystem::Manual);

    let projections = [
        Projection::full(speed_only(SpeedLimit::UpTo30), true, Some(SourceSystem::Dlm)),
        Projection::full(speed_only(SpeedLimit::UpTo50), true, Some(SourceSystem::Manual)),
    ];

    let outcome = project(&EdgeAttributes::default(), &projections, &config);

    assert_eq!(
        outcome.attributes.speed,
        LinearAttribute::uniform(SpeedLimit::UpTo50)
    );
    assert_eq!(
        outcome.conflicts[0].resolution,
        Resolution::Authoritative(SourceSystem::Manual)
    );
}

#[test]
fn sided_conflicts_name_their_side() {
    let mut narrow = AttributeOverlay::default();
    narrow.guidance.right = Some(LinearAttribute::uniform(track()));

    let mut wide = AttributeOverlay::default();
    wide.guidance.right = Some(LinearAttribute::uniform(Guidance {
        width: Some(3.0),
        ..track()
    }));

    let projections = [
        Projection::full(narrow, true, None),
        Projection::full(wide, true, None),
    ];

    let outcome = project(&EdgeAttributes::default(), &projections, &MergeConfig::default());

    assert_eq!(outcome.conflicts.len(), 1);
    assert_eq!(outcome.conflicts[0].category, AttributeCategory::Guidance);
    assert_eq!(outcome.conflicts[0].side, Some(Side::Right));
}

#[test]
fn only_shared_values_are_retained() {
    let mut a = AttributeOverlay::from(&source());
    let mut b = speed_only(SpeedLimit::UpTo20);
    b.direction.left = Some(TravelDirection::Forward);

    a.retain_shared(&mut b);

    assert!(a.speed.is_some() && b.speed.is_some());
    assert!(a.direction.left.is_some() && b.direction.left.is_some());
    assert!(a.general.is_none());
    assert!(a.guidance.left.is_none() && a.direction.right.is_none());
    assert!(!a.is_empty());

    let mut empty = AttributeOverlay::default();
    a.retain_shared(&mut empty);
    assert!(a.is_empty());
}

#[test]
fn street_names_stay_with_the_target() {
    let named = |name: &str| GeneralAttributes {
        street_name: Some(name.to_string()),
        ..GeneralAttributes::default()
    };

    let target = EdgeAttributes {
        general: named("Ring"),
        ..EdgeAttributes::default()
    };
    let lit = EdgeAttributes {
        general: GeneralAttributes {
            lighting: Lighting::Present,
            ..named("Hauptstraße")
        },
        ..EdgeAttributes::default()
    };

    let projections = [Projection::full(AttributeOverlay::from(&lit), true, None)];
    let outcome = project(&target, &projections, &MergeConfig::default());

    assert!(outcome.conflicts.is_empty());
    assert_eq!(outcome.attributes.general.street_name.as_deref(), Some("Ring"));
    assert_eq!(outcome.attributes.general.lighting, Lighting::Present);
}

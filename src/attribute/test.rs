use crate::attribute::{
    AttributeCategory, AttributeEq, EdgeAttributes, Environment, GeneralAttributes, Guidance,
    GuidanceForm, Lighting, Sided, SpeedLimit, Surface, Surroundings, TravelDirection,
};

use radnetz_linear::{LinearAttribute, Segment};
use std::str::FromStr;

fn lane(width: f64) -> Guidance {
    Guidance {
        form: GuidanceForm::BicycleLane,
        surface: Surface::Asphalt,
        width: Some(width),
    }
}

fn speeds() -> LinearAttribute<SpeedLimit> {
    LinearAttribute::new(vec![
        Segment::between(0.0, 0.25, SpeedLimit::UpTo30).expect("valid interval"),
        Segment::between(0.25, 1.0, SpeedLimit::UpTo50).expect("valid interval"),
    ])
    .expect("partitions the edge")
}

#[test]
fn names_and_numbers_do_not_attribute_an_edge() {
    let mut attributes = EdgeAttributes::default();
    attributes.general.street_name = Some("Hauptstraße".to_string());
    attributes.general.street_number = Some("12a".to_string());
    assert!(attributes.is_attributeless());

    attributes.general.lighting = Lighting::Present;
    assert!(!attributes.is_attributeless());
}

#[test]
fn a_single_sided_value_attributes_an_edge() {
    let mut attributes = EdgeAttributes::default();
    attributes.guidance.right = LinearAttribute::uniform(lane(1.5));
    assert!(!attributes.is_attributeless());

    let mut attributes = EdgeAttributes::default();
    attributes.direction.left = TravelDirection::Forward;
    assert!(!attributes.is_attributeless());
}

#[test_log::test]
fn orientation_mirrors_swaps_and_flips() {
    let attributes = EdgeAttributes {
        speed: speeds(),
        guidance: Sided::new(LinearAttribute::uniform(lane(1.5)), LinearAttribute::default()),
        direction: Sided::new(TravelDirection::Forward, TravelDirection::Both),
        two_sided: true,
        ..EdgeAttributes::default()
    };

    let reversed = attributes.oriented(false);

    assert_eq!(*reversed.speed.first(), SpeedLimit::UpTo50);
    assert_eq!(*reversed.speed.value_at(0.9), SpeedLimit::UpTo30);
    assert_eq!(*reversed.guidance.right.first(), lane(1.5));
    assert!(reversed.guidance.left.values().all(Guidance::is_unset));
    assert_eq!(reversed.direction.right, TravelDirection::Backward);
    assert_eq!(reversed.direction.left, TravelDirection::Both);

    assert_eq!(reversed.oriented(false), attributes);
    assert_eq!(attributes.oriented(true), attributes);
}

#[test]
fn sidedness_follows_guidance_and_direction() {
    let mut attributes = EdgeAttributes {
        guidance: Sided::both(LinearAttribute::uniform(lane(1.5))),
        two_sided: true,
        ..EdgeAttributes::default()
    };

    attributes.update_sidedness(0.05);
    assert!(!attributes.two_sided);

    attributes.guidance.left = LinearAttribute::uniform(lane(1.52));
    attributes.update_sidedness(0.05);
    assert!(!attributes.two_sided, "widths within epsilon are equal");

    attributes.direction.left = TravelDirection::Forward;
    attributes.update_sidedness(0.05);
    assert!(attributes.two_sided);
}

#[test]
fn guidance_widths_compare_within_epsilon() {
    assert!(lane(2.0).eq_within(&lane(2.04), 0.05));
    assert!(!lane(2.0).eq_within(&lane(2.1), 0.05));
    assert!(!lane(2.0).eq_within(&Guidance::default(), 1.0));

    let lit = Environment {
        lighting: Lighting::Present,
        ..Environment::default()
    };
    assert!(!lit.eq_within(&Environment::default(), 1.0));
}

#[test]
fn a_new_environment_keeps_the_street() {
    let general = GeneralAttributes {
        street_name: Some("Ring".to_string()),
        street_number: Some("3".to_string()),
        ..GeneralAttributes::default()
    };

    let environment = Environment {
        lighting: Lighting::Partial,
        surroundings: Surroundings::Urban,
    };
    let described = general.with_environment(environment);

    assert_eq!(described.street_name.as_deref(), Some("Ring"));
    assert_eq!(described.street_number.as_deref(), Some("3"));
    assert_eq!(described.environment(), environment);
    assert!(!described.is_unset());
}

#[test]
fn linear_values_compare_segment_wise() {
    assert!(speeds().eq_within(&speeds(), 0.0));
    assert!(!speeds().eq_within(&LinearAttribute::uniform(SpeedLimit::UpTo30), 0.0));
}

#[test]
fn categories_parse_from_configuration_names() {
    assert_eq!(
        AttributeCategory::from_str("responsibility"),
        Ok(AttributeCategory::Responsibility)
    );
    assert_eq!(AttributeCategory::Guidance.to_string(), "guidance");
    assert!(AttributeCategory::Guidance.is_sided() && AttributeCategory::Guidance.is_linear());
    assert!(AttributeCategory::Direction.is_sided() && !AttributeCategory::Direction.is_linear());
}

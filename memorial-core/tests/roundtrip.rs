//! Round-trip law: exporting then importing a design yields an
//! element-for-element identical ordered record list, for any non-empty
//! design of valid placed elements.

use memorial_core::{Design, DesignDocument, TemplateId};
use proptest::prelude::*;

const TEMPLATES: &[&str] = &[
    "stone-vertical",
    "stone-horizontal",
    "cross-orthodox",
    "flower-rose",
    "portrait",
    "epitaph",
    "lettering",
    "dates",
];

#[derive(Debug, Clone)]
struct Placement {
    template: &'static str,
    x: f32,
    y: f32,
    rotation: f32,
    scale: f32,
}

fn placement_strategy() -> impl Strategy<Value = Placement> {
    (
        prop::sample::select(TEMPLATES),
        0.0f32..800.0,
        0.0f32..600.0,
        -720.0f32..720.0,
        0.1f32..4.0,
    )
        .prop_map(|(template, x, y, rotation, scale)| Placement {
            template,
            x,
            y,
            rotation,
            scale,
        })
}

proptest! {
    #[test]
    fn export_import_round_trips(placements in prop::collection::vec(placement_strategy(), 1..24)) {
        let mut design = Design::new(800.0, 600.0);
        for p in &placements {
            let template = TemplateId::new(p.template).expect("valid id");
            let id = design.place(template, p.x, p.y);
            design.set_scale(id, p.scale).expect("scale");
            design.rotate_to(id, p.rotation).expect("rotate");
        }

        let exported = DesignDocument::from_design(&design);
        let json = exported.to_json().expect("encode");

        let reimported = DesignDocument::from_json(&json)
            .expect("decode")
            .into_design()
            .expect("materialize");

        let re_exported = DesignDocument::from_design(&reimported);
        prop_assert_eq!(&exported.elements, &re_exported.elements);
        prop_assert_eq!(exported.elements.len(), placements.len());
    }

    #[test]
    fn export_never_mutates_the_design(placements in prop::collection::vec(placement_strategy(), 1..12)) {
        let mut design = Design::new(800.0, 600.0);
        for p in &placements {
            let template = TemplateId::new(p.template).expect("valid id");
            design.place(template, p.x, p.y);
        }

        let before = design.clone();
        let _ = DesignDocument::from_design(&design);
        let _ = DesignDocument::from_design(&design).to_json().expect("encode");
        prop_assert_eq!(before, design);
    }
}

//! Integration tests for design export.

use memorial_core::{Design, TemplateId, TemplateLibrary};
use memorial_renderer::{DesignExporter, ExportConfig};

fn template(id: &str) -> TemplateId {
    TemplateId::new(id).expect("valid id")
}

fn sample_design() -> Design {
    let mut design = Design::new(800.0, 600.0);
    let stone = design.place(template("stone-vertical"), 40.0, 20.0);
    design.set_scale(stone, 3.0).expect("scale");
    let portrait = design.place(template("portrait"), 120.0, 80.0);
    design.rotate_to(portrait, 12.0).expect("rotate");
    design.place(template("epitaph"), 100.0, 300.0);
    design
}

#[test]
fn test_png_export_has_magic_and_default_dimensions() {
    let library = TemplateLibrary::builtin();
    let png = DesignExporter::with_defaults()
        .render_png(&sample_design(), &library)
        .expect("png");

    assert_eq!(&png[0..4], &[137, 80, 78, 71]);

    let decoded = image::load_from_memory(&png).expect("decode");
    assert_eq!(decoded.width(), 1200);
    assert_eq!(decoded.height(), 1600);
}

#[test]
fn test_custom_export_dimensions() {
    let config = ExportConfig {
        width: 300,
        height: 400,
        background: [255, 255, 255, 255],
    };
    let library = TemplateLibrary::builtin();
    let png = DesignExporter::new(config)
        .render_png(&sample_design(), &library)
        .expect("png");

    let decoded = image::load_from_memory(&png).expect("decode");
    assert_eq!((decoded.width(), decoded.height()), (300, 400));
}

#[test]
fn test_empty_design_still_exports_background() {
    let design = Design::new(800.0, 600.0);
    let png = DesignExporter::with_defaults()
        .render_png(&design, &TemplateLibrary::builtin())
        .expect("png");
    assert_eq!(&png[0..4], &[137, 80, 78, 71]);
}

#[test]
fn test_export_is_a_pure_read() {
    let design = sample_design();
    let before = design.clone();

    let library = TemplateLibrary::builtin();
    let exporter = DesignExporter::with_defaults();
    let _ = exporter.render_svg(&design, &library);
    let _ = exporter.render_png(&design, &library).expect("png");

    assert_eq!(before, design);
}

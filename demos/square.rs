//! Meshes a square lake inside a rectangular field and prints how many
//! triangles each shape owns.
//!
//! ```text
//! cargo run --example square
//! RUST_LOG=shapemesh=debug cargo run --example square
//! ```

use shapemesh::math::Point2;
use shapemesh::{MesherConfig, ShapeMesher};

fn main() -> shapemesh::Result<()> {
    // Default: WARN for everything, INFO for shapemesh.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("shapemesh=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let p = Point2::new;
    let mut mesher = ShapeMesher::new(MesherConfig::default().with_samples(20));

    mesher.new_shape(
        "field",
        &[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 6.0), p(0.0, 6.0)],
        "polygon",
    )?;
    mesher.new_shape(
        "lake",
        &[p(3.0, 2.0), p(5.0, 2.0), p(5.0, 4.0), p(3.0, 4.0)],
        "polygon",
    )?;
    mesher.new_shape("gauge", &[p(8.0, 3.0)], "point")?;

    let resolution = mesher.resolution();
    mesher.meshit(false)?;
    mesher.refine_mesh(&format!("q30a{}", resolution * resolution))?;

    let names: Vec<String> = mesher.registry().names().map(str::to_owned).collect();
    let owners = mesher.shape_map()?;
    for (index, name) in names.iter().enumerate() {
        let count = owners.iter().filter(|&&o| o == index).count();
        println!("{name}: {count} triangles");
    }
    Ok(())
}

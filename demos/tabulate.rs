//! Tabulate a reference cell and log the resulting tables.
//!
//! Usage: `cargo run --example tabulate -- [shape] [degree]`,
//! e.g. `cargo run --example tabulate -- triangle 2`.

use fecell::{info::LogInfo, reference_cell, ReferenceShape};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()?;

    let mut args = std::env::args().skip(1);
    let shape: ReferenceShape = args.next().as_deref().unwrap_or("line").parse()?;
    let degree: usize = args.next().as_deref().unwrap_or("1").parse()?;

    let name = format!("{shape}-p{degree}");
    let mut cell = reference_cell(name.clone(), shape, degree);
    cell.initialize(&mut LogInfo::with_target(name))?;

    if let Some(tables) = cell.tables() {
        println!(
            "{}: cell_dim {}, num_corners {}, num_quad_pts {}",
            cell.name(),
            tables.cell_dim(),
            tables.num_corners(),
            tables.num_quad_pts(),
        );
    }
    Ok(())
}

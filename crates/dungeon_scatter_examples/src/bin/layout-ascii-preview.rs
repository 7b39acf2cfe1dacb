use dungeon_scatter::prelude::*;
use dungeon_scatter_examples::init_tracing;

/// Generates a layout and prints it as ASCII. Pass a seed as the first
/// argument for a reproducible run; omit it to seed from entropy.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let seed = std::env::args().nth(1).map(|arg| arg.parse()).transpose()?;
    let grid = GridModel::new(40, 30, 1.0)?;
    let mut rng = seeded_rng(seed);

    let generation = generate(&grid, &GenerationParams::default(), &mut rng)?;
    let layout = &generation.layout;

    for y in (0..layout.height()).rev() {
        let mut line = String::with_capacity(layout.width() as usize);
        for x in 0..layout.width() {
            line.push(match layout.cell(x, y) {
                CellType::Empty => ' ',
                CellType::Room => '.',
                CellType::Corridor => '#',
                CellType::Blocked => 'X',
            });
        }
        println!("{line}");
    }

    println!(
        "rooms: {} | corridor cells: {} | rejected attempts: {}",
        generation.rooms_placed, generation.corridor_cells, generation.attempts_rejected
    );

    Ok(())
}

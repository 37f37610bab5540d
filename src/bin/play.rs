use std::io::{self, BufRead, Write};

use avg_2048::display::render_verbose;
use avg_2048::engine::{Game, Move};

/// Interactive console play: one direction word per line, `quit` to stop.
/// Invalid words are rejected with a diagnostic and change nothing.
fn main() -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();
    let mut game = Game::start(&mut rng);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", render_verbose(&game));
        if game.is_lost() {
            println!("Game over");
            break;
        }
        print!("Direction: ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let input = line?;
        let word = input.trim();
        if word == "quit" {
            break;
        }
        match word.parse::<Move>() {
            Ok(direction) => {
                if game.apply_move(direction) {
                    game.spawn_random_tile(&mut rng);
                } else {
                    println!("That move changes nothing");
                }
            }
            Err(err) => eprintln!("Error: {}", err),
        }
    }
    Ok(())
}
